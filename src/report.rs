//! The JSON report emitted by the `fuse` subcommand.

use {
    crate::errors::ReportError,
    dsfusion_config::Config,
    dsfusion_decision::{
        CombinationRule, Evidence, Fused, MassFunction, ThresholdError, UncertaintyThresholds,
    },
    serde::Serialize,
};

/// Everything computed while fusing an evidence file.
#[derive(Serialize, Debug)]
pub struct Report {
    pub frame: Vec<String>,
    pub rule: String,
    pub sources: Vec<SourceReport>,
    /// The pairwise combinations in the order they were performed.
    pub steps: Vec<StepReport>,
    pub fused: FusedReport,
}

#[derive(Serialize, Debug)]
pub struct SourceReport {
    pub name: String,
    pub reliability: f64,
    /// The focal elements after discounting, by descending mass.
    pub focal_elements: Vec<FocalReport>,
    pub intervals: Vec<IntervalReport>,
}

#[derive(Serialize, Debug)]
pub struct FocalReport {
    pub hypotheses: Vec<String>,
    pub mass: f64,
}

#[derive(Serialize, Debug)]
pub struct IntervalReport {
    pub hypothesis: String,
    pub belief: f64,
    pub plausibility: f64,
    pub width: f64,
    pub uncertainty: String,
}

#[derive(Serialize, Debug)]
pub struct StepReport {
    pub left: String,
    pub right: String,
    pub conflict: f64,
}

#[derive(Serialize, Debug)]
pub struct FusedReport {
    pub focal_elements: Vec<FocalReport>,
    pub intervals: Vec<IntervalReport>,
    pub pignistic: Vec<ProbabilityReport>,
    /// The largest conflict of any single step.
    pub max_conflict: f64,
    pub decision: DecisionReport,
}

#[derive(Serialize, Debug)]
pub struct ProbabilityReport {
    pub hypothesis: String,
    pub probability: f64,
}

#[derive(Serialize, Debug)]
pub struct DecisionReport {
    pub hypothesis: String,
    pub probability: f64,
    pub threshold: f64,
    /// True if the decided hypothesis reaches the decision threshold.
    pub accepted: bool,
}

impl Report {
    /// Builds a report from the fused result and the evidence it was fused from.
    ///
    /// # Arguments
    ///
    /// * `config` - The evidence file the sources were loaded from, used for thresholds and reliabilities.
    /// * `evidence` - The converted sources, in fusion order.
    /// * `rule` - The rule the sources were fused with.
    /// * `fused` - The result of the fusion.
    pub fn new(
        config: &Config,
        evidence: &[Evidence],
        rule: CombinationRule,
        fused: &Fused,
    ) -> Result<Self, ReportError> {
        let thresholds = config.thresholds.uncertainty()?;
        let sources = evidence
            .iter()
            .map(|source| -> Result<SourceReport, ThresholdError> {
                Ok(SourceReport {
                    name: source.name.clone(),
                    reliability: config
                        .source(&source.name)
                        .map_or(dsfusion_config::DEFAULT_SOURCE_RELIABILITY, |s| {
                            s.reliability
                        }),
                    focal_elements: focal_elements(&source.mass),
                    intervals: intervals(&source.mass, &thresholds)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let pignistic = fused.mass.pignistic();
        let choice = pignistic.decision();
        let accepted = pignistic.accepted(&choice.hypothesis, config.thresholds.decision)?;

        Ok(Self {
            frame: fused.mass.frame().labels().to_vec(),
            rule: rule.to_string(),
            sources,
            steps: fused
                .steps
                .iter()
                .map(|step| StepReport {
                    left: step.left.clone(),
                    right: step.right.clone(),
                    conflict: step.conflict,
                })
                .collect(),
            fused: FusedReport {
                focal_elements: focal_elements(&fused.mass),
                intervals: intervals(&fused.mass, &thresholds)?,
                pignistic: pignistic
                    .iter()
                    .map(|(hypothesis, probability)| ProbabilityReport {
                        hypothesis: hypothesis.to_string(),
                        probability,
                    })
                    .collect(),
                max_conflict: fused.max_conflict(),
                decision: DecisionReport {
                    hypothesis: choice.hypothesis,
                    probability: choice.probability,
                    threshold: config.thresholds.decision,
                    accepted,
                },
            },
        })
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, ReportError> {
        if pretty {
            Ok(serde_json::to_string_pretty(self)?)
        } else {
            Ok(serde_json::to_string(self)?)
        }
    }
}

fn focal_elements(mass: &MassFunction) -> Vec<FocalReport> {
    mass.focal_elements()
        .iter()
        .map(|(set, m)| FocalReport {
            hypotheses: mass
                .frame()
                .labels_of(set)
                .into_iter()
                .map(String::from)
                .collect(),
            mass: *m,
        })
        .collect()
}

fn intervals(
    mass: &MassFunction,
    thresholds: &UncertaintyThresholds,
) -> Result<Vec<IntervalReport>, ThresholdError> {
    mass.intervals()
        .into_iter()
        .map(|(hypothesis, interval)| -> Result<IntervalReport, ThresholdError> {
            Ok(IntervalReport {
                hypothesis: hypothesis.to_string(),
                belief: interval.belief,
                plausibility: interval.plausibility,
                width: interval.width(),
                uncertainty: interval.uncertainty(thresholds)?.to_string(),
            })
        })
        .collect()
}
