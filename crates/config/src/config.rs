//! The config module provides the internal representation of an evidence file.

use crate::ConversionError;
use dsfusion_decision::{
    CombinationRule, Evidence, FocalSet, Frame, FrameError, FusionError, MassFunction,
    ThresholdError, UncertaintyThresholds, DEFAULT_HIGH_UNCERTAINTY, DEFAULT_LOW_UNCERTAINTY,
};
use regex::Regex;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use validator::{Validate, ValidationError};

lazy_static! {
    static ref RE_VALID_NAME: Regex = Regex::new(r"^[_a-z0-9]+$").unwrap();
}

/// The hypothesis label that stands for the whole frame of discernment, Θ.
pub const THETA_WILDCARD: &str = "*";

/// The root of an evidence file.
///
/// Wraps the frame of discernment, the fusion settings and every named source, with includes already resolved.
#[derive(Debug, Clone)]
pub struct Config {
    /// The ordered hypothesis labels of the frame of discernment.
    pub frame: Vec<String>,
    /// Configuration for the combination of sources.
    pub fusion: Fusion,
    /// Configuration for the uncertainty and decision thresholds.
    pub thresholds: Thresholds,
    /// The sources of evidence, in the order they will be fused.
    pub sources: Vec<Source>,
}

impl Config {
    /// Looks up the [`Source`] corresponding to the `name` string.
    ///
    /// # Arguments
    ///
    /// * `name` - A string that corresponds to a [`Source::name`] value.
    pub fn source(&self, name: &str) -> Option<&Source> {
        self.sources.iter().find(|&source| source.name == name)
    }

    /// Builds the shared frame of discernment.
    pub fn frame(&self) -> Result<Arc<Frame>, FrameError> {
        Ok(Arc::new(Frame::new(self.frame.iter().cloned())?))
    }

    /// Converts every source into named [`Evidence`] over a single shared frame.
    ///
    /// Sources with a reliability below 1.0 are discounted. Returns [`ConversionError`] naming the first source
    /// that references an unknown hypothesis or does not describe a valid mass function.
    pub fn evidence(&self) -> Result<(Arc<Frame>, Vec<Evidence>), ConversionError> {
        let frame = self.frame()?;
        let evidence = self
            .sources
            .iter()
            .map(|source| {
                source
                    .mass_function(&frame)
                    .map(|mass| Evidence::new(source.name.clone(), mass))
                    .map_err(|error| ConversionError::Source {
                        source_name: source.name.clone(),
                        error,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok((frame, evidence))
    }
}

/// Configuration for the combination of sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fusion {
    /// The rule used to aggregate the sources.
    pub rule: CombinationRule,
}

/// Configuration for the uncertainty and decision thresholds.
///
/// Interval widths below `low_uncertainty` are classified as low uncertainty and widths at or above
/// `high_uncertainty` as high uncertainty. `low_uncertainty` must not exceed `high_uncertainty`.
#[derive(Debug, Validate, Clone, Copy)]
#[validate(schema(function = "validate_order", skip_on_field_errors = false))]
pub struct Thresholds {
    #[validate(range(min = 0.0, max = 1.0))]
    pub low_uncertainty: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub high_uncertainty: f64,
    /// The minimum pignistic probability required to accept the decided hypothesis.
    #[validate(range(min = 0.0, max = 1.0))]
    pub decision: f64,
}

/// The default [`Thresholds::decision`] value.
pub const DEFAULT_DECISION_THRESHOLD: f64 = 0.5;

fn validate_order(thresholds: &Thresholds) -> Result<(), ValidationError> {
    if thresholds.low_uncertainty > thresholds.high_uncertainty {
        return Err(ValidationError::new("low uncertainty threshold exceeds high"));
    }
    Ok(())
}

impl Default for Thresholds {
    /// Default uncertainty and decision thresholds.
    fn default() -> Self {
        Self {
            low_uncertainty: DEFAULT_LOW_UNCERTAINTY,
            high_uncertainty: DEFAULT_HIGH_UNCERTAINTY,
            decision: DEFAULT_DECISION_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// The thresholds used to classify belief interval widths.
    pub fn uncertainty(&self) -> Result<UncertaintyThresholds, ThresholdError> {
        let thresholds = UncertaintyThresholds {
            low: self.low_uncertainty,
            high: self.high_uncertainty,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }
}

/// The configuration for an individual source of evidence.
#[derive(Debug, Validate, Clone)]
pub struct Source {
    /// The source name. Should be limited to ASCII lowercase a-z, digits and underscores. Maximum 96 characters.
    #[validate(length(min = 1, max = 96), regex(path = "RE_VALID_NAME"))]
    pub name: String,
    /// How much the source should be trusted.
    ///
    /// A 1.0 value has no effect. See [`MassFunction::discount`].
    #[validate(range(min = 0.0, max = 1.0))]
    pub reliability: f64,
    /// The masses assigned by this source.
    #[validate(length(min = 1))]
    pub masses: Vec<FocalMass>,
}

/// The default [`Source::reliability`] value.
pub const DEFAULT_SOURCE_RELIABILITY: f64 = 1.0;

impl Source {
    /// Builds this source's mass function over `frame`, discounting it by its reliability.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame of discernment the source's hypotheses are resolved against.
    pub fn mass_function(&self, frame: &Arc<Frame>) -> Result<MassFunction, FusionError> {
        let entries = self
            .masses
            .iter()
            .map(|focal| focal.focal_set(frame).map(|set| (set, focal.mass)))
            .collect::<Result<Vec<(FocalSet, f64)>, FrameError>>()?;
        let mass = MassFunction::new(frame.clone(), entries)?;
        if self.reliability < DEFAULT_SOURCE_RELIABILITY {
            debug!(
                message = "discounting source",
                source = self.name.as_str(),
                reliability = self.reliability
            );
            return mass.discount(self.reliability);
        }
        Ok(mass)
    }
}

/// A mass assigned to a set of hypotheses.
#[derive(Debug, Validate, Clone, PartialEq, Serialize)]
pub struct FocalMass {
    /// The hypothesis labels forming the focal element. [`THETA_WILDCARD`] stands for the whole frame.
    #[validate(length(min = 1))]
    pub hypotheses: Vec<String>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub mass: f64,
}

impl FocalMass {
    /// Resolves the hypothesis labels against `frame`.
    ///
    /// [`THETA_WILDCARD`] is only recognized as the sole entry. Mixed with other labels it is an unknown hypothesis.
    pub fn focal_set(&self, frame: &Frame) -> Result<FocalSet, FrameError> {
        match self.hypotheses.as_slice() {
            [wildcard] if wildcard == THETA_WILDCARD => Ok(frame.theta()),
            hypotheses => frame.subset(hypotheses),
        }
    }
}
