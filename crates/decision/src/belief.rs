use crate::{FocalSet, MassFunction, ThresholdError};
use strum_macros::Display;

/// The support interval `[belief, plausibility]` a mass function implies for a hypothesis.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct BeliefInterval {
    /// The lower bound of support: mass committed to subsets of the hypothesis.
    pub belief: f64,
    /// The upper bound of support: mass that does not contradict the hypothesis.
    pub plausibility: f64,
}

impl BeliefInterval {
    /// The width of the interval, `plausibility - belief`.
    ///
    /// A wide interval means the source is undecided about the hypothesis. Zero means the source commits to an
    /// exact probability.
    pub fn width(&self) -> f64 {
        self.plausibility - self.belief
    }

    /// Classifies the width of the interval. See [`UncertaintyThresholds::classify`].
    pub fn uncertainty(
        &self,
        thresholds: &UncertaintyThresholds,
    ) -> Result<Uncertainty, ThresholdError> {
        thresholds.classify(self.width())
    }
}

/// A category describing how undecided a source is about a hypothesis.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Uncertainty {
    Low,
    Moderate,
    High,
}

/// The interval widths separating the [`Uncertainty`] categories.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct UncertaintyThresholds {
    /// Widths strictly below `low` are [`Uncertainty::Low`].
    pub low: f64,
    /// Widths at or above `high` are [`Uncertainty::High`]. Anything between is [`Uncertainty::Moderate`].
    pub high: f64,
}

/// The default [`UncertaintyThresholds::low`] value.
pub const DEFAULT_LOW_UNCERTAINTY: f64 = 0.1;
/// The default [`UncertaintyThresholds::high`] value.
pub const DEFAULT_HIGH_UNCERTAINTY: f64 = 0.3;

impl Default for UncertaintyThresholds {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW_UNCERTAINTY,
            high: DEFAULT_HIGH_UNCERTAINTY,
        }
    }
}

impl UncertaintyThresholds {
    /// Checks that both thresholds are between 0.0 and 1.0 and that `low` does not exceed `high`.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        if self.low > self.high {
            return Err(ThresholdError::ThresholdOutOfOrder);
        }
        if !(0.0..=1.0).contains(&self.low) {
            return Err(ThresholdError::ThresholdOutOfRange(self.low));
        }
        if !(0.0..=1.0).contains(&self.high) {
            return Err(ThresholdError::ThresholdOutOfRange(self.high));
        }
        Ok(())
    }

    /// Maps an interval width onto an [`Uncertainty`] category.
    ///
    /// Returns [`ThresholdError`] if the thresholds are out-of-order or out-of-range.
    ///
    /// # Arguments
    ///
    /// * `width` - The width of a [`BeliefInterval`].
    pub fn classify(&self, width: f64) -> Result<Uncertainty, ThresholdError> {
        self.validate()?;
        match width {
            x if x < self.low => Ok(Uncertainty::Low),
            x if x >= self.high => Ok(Uncertainty::High),
            // x >= low && x < high
            _ => Ok(Uncertainty::Moderate),
        }
    }
}

impl MassFunction {
    /// The total mass of every focal element contained in `hypothesis`.
    ///
    /// `hypothesis` need not be a focal element. Belief of the empty set is 0.0 and belief of Θ is 1.0.
    pub fn belief(&self, hypothesis: &FocalSet) -> f64 {
        self.iter()
            .filter(|(set, _)| set.is_subset_of(hypothesis))
            .map(|(_, mass)| mass)
            .sum()
    }

    /// The total mass of every focal element that intersects `hypothesis`.
    ///
    /// Plausibility is never below [`belief`](MassFunction::belief). Plausibility of the empty set is 0.0 and
    /// plausibility of Θ is 1.0.
    pub fn plausibility(&self, hypothesis: &FocalSet) -> f64 {
        self.iter()
            .filter(|(set, _)| set.intersects(hypothesis))
            .map(|(_, mass)| mass)
            .sum()
    }

    /// The mass that contradicts `hypothesis`, `1 - plausibility`.
    pub fn doubt(&self, hypothesis: &FocalSet) -> f64 {
        1.0 - self.plausibility(hypothesis)
    }

    /// Computes the [`BeliefInterval`] for `hypothesis`.
    pub fn interval(&self, hypothesis: &FocalSet) -> BeliefInterval {
        let mut belief = 0.0;
        let mut plausibility = 0.0;
        for (set, mass) in self.iter() {
            if set.intersects(hypothesis) {
                plausibility += mass;
                if set.is_subset_of(hypothesis) {
                    belief += mass;
                }
            }
        }
        BeliefInterval {
            belief,
            plausibility,
        }
    }

    /// Computes the [`BeliefInterval`] of every singleton hypothesis, in frame order.
    pub fn intervals(&self) -> Vec<(&str, BeliefInterval)> {
        self.frame()
            .labels()
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), self.interval(&FocalSet::singleton(i))))
            .collect()
    }
}
