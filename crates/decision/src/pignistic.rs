use crate::{Frame, MassFunction, ThresholdError, MASS_TOLERANCE};
use std::sync::Arc;

/// A point probability distribution over the individual hypotheses of a [`Frame`], derived from a mass function
/// with the [`pignistic`](MassFunction::pignistic) transformation.
#[derive(Debug, Clone)]
pub struct Pignistic {
    frame: Arc<Frame>,
    probabilities: Vec<f64>,
}

/// The hypothesis selected from a [`Pignistic`] distribution.
#[derive(PartialEq, Clone, Debug)]
pub struct Choice {
    pub hypothesis: String,
    pub probability: f64,
}

impl MassFunction {
    /// Reassigns the mass of every focal element evenly to its member hypotheses.
    ///
    /// This is used to convert to a form that is useful in producing a final decision. The result sums to 1.0 and
    /// hypotheses absent from every focal element get zero probability.
    pub fn pignistic(&self) -> Pignistic {
        let mut probabilities = vec![0.0; self.frame().len()];
        for (set, mass) in self.iter() {
            let share = mass / set.len() as f64;
            for i in set.indices() {
                if let Some(p) = probabilities.get_mut(i) {
                    *p += share;
                }
            }
        }
        Pignistic {
            frame: self.frame().clone(),
            probabilities,
        }
    }
}

impl Pignistic {
    pub fn frame(&self) -> &Arc<Frame> {
        &self.frame
    }

    /// The probability of `hypothesis`, or `None` if it is not part of the frame.
    pub fn probability(&self, hypothesis: &str) -> Option<f64> {
        self.frame
            .position(hypothesis)
            .and_then(|i| self.probabilities.get(i).copied())
    }

    /// Iterates over `(hypothesis, probability)` pairs in frame order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.frame
            .labels()
            .iter()
            .map(String::as_str)
            .zip(self.probabilities.iter().copied())
    }

    /// The sum of all probabilities.
    pub fn total(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Selects the most probable hypothesis.
    ///
    /// Probabilities within [`MASS_TOLERANCE`] of each other are tied. Ties are broken in favor of the lexically
    /// smallest label, so the choice does not depend on frame order.
    pub fn decision(&self) -> Choice {
        let mut best: Option<(&str, f64)> = None;
        for (label, probability) in self.iter() {
            let replace = match best {
                None => true,
                Some((best_label, best_probability)) => {
                    if (probability - best_probability).abs() <= MASS_TOLERANCE {
                        label < best_label
                    } else {
                        probability > best_probability
                    }
                }
            };
            if replace {
                best = Some((label, probability));
            }
        }
        // Frames always hold at least one hypothesis.
        let (hypothesis, probability) = best.unwrap_or(("", 0.0));
        Choice {
            hypothesis: hypothesis.to_string(),
            probability,
        }
    }

    /// Checks the probability of `hypothesis` against a threshold value. `true` if at or above the threshold.
    ///
    /// Returns [`ThresholdError::ThresholdOutOfRange`] if the threshold is not between 0.0 and 1.0. Hypotheses
    /// outside the frame are never accepted.
    ///
    /// # Arguments
    ///
    /// * `hypothesis` - The label of the hypothesis to check.
    /// * `threshold` - The minimum probability required to accept the hypothesis.
    pub fn accepted(&self, hypothesis: &str, threshold: f64) -> Result<bool, ThresholdError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ThresholdError::ThresholdOutOfRange(threshold));
        }
        Ok(self
            .probability(hypothesis)
            .map_or(false, |p| p >= threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{combine, FocalSet};

    fn obstacles() -> Arc<Frame> {
        Arc::new(Frame::new(["Pedestrian", "Cyclist", "Vehicle", "Animal"]).unwrap())
    }

    macro_rules! test_pignistic {
        ($name:ident, [$(($($focal:expr),+) = $mass:expr),+] $(, $label:literal = $val:expr)*) => {
            #[test]
            fn $name() -> Result<(), Box<dyn std::error::Error>> {
                let m = MassFunction::from_labels(
                    obstacles(),
                    [$((vec![$($focal),+], $mass)),+],
                )?;
                let p = m.pignistic();
                $(assert_relative_eq!(p.probability($label).unwrap(), $val, epsilon = 1e-12);)*
                assert_relative_eq!(p.total(), 1.0, epsilon = 1e-12);
                Ok(())
            }
        }
    }

    test_pignistic!(
        pignistic_camera,
        [
            ("Pedestrian") = 0.65,
            ("Cyclist") = 0.15,
            ("Pedestrian", "Cyclist") = 0.20
        ],
        "Pedestrian" = 0.75,
        "Cyclist" = 0.25,
        "Vehicle" = 0.0,
        "Animal" = 0.0
    );

    test_pignistic!(
        pignistic_lidar,
        [
            ("Pedestrian") = 0.50,
            ("Vehicle") = 0.10,
            ("Pedestrian", "Cyclist") = 0.30,
            ("Pedestrian", "Cyclist", "Vehicle", "Animal") = 0.10
        ],
        "Pedestrian" = 0.675,
        "Cyclist" = 0.175,
        "Vehicle" = 0.125,
        "Animal" = 0.025
    );

    test_pignistic!(
        pignistic_vacuous,
        [("Pedestrian", "Cyclist", "Vehicle", "Animal") = 1.0],
        "Pedestrian" = 0.25,
        "Cyclist" = 0.25,
        "Vehicle" = 0.25,
        "Animal" = 0.25
    );

    #[test]
    fn pignistic_of_fused_evidence() -> Result<(), Box<dyn std::error::Error>> {
        let frame = obstacles();
        let camera = MassFunction::from_labels(
            frame.clone(),
            [
                (vec!["Pedestrian"], 0.65),
                (vec!["Cyclist"], 0.15),
                (vec!["Pedestrian", "Cyclist"], 0.20),
            ],
        )?;
        let lidar = MassFunction::from_labels(
            frame.clone(),
            [
                (vec!["Pedestrian"], 0.50),
                (vec!["Vehicle"], 0.10),
                (vec!["Pedestrian", "Cyclist"], 0.30),
                (vec!["Pedestrian", "Cyclist", "Vehicle", "Animal"], 0.10),
            ],
        )?;
        let p = combine(&camera, &lidar)?.mass.pignistic();
        assert_relative_eq!(p.total(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            p.probability("Pedestrian").unwrap(),
            (0.685 + 0.04) / 0.825,
            epsilon = 1e-12
        );

        let choice = p.decision();
        assert_eq!(choice.hypothesis, "Pedestrian");
        assert!(choice.probability > 0.5);
        assert!(p.accepted("Pedestrian", 0.8)?);
        assert!(!p.accepted("Cyclist", 0.5)?);
        assert!(!p.accepted("Truck", 0.0)?);
        assert_eq!(
            p.accepted("Pedestrian", 1.5),
            Err(ThresholdError::ThresholdOutOfRange(1.5))
        );
        Ok(())
    }

    #[test]
    fn decision_ties_use_lexical_order() -> Result<(), Box<dyn std::error::Error>> {
        let frame = obstacles();
        let vacuous = MassFunction::vacuous(frame.clone()).pignistic();
        assert_eq!(
            vacuous.decision(),
            Choice {
                hypothesis: "Animal".to_string(),
                probability: 0.25
            }
        );

        let split = MassFunction::new(
            frame.clone(),
            [(frame.subset(["Vehicle", "Cyclist"])?, 1.0)],
        )?
        .pignistic();
        assert_eq!(split.decision().hypothesis, "Cyclist");
        Ok(())
    }

    #[test]
    fn decision_ties_absorb_rounding() -> Result<(), Box<dyn std::error::Error>> {
        for labels in [["A", "B", "C", "D"], ["D", "C", "B", "A"]] {
            let frame = Arc::new(Frame::new(labels)?);
            let p = MassFunction::from_labels(
                frame,
                [
                    (vec!["B"], 0.1),
                    (vec!["B", "C"], 0.4),
                    (vec!["A"], 0.3),
                    (vec!["D"], 0.2),
                ],
            )?
            .pignistic();
            assert_relative_eq!(p.probability("A").unwrap(), 0.3);
            assert_relative_eq!(p.probability("B").unwrap(), 0.3, epsilon = 1e-12);
            assert_eq!(p.decision().hypothesis, "A");
        }
        Ok(())
    }

    #[test]
    fn iter_follows_frame_order() {
        let frame = obstacles();
        let m = MassFunction::new(frame.clone(), [(FocalSet::singleton(2), 1.0)]).unwrap();
        let p = m.pignistic();
        let pairs: Vec<(&str, f64)> = p.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("Pedestrian", 0.0),
                ("Cyclist", 0.0),
                ("Vehicle", 1.0),
                ("Animal", 0.0)
            ]
        );
        assert_eq!(p.probability("Truck"), None);
    }
}
