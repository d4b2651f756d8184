use crate::{FocalSet, Frame, FusionError, MassFunction, MASS_TOLERANCE};
use std::{collections::BTreeMap, sync::Arc};
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

/// The rule used to aggregate several mass functions into one.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CombinationRule {
    /// Dempster's rule of combination. Conflict is discarded and the remaining mass is renormalized.
    ///
    /// Fails with [`FusionError::TotalConflict`] when the sources are completely disjoint.
    #[default]
    Dempster,
    /// Yager's rule. Conflict is reassigned to Θ as ignorance instead of being renormalized away.
    Yager,
    /// Murphy's averaging rule. Sources are averaged focal element by focal element, then the average is
    /// combined with itself once per source using Dempster's rule.
    Murphy,
}

/// The result of combining two mass functions.
#[derive(Debug, Clone)]
pub struct Combination {
    /// The fused mass function.
    pub mass: MassFunction,
    /// The mass assigned to empty intersections during this combination step.
    pub conflict: f64,
}

/// Performs the unnormalized conjunctive combination of two mass functions.
///
/// Returns the accumulated mass of every non-empty intersection along with the conflict mass of the
/// empty intersections. Checks that both operands share a frame before doing any work.
fn conjunctive(
    left: &MassFunction,
    right: &MassFunction,
) -> Result<(BTreeMap<FocalSet, f64>, f64), FusionError> {
    if !left.same_frame(right) {
        return Err(FusionError::FrameMismatch);
    }
    let mut masses: BTreeMap<FocalSet, f64> = BTreeMap::new();
    // The mass assigned to the null hypothesis due to non-intersection.
    let mut conflict = 0.0;
    for (b, mb) in left.iter() {
        for (c, mc) in right.iter() {
            let intersection = b.intersection(c);
            let product = mb * mc;
            if intersection.is_empty() {
                conflict += product;
            } else {
                *masses.entry(intersection).or_insert(0.0) += product;
            }
        }
    }
    Ok((masses, conflict))
}

/// Combines two mass functions with Dempster's rule of combination.
///
/// Every pair of focal elements contributes the product of their masses to their intersection. Products
/// landing on the empty set are summed into the conflict `K`, and the remaining masses are divided by `1 - K`.
///
/// Returns [`FusionError::FrameMismatch`] if the mass functions have different frames, or
/// [`FusionError::TotalConflict`] if `K` is within [`MASS_TOLERANCE`] of 1.0. The operator is commutative
/// and associative up to floating point rounding.
///
/// # Arguments
///
/// * `left` - The first mass function of the pair.
/// * `right` - The second mass function of the pair.
pub fn combine(left: &MassFunction, right: &MassFunction) -> Result<Combination, FusionError> {
    let (masses, conflict) = conjunctive(left, right)?;
    if conflict >= 1.0 - MASS_TOLERANCE {
        return Err(FusionError::TotalConflict {
            conflict,
            unnormalized: masses.into_iter().collect(),
        });
    }
    let normalizer = 1.0 - conflict;
    let masses = masses
        .into_iter()
        .map(|(set, mass)| (set, mass / normalizer))
        .collect();
    Ok(Combination {
        mass: MassFunction::from_parts(left.frame().clone(), masses),
        conflict,
    })
}

/// Combines two mass functions with Yager's rule.
///
/// Identical to [`combine`] except that conflict is transferred to Θ rather than normalized away, so
/// combination never fails because of conflict.
pub fn combine_yager(
    left: &MassFunction,
    right: &MassFunction,
) -> Result<Combination, FusionError> {
    let (mut masses, conflict) = conjunctive(left, right)?;
    if conflict > 0.0 {
        *masses.entry(left.frame().theta()).or_insert(0.0) += conflict;
    }
    Ok(Combination {
        mass: MassFunction::from_parts(left.frame().clone(), masses),
        conflict,
    })
}

/// Averages mass functions focal element by focal element.
///
/// Returns `None` when no mass functions are given.
pub fn average<'a, I>(masses: I) -> Result<Option<MassFunction>, FusionError>
where
    I: IntoIterator<Item = &'a MassFunction>,
{
    let mut frame: Option<&'a MassFunction> = None;
    let mut sums: BTreeMap<FocalSet, f64> = BTreeMap::new();
    let mut length: usize = 0;
    for m in masses {
        match frame {
            Some(first) if !first.same_frame(m) => return Err(FusionError::FrameMismatch),
            Some(_) => {}
            None => frame = Some(m),
        }
        for (set, mass) in m.iter() {
            *sums.entry(*set).or_insert(0.0) += mass;
        }
        length += 1;
    }
    Ok(frame.map(|first| {
        let averaged = sums
            .into_iter()
            .map(|(set, sum)| (set, sum / length as f64))
            .collect();
        MassFunction::from_parts(first.frame().clone(), averaged)
    }))
}

/// Combines a pair of mass functions with the given rule.
///
/// For [`CombinationRule::Murphy`] the pair is averaged and the average combined with itself; the reported
/// conflict is that of the self-combination.
pub fn combine_with(
    rule: CombinationRule,
    left: &MassFunction,
    right: &MassFunction,
) -> Result<Combination, FusionError> {
    match rule {
        CombinationRule::Dempster => combine(left, right),
        CombinationRule::Yager => combine_yager(left, right),
        CombinationRule::Murphy => match average([left, right])? {
            Some(avg) => combine(&avg, &avg),
            None => Ok(Combination {
                mass: MassFunction::vacuous(left.frame().clone()),
                conflict: 0.0,
            }),
        },
    }
}

/// A named source of evidence.
#[derive(Debug, Clone)]
pub struct Evidence {
    /// A human readable name for the source, used when reporting combination steps and failures.
    pub name: String,
    /// The source's evidence.
    pub mass: MassFunction,
}

impl Evidence {
    pub fn new<S: Into<String>>(name: S, mass: MassFunction) -> Self {
        Self {
            name: name.into(),
            mass,
        }
    }
}

/// A record of one pairwise combination performed while fusing several sources.
///
/// Conflict is local to its step. Conflicts of successive steps must not be summed.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinationStep {
    /// The label of the left operand, naming every source already folded into it.
    pub left: String,
    /// The label of the right operand.
    pub right: String,
    /// The conflict `K` of this step.
    pub conflict: f64,
}

/// The outcome of fusing a set of sources.
#[derive(Debug, Clone)]
pub struct Fused {
    /// The fused mass function.
    pub mass: MassFunction,
    /// Every pairwise combination in the order it was performed.
    pub steps: Vec<CombinationStep>,
}

impl Fused {
    /// The highest conflict of any single step, or 0.0 if no combination took place.
    pub fn max_conflict(&self) -> f64 {
        self.steps
            .iter()
            .map(|step| step.conflict)
            .fold(0.0, f64::max)
    }
}

/// Fuses any number of named sources over a shared frame of discernment.
///
/// Sources are combined as a left fold: the first source seeds the accumulator and each subsequent source is
/// combined into it, recording one [`CombinationStep`] per combination.
#[derive(Debug, Clone)]
pub struct Fusion {
    frame: Arc<Frame>,
    rule: CombinationRule,
}

impl Fusion {
    /// Creates a new `Fusion`.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame of discernment every source must be defined over.
    /// * `rule` - The rule used to aggregate the sources.
    pub fn new(frame: Arc<Frame>, rule: CombinationRule) -> Self {
        Self { frame, rule }
    }

    pub fn frame(&self) -> &Arc<Frame> {
        &self.frame
    }

    pub fn rule(&self) -> CombinationRule {
        self.rule
    }

    /// Fuses `sources`, returning the fused mass function and the conflict of every step.
    ///
    /// No sources produce the vacuous mass function and a single source is returned unchanged. Every source's
    /// frame is checked before any combination happens. A failure of any step is returned as
    /// [`FusionError::Step`], naming the source being combined.
    pub fn fuse<'a, I>(&self, sources: I) -> Result<Fused, FusionError>
    where
        I: IntoIterator<Item = &'a Evidence>,
    {
        let sources: Vec<&Evidence> = sources.into_iter().collect();
        for (step, source) in sources.iter().enumerate() {
            let frame = source.mass.frame();
            if !Arc::ptr_eq(frame, &self.frame) && **frame != *self.frame {
                return Err(FusionError::Step {
                    step,
                    left: sources[..step]
                        .iter()
                        .map(|s| s.name.as_str())
                        .collect::<Vec<_>>()
                        .join(" + "),
                    source_name: source.name.clone(),
                    error: Box::new(FusionError::FrameMismatch),
                });
            }
        }

        match self.rule {
            CombinationRule::Dempster => self.fold(&sources, combine),
            CombinationRule::Yager => self.fold(&sources, combine_yager),
            CombinationRule::Murphy => self.murphy(&sources),
        }
    }

    fn fold<F>(&self, sources: &[&Evidence], pairwise: F) -> Result<Fused, FusionError>
    where
        F: Fn(&MassFunction, &MassFunction) -> Result<Combination, FusionError>,
    {
        let Some((first, rest)) = sources.split_first() else {
            return Ok(Fused {
                mass: MassFunction::vacuous(self.frame.clone()),
                steps: vec![],
            });
        };

        let mut label = first.name.clone();
        let mut mass = first.mass.clone();
        let mut steps = Vec::with_capacity(rest.len());
        for (i, source) in rest.iter().enumerate() {
            let combination =
                pairwise(&mass, &source.mass).map_err(|error| FusionError::Step {
                    step: i + 1,
                    left: label.clone(),
                    source_name: source.name.clone(),
                    error: Box::new(error),
                })?;
            debug!(
                message = "combined evidence",
                rule = %self.rule,
                left = label.as_str(),
                right = source.name.as_str(),
                conflict = combination.conflict,
            );
            steps.push(CombinationStep {
                left: label.clone(),
                right: source.name.clone(),
                conflict: combination.conflict,
            });
            label = format!("{} + {}", label, source.name);
            mass = combination.mass;
        }
        Ok(Fused { mass, steps })
    }

    fn murphy(&self, sources: &[&Evidence]) -> Result<Fused, FusionError> {
        let Some(avg) = average(sources.iter().map(|source| &source.mass))? else {
            return Ok(Fused {
                mass: MassFunction::vacuous(self.frame.clone()),
                steps: vec![],
            });
        };

        let mut mass = avg.clone();
        let mut steps = Vec::with_capacity(sources.len().saturating_sub(1));
        for i in 1..sources.len() {
            let combination = combine(&mass, &avg).map_err(|error| FusionError::Step {
                step: i,
                left: format!("average^{}", i),
                source_name: sources[i].name.clone(),
                error: Box::new(error),
            })?;
            debug!(
                message = "combined averaged evidence",
                rule = %self.rule,
                iteration = i,
                conflict = combination.conflict,
            );
            steps.push(CombinationStep {
                left: format!("average^{}", i),
                right: "average".to_string(),
                conflict: combination.conflict,
            });
            mass = combination.mass;
        }
        Ok(Fused { mass, steps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn obstacles() -> Arc<Frame> {
        Arc::new(Frame::new(["Pedestrian", "Cyclist", "Vehicle", "Animal"]).unwrap())
    }

    fn mass(frame: &Arc<Frame>, entries: &[(Vec<&str>, f64)]) -> MassFunction {
        MassFunction::from_labels(frame.clone(), entries.iter().cloned()).unwrap()
    }

    fn camera(frame: &Arc<Frame>) -> MassFunction {
        mass(
            frame,
            &[
                (vec!["Pedestrian"], 0.65),
                (vec!["Cyclist"], 0.15),
                (vec!["Pedestrian", "Cyclist"], 0.20),
            ],
        )
    }

    fn lidar(frame: &Arc<Frame>) -> MassFunction {
        mass(
            frame,
            &[
                (vec!["Pedestrian"], 0.50),
                (vec!["Vehicle"], 0.10),
                (vec!["Pedestrian", "Cyclist"], 0.30),
                (vec!["Pedestrian", "Cyclist", "Vehicle", "Animal"], 0.10),
            ],
        )
    }

    fn radar(frame: &Arc<Frame>) -> MassFunction {
        mass(
            frame,
            &[
                (vec!["Pedestrian"], 0.60),
                (vec!["Cyclist"], 0.25),
                (vec!["Cyclist", "Vehicle"], 0.15),
            ],
        )
    }

    fn sensors(frame: &Arc<Frame>) -> Vec<Evidence> {
        vec![
            Evidence::new("camera", camera(frame)),
            Evidence::new("lidar", lidar(frame)),
            Evidence::new("radar", radar(frame)),
        ]
    }

    macro_rules! test_combination {
        ($name:ident, |$frame:ident| $comb:expr, conflict = $k:expr $(, [$($label:expr),+] = $val:expr)*) => {
            #[test]
            fn $name() -> Result<(), Box<dyn std::error::Error>> {
                let $frame = &obstacles();
                let combination: Combination = $comb?;
                assert_relative_eq!(combination.conflict, $k, epsilon = 1e-12);
                $(assert_relative_eq!(
                    combination.mass.mass(&$frame.subset([$($label),+])?),
                    $val,
                    epsilon = 1e-12
                );)*
                assert_relative_eq!(combination.mass.total(), 1.0, epsilon = 1e-12);
                Ok(())
            }
        }
    }

    test_combination!(
        combine_camera_lidar,
        |frame| combine(&camera(frame), &lidar(frame)),
        conflict = 0.175,
        ["Pedestrian"] = 0.685 / 0.825,
        ["Cyclist"] = 0.06 / 0.825,
        ["Pedestrian", "Cyclist"] = 0.08 / 0.825,
        ["Vehicle"] = 0.0
    );

    test_combination!(
        combine_is_commutative,
        |frame| combine(&lidar(frame), &camera(frame)),
        conflict = 0.175,
        ["Pedestrian"] = 0.685 / 0.825,
        ["Cyclist"] = 0.06 / 0.825,
        ["Pedestrian", "Cyclist"] = 0.08 / 0.825
    );

    test_combination!(
        combine_with_vacuous,
        |frame| combine(&radar(frame), &MassFunction::vacuous(frame.clone())),
        conflict = 0.0,
        ["Pedestrian"] = 0.60,
        ["Cyclist"] = 0.25,
        ["Cyclist", "Vehicle"] = 0.15
    );

    test_combination!(
        combine_vacuous_with_vacuous,
        |frame| combine(
            &MassFunction::vacuous(frame.clone()),
            &MassFunction::vacuous(frame.clone())
        ),
        conflict = 0.0,
        ["Pedestrian", "Cyclist", "Vehicle", "Animal"] = 1.0
    );

    test_combination!(
        combine_certainty,
        |frame| combine(
            &lidar(frame),
            &MassFunction::categorical(frame.clone(), frame.singleton("Pedestrian")?)?
        ),
        conflict = 0.10,
        ["Pedestrian"] = 1.0
    );

    test_combination!(
        combine_yager_camera_lidar,
        |frame| combine_yager(&camera(frame), &lidar(frame)),
        conflict = 0.175,
        ["Pedestrian"] = 0.685,
        ["Cyclist"] = 0.06,
        ["Pedestrian", "Cyclist"] = 0.08,
        ["Pedestrian", "Cyclist", "Vehicle", "Animal"] = 0.175
    );

    test_combination!(
        combine_with_murphy_pair,
        |frame| combine_with(
            CombinationRule::Murphy,
            &MassFunction::categorical(frame.clone(), frame.singleton("Pedestrian")?)?,
            &MassFunction::categorical(frame.clone(), frame.singleton("Vehicle")?)?
        ),
        conflict = 0.5,
        ["Pedestrian"] = 0.5,
        ["Vehicle"] = 0.5
    );

    #[test]
    fn combine_total_conflict() -> Result<(), Box<dyn std::error::Error>> {
        let frame = obstacles();
        let pedestrian = MassFunction::categorical(frame.clone(), frame.singleton("Pedestrian")?)?;
        let vehicle = MassFunction::categorical(frame.clone(), frame.singleton("Vehicle")?)?;
        match combine(&pedestrian, &vehicle) {
            Err(FusionError::TotalConflict {
                conflict,
                unnormalized,
            }) => {
                assert_relative_eq!(conflict, 1.0);
                assert!(unnormalized.is_empty());
            }
            other => panic!("expected total conflict, got {:?}", other),
        }

        // Yager's rule turns the same conflict into total ignorance.
        let yager = combine_yager(&pedestrian, &vehicle)?;
        assert_relative_eq!(yager.conflict, 1.0);
        assert!(yager.mass.is_vacuous());
        Ok(())
    }

    #[test]
    fn combine_frame_mismatch() {
        let frame = obstacles();
        let other = Arc::new(Frame::new(["Pedestrian", "Cyclist"]).unwrap());
        for rule in CombinationRule::iter() {
            let result = combine_with(
                rule,
                &MassFunction::vacuous(frame.clone()),
                &MassFunction::vacuous(other.clone()),
            );
            assert!(matches!(result, Err(FusionError::FrameMismatch)));
        }
    }

    #[test]
    fn combine_accepts_equal_frames() -> Result<(), Box<dyn std::error::Error>> {
        // Distinct allocations with identical labels are the same frame.
        let left = camera(&obstacles());
        let right = lidar(&obstacles());
        assert_relative_eq!(combine(&left, &right)?.conflict, 0.175, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn fuse_sensors_sequentially() -> Result<(), Box<dyn std::error::Error>> {
        let frame = obstacles();
        let sources = sensors(&frame);
        let fused = Fusion::new(frame.clone(), CombinationRule::Dempster).fuse(&sources)?;

        assert_eq!(fused.steps.len(), 2);
        assert_eq!(fused.steps[0].left, "camera");
        assert_eq!(fused.steps[0].right, "lidar");
        assert_relative_eq!(fused.steps[0].conflict, 0.175, epsilon = 1e-12);
        assert_eq!(fused.steps[1].left, "camera + lidar");
        assert_eq!(fused.steps[1].right, "radar");
        assert_relative_eq!(fused.steps[1].conflict, 0.31 / 0.825, epsilon = 1e-12);
        assert_relative_eq!(fused.max_conflict(), 0.31 / 0.825, epsilon = 1e-12);

        let p = frame.singleton("Pedestrian")?;
        let c = frame.singleton("Cyclist")?;
        assert_eq!(fused.mass.len(), 2);
        assert_relative_eq!(fused.mass.mass(&p), 0.459 / 0.515, epsilon = 1e-12);
        assert_relative_eq!(fused.mass.mass(&c), 0.056 / 0.515, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn fuse_order_does_not_matter() -> Result<(), Box<dyn std::error::Error>> {
        let frame = obstacles();
        let mut sources = sensors(&frame);
        let forward = Fusion::new(frame.clone(), CombinationRule::Dempster).fuse(&sources)?;
        sources.reverse();
        let backward = Fusion::new(frame.clone(), CombinationRule::Dempster).fuse(&sources)?;

        assert_eq!(forward.mass.len(), backward.mass.len());
        for (set, mass) in forward.mass.iter() {
            assert_relative_eq!(backward.mass.mass(set), *mass, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn fuse_with_yager() -> Result<(), Box<dyn std::error::Error>> {
        let frame = obstacles();
        let fused = Fusion::new(frame.clone(), CombinationRule::Yager).fuse(&sensors(&frame))?;

        assert_eq!(fused.steps.len(), 2);
        assert_relative_eq!(fused.steps[1].conflict, 0.31, epsilon = 1e-12);
        assert_relative_eq!(fused.mass.mass(&frame.singleton("Pedestrian")?), 0.564, epsilon = 1e-12);
        assert_relative_eq!(fused.mass.mass(&frame.singleton("Cyclist")?), 0.09975, epsilon = 1e-12);
        assert_relative_eq!(
            fused.mass.mass(&frame.subset(["Cyclist", "Vehicle"])?),
            0.02625,
            epsilon = 1e-12
        );
        assert_relative_eq!(fused.mass.mass(&frame.theta()), 0.31, epsilon = 1e-12);
        assert_relative_eq!(fused.mass.total(), 1.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn fuse_with_murphy() -> Result<(), Box<dyn std::error::Error>> {
        let frame = obstacles();
        let fused = Fusion::new(frame.clone(), CombinationRule::Murphy).fuse(&sensors(&frame))?;

        assert_eq!(fused.steps.len(), 2);
        assert_relative_eq!(fused.steps[0].conflict, 0.2727777777777778, epsilon = 1e-12);
        assert_relative_eq!(fused.steps[1].conflict, 0.2711993888464476, epsilon = 1e-12);
        assert_relative_eq!(
            fused.mass.mass(&frame.singleton("Pedestrian")?),
            0.891815164220824,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            fused.mass.mass(&frame.singleton("Cyclist")?),
            0.090164220824598,
            epsilon = 1e-12
        );
        assert_relative_eq!(fused.mass.total(), 1.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn fuse_murphy_survives_total_conflict() -> Result<(), Box<dyn std::error::Error>> {
        let frame = obstacles();
        let sources = [
            Evidence::new(
                "a",
                MassFunction::categorical(frame.clone(), frame.singleton("Pedestrian")?)?,
            ),
            Evidence::new(
                "b",
                MassFunction::categorical(frame.clone(), frame.singleton("Vehicle")?)?,
            ),
        ];
        let fused = Fusion::new(frame.clone(), CombinationRule::Murphy).fuse(&sources)?;
        assert_relative_eq!(fused.mass.mass(&frame.singleton("Pedestrian")?), 0.5);
        assert_relative_eq!(fused.mass.mass(&frame.singleton("Vehicle")?), 0.5);

        let result = Fusion::new(frame.clone(), CombinationRule::Dempster).fuse(&sources);
        match result {
            Err(FusionError::Step {
                step,
                left,
                source_name,
                error,
            }) => {
                assert_eq!(step, 1);
                assert_eq!(left, "a");
                assert_eq!(source_name, "b");
                assert!(matches!(*error, FusionError::TotalConflict { .. }));
            }
            other => panic!("expected a failed step, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn fuse_step_names_both_operands() -> Result<(), Box<dyn std::error::Error>> {
        let frame = obstacles();
        let pedestrian = frame.singleton("Pedestrian")?;
        let sources = [
            Evidence::new("a", MassFunction::categorical(frame.clone(), pedestrian)?),
            Evidence::new("b", MassFunction::categorical(frame.clone(), pedestrian)?),
            Evidence::new(
                "c",
                MassFunction::categorical(frame.clone(), frame.singleton("Vehicle")?)?,
            ),
        ];
        let error = Fusion::new(frame, CombinationRule::Dempster)
            .fuse(&sources)
            .err()
            .ok_or("fusion should fail")?;
        assert_eq!(
            error.to_string(),
            "step 2 combining 'a + b' with source 'c' failed: total conflict between sources (conflict = 1)"
        );
        assert!(matches!(error.root(), FusionError::TotalConflict { .. }));
        Ok(())
    }

    #[test]
    fn fuse_empty_and_single() -> Result<(), Box<dyn std::error::Error>> {
        let frame = obstacles();
        for rule in CombinationRule::iter() {
            let fusion = Fusion::new(frame.clone(), rule);
            let empty = fusion.fuse(&Vec::<Evidence>::new())?;
            assert!(empty.mass.is_vacuous());
            assert!(empty.steps.is_empty());
            assert_relative_eq!(empty.max_conflict(), 0.0);

            let single = fusion.fuse(&[Evidence::new("radar", radar(&frame))])?;
            assert!(single.steps.is_empty());
            assert_relative_eq!(single.mass.mass(&frame.singleton("Cyclist")?), 0.25);
        }
        Ok(())
    }

    #[test]
    fn fuse_checks_frames_first() {
        let frame = obstacles();
        let other = Arc::new(Frame::new(["Pedestrian", "Cyclist"]).unwrap());
        let sources = [
            Evidence::new("camera", camera(&frame)),
            Evidence::new("stranger", MassFunction::vacuous(other)),
        ];
        let result = Fusion::new(frame, CombinationRule::Yager).fuse(&sources);
        match result {
            Err(FusionError::Step {
                step,
                left,
                source_name,
                ..
            }) => {
                assert_eq!(step, 1);
                assert_eq!(left, "camera");
                assert_eq!(source_name, "stranger");
            }
            other => panic!("expected a frame mismatch, got {:?}", other),
        }
    }

    #[test]
    fn rule_names() {
        assert_eq!(CombinationRule::from_str("dempster"), Ok(CombinationRule::Dempster));
        assert_eq!(CombinationRule::from_str("Yager"), Ok(CombinationRule::Yager));
        assert_eq!(CombinationRule::Murphy.to_string(), "murphy");
        assert!(CombinationRule::from_str("average").is_err());
        assert_eq!(CombinationRule::default(), CombinationRule::Dempster);
    }
}
