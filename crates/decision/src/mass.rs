use crate::{FocalSet, Frame, FusionError, MASS_TOLERANCE};
use std::{collections::BTreeMap, fmt, sync::Arc};

/// A [Dempster-Shafer](https://en.wikipedia.org/wiki/Dempster%E2%80%93Shafer_theory) mass function: one
/// source's evidence, expressed as a sparse weighting over subsets of a [`Frame`] of discernment.
///
/// Every focal element carries positive mass and the masses sum to 1.0 within [`MASS_TOLERANCE`]. The empty
/// set never carries mass; it only accumulates conflict while two mass functions are being combined.
///
/// Mass functions are immutable values. Combination, discounting and transforms always produce a new value.
#[derive(Debug, Clone)]
pub struct MassFunction {
    frame: Arc<Frame>,
    masses: BTreeMap<FocalSet, f64>,
}

impl MassFunction {
    /// Creates a new mass function from `(focal element, mass)` pairs.
    ///
    /// Repeated focal elements are accumulated and zero masses are dropped. Returns
    /// [`FusionError::InvalidMassFunction`] if any mass is negative or not finite, if the empty set or a subset
    /// outside the frame appears as a focal element, or if the masses do not sum to 1.0.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame of discernment the focal elements were built from.
    /// * `entries` - The focal elements and their masses.
    pub fn new<I>(frame: Arc<Frame>, entries: I) -> Result<Self, FusionError>
    where
        I: IntoIterator<Item = (FocalSet, f64)>,
    {
        let theta = frame.theta();
        let mut masses: BTreeMap<FocalSet, f64> = BTreeMap::new();
        for (set, mass) in entries {
            if !mass.is_finite() {
                return Err(FusionError::InvalidMassFunction(format!(
                    "mass for {} is not finite",
                    frame.display(&set)
                )));
            }
            if mass < 0.0 {
                return Err(FusionError::InvalidMassFunction(format!(
                    "negative mass {} for {}",
                    mass,
                    frame.display(&set)
                )));
            }
            if set.is_empty() {
                return Err(FusionError::InvalidMassFunction(
                    "the empty set cannot be a focal element".to_string(),
                ));
            }
            if !set.is_subset_of(&theta) {
                return Err(FusionError::InvalidMassFunction(format!(
                    "focal element {:#x} lies outside the frame of discernment",
                    set.bits()
                )));
            }
            *masses.entry(set).or_insert(0.0) += mass;
        }
        masses.retain(|_, mass| *mass > 0.0);

        let sum: f64 = masses.values().sum();
        if (sum - 1.0).abs() > MASS_TOLERANCE {
            return Err(FusionError::InvalidMassFunction(format!(
                "masses sum to {}, expected 1.0",
                sum
            )));
        }

        Ok(Self { frame, masses })
    }

    /// Creates a new mass function from hypothesis labels rather than [`FocalSet`]s.
    ///
    /// Unknown labels are reported as [`FusionError::Frame`]. See [`MassFunction::new`] for the remaining
    /// validation rules.
    pub fn from_labels<I, L, S>(frame: Arc<Frame>, entries: I) -> Result<Self, FusionError>
    where
        I: IntoIterator<Item = (L, f64)>,
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(labels, mass)| -> Result<(FocalSet, f64), FusionError> {
                Ok((frame.subset(labels)?, mass))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(frame, entries)
    }

    /// The vacuous mass function: all mass on Θ, representing total ignorance.
    ///
    /// It is the neutral element of Dempster's rule.
    pub fn vacuous(frame: Arc<Frame>) -> Self {
        let theta = frame.theta();
        Self::from_parts(frame, BTreeMap::from([(theta, 1.0)]))
    }

    /// A categorical mass function placing all mass on `set`.
    pub fn categorical(frame: Arc<Frame>, set: FocalSet) -> Result<Self, FusionError> {
        Self::new(frame, [(set, 1.0)])
    }

    /// Builds a mass function from masses already known to be valid, such as the output of a combination.
    pub(crate) fn from_parts(frame: Arc<Frame>, mut masses: BTreeMap<FocalSet, f64>) -> Self {
        masses.retain(|_, mass| *mass > 0.0);
        Self { frame, masses }
    }

    /// The frame of discernment this mass function is defined over.
    pub fn frame(&self) -> &Arc<Frame> {
        &self.frame
    }

    /// `true` if both mass functions are defined over the same frame of discernment.
    pub fn same_frame(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.frame, &other.frame) || self.frame == other.frame
    }

    /// The mass assigned to `set`, or 0.0 if it is not a focal element.
    pub fn mass(&self, set: &FocalSet) -> f64 {
        self.masses.get(set).copied().unwrap_or(0.0)
    }

    /// The number of focal elements.
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// The sum of all masses. 1.0 within tolerance for any valid mass function.
    pub fn total(&self) -> f64 {
        self.masses.values().sum()
    }

    /// `true` if all mass sits on Θ.
    pub fn is_vacuous(&self) -> bool {
        self.masses.len() == 1 && (self.mass(&self.frame.theta()) - 1.0).abs() <= MASS_TOLERANCE
    }

    /// Iterates over `(focal element, mass)` pairs in bitset order.
    pub fn iter(&self) -> impl Iterator<Item = (&FocalSet, &f64)> {
        self.masses.iter()
    }

    /// Returns every `(focal element, mass)` pair in descending mass order.
    ///
    /// Ties are broken by comparing the lexically sorted labels of each focal element, so the output is
    /// deterministic regardless of frame order.
    pub fn focal_elements(&self) -> Vec<(FocalSet, f64)> {
        let mut elements: Vec<(FocalSet, f64)> =
            self.masses.iter().map(|(set, mass)| (*set, *mass)).collect();
        elements.sort_by(|a, b| {
            b.1.total_cmp(&a.1).then_with(|| {
                self.frame
                    .sorted_labels_of(&a.0)
                    .cmp(&self.frame.sorted_labels_of(&b.0))
            })
        });
        elements
    }

    /// Discounts the mass function by a source reliability factor.
    ///
    /// Every mass is multiplied by `reliability` and the remainder is transferred to Θ. A reliability of 1.0
    /// leaves the mass function unchanged while a reliability of 0.0 produces the vacuous mass function.
    ///
    /// # Arguments
    ///
    /// * `reliability` - How much the source should be trusted, between 0.0 and 1.0.
    pub fn discount(&self, reliability: f64) -> Result<Self, FusionError> {
        if !(0.0..=1.0).contains(&reliability) {
            return Err(FusionError::InvalidMassFunction(format!(
                "reliability must be between 0.0 and 1.0, got {}",
                reliability
            )));
        }
        let theta = self.frame.theta();
        let mut masses: BTreeMap<FocalSet, f64> = self
            .masses
            .iter()
            .map(|(set, mass)| (*set, mass * reliability))
            .collect();
        *masses.entry(theta).or_insert(0.0) += 1.0 - reliability;
        Ok(Self::from_parts(self.frame.clone(), masses))
    }
}

impl fmt::Display for MassFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .focal_elements()
            .iter()
            .map(|(set, mass)| format!("{}: {:.4}", self.frame.display(set), mass))
            .collect();
        write!(f, "[{}]", parts.join(", "))
    }
}
