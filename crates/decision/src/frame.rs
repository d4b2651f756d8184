use crate::FrameError;
use std::collections::HashMap;

/// The maximum number of hypotheses a [`Frame`] can hold, one bit of a [`FocalSet`] each.
pub const MAX_HYPOTHESES: usize = u128::BITS as usize;

/// A subset of a [`Frame`] of discernment, stored as a bitset where bit `i` is the `i`-th hypothesis.
///
/// Representing subsets as integers turns set equality, intersection and the subset test into single
/// machine operations, independent of how many labels the frame has or the order they were listed in.
/// A `FocalSet` carries no reference to its frame; it is only meaningful alongside the [`Frame`] it was built from.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Default)]
pub struct FocalSet(u128);

impl FocalSet {
    /// The empty set. Never a valid focal element, but a valid query hypothesis.
    pub const EMPTY: FocalSet = FocalSet(0);

    /// Creates a `FocalSet` from its raw bit representation.
    pub fn from_bits(bits: u128) -> Self {
        Self(bits)
    }

    /// Returns the raw bit representation.
    pub fn bits(&self) -> u128 {
        self.0
    }

    /// A set containing only the hypothesis at `index`.
    ///
    /// # Arguments
    ///
    /// * `index` - The position of the hypothesis within its frame. Must be below [`MAX_HYPOTHESES`].
    pub(crate) fn singleton(index: usize) -> Self {
        debug_assert!(index < MAX_HYPOTHESES);
        Self(1u128 << index)
    }

    pub fn intersection(&self, other: &Self) -> Self {
        Self(self.0 & other.0)
    }

    pub fn union(&self, other: &Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// The number of hypotheses in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// `true` if every member of `self` is also a member of `other`.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// `true` if the two sets share at least one hypothesis.
    pub fn intersects(&self, other: &Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn contains(&self, index: usize) -> bool {
        index < MAX_HYPOTHESES && self.0 & (1u128 << index) != 0
    }

    /// Iterates over the indices of the member hypotheses in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let index = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            Some(index)
        })
    }
}

/// An ordered set of mutually exclusive hypotheses, fixed for the lifetime of a fusion session.
///
/// Mass functions built over a frame reference it through an `Arc` and never modify it.
#[derive(Debug, Clone)]
pub struct Frame {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels
    }
}

impl Eq for Frame {}

impl Frame {
    /// Creates a new frame of discernment from an ordered list of hypothesis labels.
    ///
    /// Returns [`FrameError`] if the list is empty, contains an empty or duplicate label, or has more than
    /// [`MAX_HYPOTHESES`] labels.
    pub fn new<I, S>(labels: I) -> Result<Self, FrameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(FrameError::Empty);
        }
        if labels.len() > MAX_HYPOTHESES {
            return Err(FrameError::TooLarge(labels.len()));
        }
        let mut index = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if label.is_empty() {
                return Err(FrameError::EmptyLabel);
            }
            if index.insert(label.clone(), i).is_some() {
                return Err(FrameError::DuplicateHypothesis(label.clone()));
            }
        }
        Ok(Self { labels, index })
    }

    /// The hypothesis labels in frame order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false`, a frame cannot be constructed without hypotheses.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The position of `label` within the frame, if present.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// The universal subset Θ, representing total ignorance.
    pub fn theta(&self) -> FocalSet {
        if self.labels.len() == MAX_HYPOTHESES {
            FocalSet(u128::MAX)
        } else {
            FocalSet((1u128 << self.labels.len()) - 1)
        }
    }

    /// Builds the subset containing the single hypothesis `label`.
    pub fn singleton(&self, label: &str) -> Result<FocalSet, FrameError> {
        self.position(label)
            .map(FocalSet::singleton)
            .ok_or_else(|| FrameError::UnknownHypothesis(label.to_string()))
    }

    /// Builds the subset containing every hypothesis in `labels`.
    ///
    /// Order and repetition within `labels` do not matter. An empty list produces the empty set.
    pub fn subset<I, S>(&self, labels: I) -> Result<FocalSet, FrameError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = FocalSet::EMPTY;
        for label in labels {
            set = set.union(&self.singleton(label.as_ref())?);
        }
        Ok(set)
    }

    /// Returns the labels of the members of `set` in frame order.
    pub fn labels_of(&self, set: &FocalSet) -> Vec<&str> {
        set.indices()
            .filter_map(|i| self.labels.get(i).map(String::as_str))
            .collect()
    }

    /// Returns the labels of the members of `set` in lexical order.
    ///
    /// This is the canonical form used to break ties and to display subsets deterministically.
    pub fn sorted_labels_of(&self, set: &FocalSet) -> Vec<&str> {
        let mut labels = self.labels_of(set);
        labels.sort_unstable();
        labels
    }

    /// Formats `set` as `{a, b, c}` using lexically sorted labels.
    pub fn display(&self, set: &FocalSet) -> String {
        format!("{{{}}}", self.sorted_labels_of(set).join(", "))
    }
}
