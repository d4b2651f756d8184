use crate::FocalSet;

/// Returned when a [`Frame`](crate::Frame) cannot be built or a hypothesis label cannot be resolved against one.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame of discernment must contain at least one hypothesis")]
    Empty,
    #[error("hypothesis labels must not be empty")]
    EmptyLabel,
    #[error("duplicate hypothesis: '{0}'")]
    DuplicateHypothesis(String),
    #[error("frame of discernment has {0} hypotheses, more than the supported maximum")]
    TooLarge(usize),
    #[error("unknown hypothesis: '{0}'")]
    UnknownHypothesis(String),
}

/// Returned when building, combining or fusing mass functions fails.
///
/// Every variant is a recoverable condition. None of them are retried since the computation is deterministic.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FusionError {
    #[error("invalid mass function: {0}")]
    InvalidMassFunction(String),
    #[error("mass functions are defined over different frames of discernment")]
    FrameMismatch,
    #[error("total conflict between sources (conflict = {conflict})")]
    TotalConflict {
        /// The conflict mass of the failed step, approximately 1.0.
        conflict: f64,
        /// The pre-normalization accumulator, kept for diagnostics.
        unnormalized: Vec<(FocalSet, f64)>,
    },
    #[error("step {step} combining '{left}' with source '{source_name}' failed: {error}")]
    Step {
        step: usize,
        /// The sources already folded into the left operand, empty if the step has none.
        left: String,
        source_name: String,
        error: Box<FusionError>,
    },
    #[error(transparent)]
    Frame(#[from] FrameError),
}

impl FusionError {
    /// Returns the error that caused a [`FusionError::Step`] failure, or `self` for any other variant.
    pub fn root(&self) -> &FusionError {
        match self {
            FusionError::Step { error, .. } => error.root(),
            other => other,
        }
    }
}

/// Returned when uncertainty or decision thresholds are invalid.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ThresholdError {
    #[error("invalid threshold order: low must not exceed high")]
    ThresholdOutOfOrder,
    #[error("threshold out of range [0.0, 1.0]: {0}")]
    ThresholdOutOfRange(f64),
}
