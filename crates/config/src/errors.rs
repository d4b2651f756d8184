/// This error will be returned if an attempt to load an evidence file fails.
#[derive(thiserror::Error, Debug)]
pub enum ConfigFileError {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error("file not found: '{0}'")]
    NotFound(std::path::PathBuf),
    #[error(transparent)]
    Deserialization(#[from] toml::de::Error),
    #[error(transparent)]
    Validations(#[from] validator::ValidationErrors),
    #[error("missing parent: '{0}'")]
    MissingParent(String),
    #[error("invalid circular include: '{0}'")]
    CircularInclude(String),
    #[error("duplicate named source: '{0}'")]
    Duplicate(String),
    #[error("missing frame of discernment")]
    MissingFrame,
    #[error("included frame of discernment differs from the including file: '{0}'")]
    FrameMismatch(String),
    #[error("invalid combination rule: '{0}'")]
    InvalidRule(String),
}

/// This error will be returned if a loaded configuration cannot be converted into fusion inputs.
#[derive(thiserror::Error, Debug)]
pub enum ConversionError {
    #[error(transparent)]
    Frame(#[from] dsfusion_decision::FrameError),
    #[error("invalid source '{source_name}': {error}")]
    Source {
        source_name: String,
        error: dsfusion_decision::FusionError,
    },
    #[error(transparent)]
    Threshold(#[from] dsfusion_decision::ThresholdError),
}
