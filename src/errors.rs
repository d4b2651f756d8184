#[derive(thiserror::Error, Debug)]
pub enum CliArgumentError {
    #[error("invalid log format: {0}")]
    InvalidLogFormat(String),
    #[error("missing subcommand")]
    MissingSubcommand,
}

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Threshold(#[from] dsfusion_decision::ThresholdError),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}
