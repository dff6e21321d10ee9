use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Malformed caller input. Always surfaced to the caller, never recovered.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An operation that needs at least one series ran without any.
    #[error("invalid chart configuration: {0}")]
    Config(String),

    #[error("no rendered instance for chart `{0}`")]
    InstanceNotFound(String),

    #[error("json serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
