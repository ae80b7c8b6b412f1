use thiserror::Error;

/// Failures of the external reasoner, as surfaced by the scheduler
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExternalError {
    #[error("External request quota exceeded")]
    QuotaExceeded,

    #[error("Transient upstream failure: {0}")]
    TransientFailure(String),

    #[error("External call failed: {0}")]
    OtherFailure(String),
}

impl ExternalError {
    /// Only transient failures are worth retrying
    pub fn is_retryable(&self) -> bool {
        matches!(self, ExternalError::TransientFailure(_))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
