//! Error types for the job normalizer.
//!
//! Library crates use [`JobNormError`] via `thiserror`.
//! App crates (cli/server) wrap this with `color-eyre` for rich diagnostics.

/// Top-level error type for all jobnorm operations.
#[derive(Debug, thiserror::Error)]
pub enum JobNormError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error talking to an external service.
    #[error("network error: {0}")]
    Network(String),

    /// Generative extraction service error (API failure, bad response shape).
    #[error("extraction error: {0}")]
    Llm(String),

    /// Company-directory lookup error.
    #[error("directory error: {0}")]
    Directory(String),

    /// JSON encode/decode error on a wire payload.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Data validation error (malformed input record, bad field shape).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, JobNormError>;

impl JobNormError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create an extraction-service error from any displayable message.
    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    /// Create a directory-lookup error from any displayable message.
    pub fn directory(msg: impl Into<String>) -> Self {
        Self::Directory(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = JobNormError::config("missing API key");
        assert_eq!(err.to_string(), "config error: missing API key");

        let err = JobNormError::llm("model timed out");
        assert_eq!(err.to_string(), "extraction error: model timed out");
    }
}
