//! Error types for gddsmith.
//!
//! Provider failures are never retried: they propagate through the stage that
//! issued the call and abort the whole run.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for a pipeline run.
#[derive(Debug, Error)]
pub enum GddError {
    /// A text or image generation call failed.
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// Writing a run artifact failed.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        /// The file or directory being written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stage table entry cannot drive its stage.
    #[error("Invalid stage '{stage}': {reason}")]
    InvalidStage {
        /// Label of the offending stage.
        stage: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl GddError {
    /// Creates an invalid stage error.
    #[must_use]
    pub fn invalid_stage(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidStage {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Wraps an I/O error with the path it happened at.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised by the generation providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced a response (connect, TLS, timeout, body read).
    #[error("Provider transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Provider returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// The provider answered 2xx but the body lacked the expected fields.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// Creates an API error.
    #[must_use]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates a malformed response error.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse(reason.into())
    }
}

/// Errors raised while loading configuration at startup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more required keys are absent or empty.
    #[error("Missing required environment variables: {}", keys.join(", "))]
    Missing {
        /// The missing keys, in declaration order.
        keys: Vec<String>,
    },

    /// A key is present but its value cannot be used.
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        /// The offending key.
        key: String,
        /// The raw value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl ConfigError {
    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Invalid {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
