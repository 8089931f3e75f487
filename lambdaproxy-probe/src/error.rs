//! Error types for the probe CLI.

use lambdaproxy::{DecodeError, EncodeError};

/// Errors that can occur while running a probe command.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// Reading an input or writing the output failed.
    #[error("I/O error on {target}: {source}")]
    Io {
        /// File path, `<stdin>` or `<stdout>`.
        target: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::config::ProbeConfig`].
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A request file or generated output is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Envelope encoding failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Envelope decoding failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A `-H` argument is not of the form `Name: value`.
    #[error("invalid header {0:?}, expected `Name: value`")]
    InvalidHeader(String),
}

impl ProbeError {
    /// Wraps an I/O error with the name of what was being accessed.
    pub fn io(target: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            target: target.into(),
            source,
        }
    }
}
