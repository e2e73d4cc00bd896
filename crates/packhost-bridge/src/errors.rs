use packhost_config::ConfigError;
use thiserror::Error;

/// Errors raised while preparing values for the native boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// The value has a shape the call site cannot accept. Always a caller bug.
    #[error("Invalid input: expected {expected}, got {received}")]
    InvalidInputKind {
        expected: &'static str,
        received: &'static str,
    },

    /// JSON encoding or decoding failed; carries the parser message.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// A known-unsupported feature was requested.
    #[error("{0}")]
    NotSupported(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::MalformedPayload(err.to_string())
    }
}
