use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown page role: {0}")]
    UnknownPageRole(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Failures writing the cart to client storage.
///
/// The cart store logs these and carries on; they never reach the shopper.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
