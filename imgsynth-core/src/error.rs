//! Error types for imgsynth

use thiserror::Error;

/// Main error type for imgsynth operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load asset '{identifier}': {reason}")]
    AssetLoad { identifier: String, reason: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Unknown scene node: {0}")]
    UnknownNode(usize),

    #[error("Image encoding error: {0}")]
    ImageEncode(String),
}

impl Error {
    /// Shorthand for an asset load failure
    pub fn asset_load(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::AssetLoad {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for imgsynth operations
pub type Result<T> = std::result::Result<T, Error>;
