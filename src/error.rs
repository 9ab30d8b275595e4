// Docseal — Top-level error types
//
// Aggregates the module errors into one enum for the application boundary.
// Content-level outcomes (valid, invalid, already signed) are return values
// and never show up here.

use thiserror::Error;

/// Top-level error type for all Docseal operations.
#[derive(Debug, Error)]
pub enum DocsealError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Key error: {0}")]
    Key(#[from] crate::keys::KeyError),

    #[error("Signer error: {0}")]
    Signer(#[from] crate::signer::SignerError),

    #[error("Guard error: {0}")]
    Guard(#[from] crate::guard::GuardError),

    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),

    #[error("Invalid digest: {0}")]
    Digest(#[from] crate::digest::DigestError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, DocsealError>;
