// Docseal — Key material error types

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Failed to read key file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {kind} key: {reason}")]
    Malformed { kind: &'static str, reason: String },

    #[error("Public key does not belong to the private key")]
    Mismatch,

    #[error("Shared secret not set — export DOCSEAL_SECRET before starting")]
    SecretMissing,

    #[error("Key derivation error: {0}")]
    Derivation(String),

    #[error("Unknown key derivation '{0}' (expected legacy or argon2id)")]
    UnknownDerivation(String),
}
