// Docseal — Symmetric guard error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("Encrypted blob is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Encrypted blob has invalid length ({0} bytes)")]
    InvalidLength(usize),

    #[error("Decryption failed — wrong key, wrong IV policy or corrupted blob")]
    Padding,

    #[error("Decrypted payload is not UTF-8")]
    NotUtf8,

    #[error("Unknown IV policy '{0}'")]
    UnknownPolicy(String),
}
