// Docseal — Store error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Corrupt signature record for digest {digest}: {reason}")]
    Corrupt { digest: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
