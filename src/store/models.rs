// Docseal — Signature record models
//
// A record is written once by a successful sign and never updated. The IV
// policy travels with the record so that decryption does not depend on
// whatever the process default happens to be later.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::digest::Digest;
use crate::guard::IvPolicy;

/// A persisted signature, keyed by content digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRecord {
    pub id: Uuid,
    pub digest: Digest,
    /// base64(IV ‖ AES-256-CBC ciphertext) of the base64 RSA signature.
    pub encrypted_signature: String,
    pub iv_policy: IvPolicy,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a record.
#[derive(Debug, Clone)]
pub struct NewSignatureRecord {
    pub digest: Digest,
    pub encrypted_signature: String,
    pub iv_policy: IvPolicy,
}

/// Result of an insert that must never overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// A record for the digest already existed; nothing was written.
    AlreadyExists,
}

impl InsertOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
