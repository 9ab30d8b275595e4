// Docseal — Signing outcome

use serde::Serialize;

use crate::digest::Digest;

const MSG_SIGNED: &str = "Document signed successfully";
const MSG_ALREADY_SIGNED: &str = "Document was already signed";

/// What a sign request produced. Re-signing identical content is not an
/// error; it reports `already_signed` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOutcome {
    pub already_signed: bool,
    #[serde(rename = "hash")]
    pub digest: Digest,
    /// base64 RSA signature, usable for detached verification. `None` when
    /// an existing record could not be decrypted with the current secret.
    pub signature: Option<String>,
    pub message: String,
}

impl SignOutcome {
    pub(crate) fn signed(digest: Digest, signature: String) -> Self {
        Self {
            already_signed: false,
            digest,
            signature: Some(signature),
            message: MSG_SIGNED.to_string(),
        }
    }

    pub(crate) fn already_signed(digest: Digest, signature: Option<String>) -> Self {
        Self {
            already_signed: true,
            digest,
            signature,
            message: MSG_ALREADY_SIGNED.to_string(),
        }
    }
}
