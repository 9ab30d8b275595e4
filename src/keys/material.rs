// Docseal — Process-wide key material
//
// Startup flow:
//   1. Read and cross-check the PEM key pair.
//   2. Derive the symmetric key and fixed IV from the shared secret.
//   3. Hand both out by `Arc` to every workflow instance.
// Any failure here aborts startup; there is no degraded mode.

use std::sync::Arc;

use super::KeyError;
use crate::config::Settings;
use crate::guard::SymmetricGuard;
use crate::signer::{DigestSigner, RsaDigestSigner};

/// Immutable signing and at-rest keys shared by all workflows.
#[derive(Clone)]
pub struct KeyMaterial {
    signer: Arc<dyn DigestSigner>,
    guard: Arc<SymmetricGuard>,
}

impl KeyMaterial {
    pub fn new(signer: Arc<dyn DigestSigner>, guard: Arc<SymmetricGuard>) -> Self {
        Self { signer, guard }
    }

    /// Load the key pair and derive the symmetric material from settings.
    pub fn load(settings: &Settings) -> Result<Self, KeyError> {
        let signer =
            RsaDigestSigner::from_files(&settings.private_key_path, &settings.public_key_path)?;
        let material = settings.key_derivation.derive(settings.secret().as_bytes())?;

        tracing::info!(
            derivation = %settings.key_derivation,
            "Key material loaded"
        );

        Ok(Self::new(
            Arc::new(signer),
            Arc::new(SymmetricGuard::new(material)),
        ))
    }

    pub fn signer(&self) -> &Arc<dyn DigestSigner> {
        &self.signer
    }

    pub fn guard(&self) -> &Arc<SymmetricGuard> {
        &self.guard
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
