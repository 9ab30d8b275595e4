// Docseal — Signing and Verification Workflows
//
// sign:   bytes → digest → lookup → (absent) sign → encrypt → insert_if_absent
// verify: bytes → digest → lookup → decrypt → verify
//
// The lookup before signing is only a shortcut. Two callers can both miss it
// for the same new content; the store's unique index then lets exactly one
// insert through and the other is reported as already signed.

mod outcome;

use std::sync::Arc;

use crate::digest::Digest;
use crate::error::Result;
use crate::guard::{IvPolicy, SymmetricGuard};
use crate::keys::KeyMaterial;
use crate::signer::{DigestSigner, Signature};
use crate::store::{InsertOutcome, NewSignatureRecord, SignatureRecord, SignatureStore};

pub use outcome::SignOutcome;

/// Signs and verifies documents against a signature store.
pub struct Notary<S> {
    signer: Arc<dyn DigestSigner>,
    guard: Arc<SymmetricGuard>,
    store: S,
    iv_policy: IvPolicy,
}

impl<S: SignatureStore> Notary<S> {
    pub fn new(keys: &KeyMaterial, store: S) -> Self {
        Self {
            signer: Arc::clone(keys.signer()),
            guard: Arc::clone(keys.guard()),
            store,
            iv_policy: IvPolicy::default(),
        }
    }

    /// IV policy for records created from now on. Existing records keep
    /// the policy they were written with.
    pub fn with_iv_policy(mut self, iv_policy: IvPolicy) -> Self {
        if iv_policy == IvPolicy::FixedDerived {
            tracing::warn!("Fixed IV policy selected: equal signatures produce equal ciphertexts");
        }
        self.iv_policy = iv_policy;
        self
    }

    pub fn iv_policy(&self) -> IvPolicy {
        self.iv_policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ─── Signing ─────────────────────────────────────────────────────────────

    pub fn sign_file(&self, bytes: &[u8]) -> Result<SignOutcome> {
        self.sign_digest(Digest::of(bytes))
    }

    /// Sign content identified by an already computed digest.
    pub fn sign_digest(&self, digest: Digest) -> Result<SignOutcome> {
        if let Some(record) = self.store.find_by_digest(&digest)? {
            tracing::debug!(digest = %digest, "Content already signed");
            let signature = self.recover_signature(&record);
            return Ok(SignOutcome::already_signed(digest, signature));
        }

        let signature = self.signer.sign(&digest)?.to_base64();
        let encrypted_signature = self.guard.encrypt(&signature, self.iv_policy);

        let outcome = self.store.insert_if_absent(NewSignatureRecord {
            digest: digest.clone(),
            encrypted_signature,
            iv_policy: self.iv_policy,
        })?;

        match outcome {
            InsertOutcome::Inserted => {
                tracing::info!(digest = %digest, "Document signed");
                Ok(SignOutcome::signed(digest, signature))
            }
            InsertOutcome::AlreadyExists => {
                // A concurrent signer stored the same digest first. Its
                // record signs the same message, so ours is discarded.
                tracing::info!(digest = %digest, "Concurrent sign detected, keeping existing record");
                Ok(SignOutcome::already_signed(digest, Some(signature)))
            }
        }
    }

    // ─── Verification ────────────────────────────────────────────────────────

    /// `true` only if these exact bytes were signed before and the stored
    /// signature still checks out. Unsigned and tampered content both yield
    /// `false`.
    pub fn verify_file(&self, bytes: &[u8]) -> Result<bool> {
        self.verify_digest(&Digest::of(bytes))
    }

    pub fn verify_digest(&self, digest: &Digest) -> Result<bool> {
        let Some(record) = self.store.find_by_digest(digest)? else {
            tracing::debug!(digest = %digest, "No signature record");
            return Ok(false);
        };

        let Some(signature) = self.recover_signature(&record) else {
            return Ok(false);
        };

        let signature = match Signature::from_base64(&signature) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(digest = %digest, error = %e, "Stored signature is not base64");
                return Ok(false);
            }
        };

        let valid = self.signer.verify(digest, &signature);
        if !valid {
            tracing::warn!(digest = %digest, "Stored signature failed verification");
        }
        Ok(valid)
    }

    /// Stateless check of a caller-supplied signature and digest. The
    /// digest is recomputed from `bytes` first; a mismatch is rejected
    /// without touching the asymmetric verifier.
    pub fn verify_detached(&self, bytes: &[u8], signature_b64: &str, digest_hex: &str) -> bool {
        verify_detached(self.signer.as_ref(), bytes, signature_b64, digest_hex)
    }

    fn recover_signature(&self, record: &SignatureRecord) -> Option<String> {
        match self.guard.decrypt(&record.encrypted_signature, record.iv_policy) {
            Ok(signature) => Some(signature),
            Err(e) => {
                tracing::warn!(
                    digest = %record.digest,
                    iv_policy = %record.iv_policy,
                    error = %e,
                    "Stored signature could not be decrypted"
                );
                None
            }
        }
    }
}

/// Verify a detached signature without consulting any store. The supplied
/// digest must equal the computed lowercase hex exactly.
pub fn verify_detached(
    signer: &dyn DigestSigner,
    bytes: &[u8],
    signature_b64: &str,
    digest_hex: &str,
) -> bool {
    let computed = Digest::of(bytes);
    if computed.as_str() != digest_hex {
        tracing::debug!(computed = %computed, "Supplied digest does not match content");
        return false;
    }

    match Signature::from_base64(signature_b64) {
        Ok(signature) => signer.verify(&computed, &signature),
        Err(_) => false,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
