// Docseal — RSA PKCS#1 v1.5 signer
//
// Loads the long-lived key pair from PEM. Private keys may be PKCS#8 or
// PKCS#1; public keys may be SPKI or PKCS#1. A public key that does not
// belong to the private key is refused at load time.

use std::fmt;
use std::path::Path;

use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs1v15::{self, SigningKey, VerifyingKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use super::{DigestSigner, Signature, SignerError};
use crate::digest::Digest;
use crate::keys::KeyError;

pub struct RsaDigestSigner {
    signing_key: SigningKey<Sha256>,
    verifying_key: VerifyingKey<Sha256>,
}

impl RsaDigestSigner {
    /// Build a signer from PEM text.
    pub fn from_pem(private_pem: &str, public_pem: &str) -> Result<Self, KeyError> {
        let private = parse_private(private_pem)?;
        let public = parse_public(public_pem)?;

        if RsaPublicKey::from(&private) != public {
            return Err(KeyError::Mismatch);
        }

        Ok(Self {
            signing_key: SigningKey::<Sha256>::new(private),
            verifying_key: VerifyingKey::<Sha256>::new(public),
        })
    }

    /// Read both PEM files and build a signer.
    pub fn from_files(private_path: &Path, public_path: &Path) -> Result<Self, KeyError> {
        let private_pem = read_pem(private_path)?;
        let public_pem = read_pem(public_path)?;
        let signer = Self::from_pem(&private_pem, &public_pem)?;

        tracing::debug!(
            private_key = %private_path.display(),
            public_key = %public_path.display(),
            "RSA key pair loaded"
        );

        Ok(signer)
    }
}

impl DigestSigner for RsaDigestSigner {
    fn sign(&self, digest: &Digest) -> Result<Signature, SignerError> {
        let signature = self
            .signing_key
            .try_sign(digest.signing_bytes())
            .map_err(|e| SignerError::Signing(e.to_string()))?;
        Ok(Signature::from_bytes(signature.to_vec()))
    }

    fn verify(&self, digest: &Digest, signature: &Signature) -> bool {
        let Ok(signature) = pkcs1v15::Signature::try_from(signature.as_bytes()) else {
            return false;
        };
        self.verifying_key
            .verify(digest.signing_bytes(), &signature)
            .is_ok()
    }
}

impl fmt::Debug for RsaDigestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaDigestSigner")
            .field("signing_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

// ─── PEM helpers ─────────────────────────────────────────────────────────────

fn read_pem(path: &Path) -> Result<String, KeyError> {
    std::fs::read_to_string(path).map_err(|source| KeyError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_private(pem: &str) -> Result<RsaPrivateKey, KeyError> {
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|pkcs8_err| {
            RsaPrivateKey::from_pkcs1_pem(pem).map_err(|_| pkcs8_err.to_string())
        })
        .map_err(|reason| KeyError::Malformed {
            kind: "private",
            reason,
        })
}

fn parse_public(pem: &str) -> Result<RsaPublicKey, KeyError> {
    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|spki_err| RsaPublicKey::from_pkcs1_pem(pem).map_err(|_| spki_err.to_string()))
        .map_err(|reason| KeyError::Malformed {
            kind: "public",
            reason,
        })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
