// Docseal — Asymmetric Signer Module
//
// RSA PKCS#1 v1.5 / SHA-256 signatures over a content digest. The signed
// message is the UTF-8 text of the hex digest, which keeps signatures
// interchangeable with every record written so far.

mod pkcs1;

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use thiserror::Error;

use crate::digest::Digest;

pub use pkcs1::RsaDigestSigner;

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("Signing failed: {0}")]
    Signing(String),
}

/// Raw signature bytes as produced by the signer.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(Vec<u8>);

impl Signature {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Decode a standard, padded base64 signature.
    pub fn from_base64(s: &str) -> Result<Self, base64::DecodeError> {
        BASE64.decode(s.trim()).map(Self)
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({} bytes)", self.0.len())
    }
}

/// Signs and verifies digests. Implementations are shared across threads.
pub trait DigestSigner: Send + Sync {
    fn sign(&self, digest: &Digest) -> Result<Signature, SignerError>;

    /// `false` on any mismatch, malformed signature or foreign key. Never errors.
    fn verify(&self, digest: &Digest, signature: &Signature) -> bool;
}
