// Docseal — Digest Engine
//
// SHA-256 over the exact input bytes, rendered as 64 lowercase hex characters.
// The digest is the content address of every signature record, so it must be
// computed on the raw buffer and never on a re-encoded text form of it.

use std::fmt;
use std::io::{self, Read};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest as _, Sha256};
use thiserror::Error;

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

const READ_CHUNK: usize = 64 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DigestError {
    #[error("Digest must be 64 hex characters, got {0}")]
    InvalidLength(usize),

    #[error("Digest contains non-hex characters")]
    InvalidHex,
}

/// Hex-encoded SHA-256 of a byte sequence. Always lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest(String);

impl Digest {
    /// Hash a byte buffer.
    pub fn of(bytes: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(bytes)))
    }

    /// Parse an externally supplied hex digest, normalizing it to lowercase.
    pub fn parse(s: &str) -> Result<Self, DigestError> {
        if s.len() != DIGEST_HEX_LEN {
            return Err(DigestError::InvalidLength(s.len()));
        }
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DigestError::InvalidHex);
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The bytes that get signed: the UTF-8 encoding of the hex string,
    /// not the 32 raw hash bytes.
    pub fn signing_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// Hash a byte buffer. Equivalent to [`Digest::of`].
pub fn digest(bytes: &[u8]) -> Digest {
    Digest::of(bytes)
}

/// Hash everything a reader yields without buffering it whole.
pub fn digest_reader<R: Read>(mut reader: R) -> io::Result<Digest> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; READ_CHUNK];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(Digest(hex::encode(hasher.finalize())))
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Digest {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Digest::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
