// Docseal — Symmetric key derivation
//
// Turns the shared secret into the AES-256 key and the fixed CBC IV.
//
//   Legacy   — the secret bytes repeated cyclically to 32 (key) and 16 (IV)
//              bytes. Not a KDF; kept so records written by earlier
//              deployments remain decryptable.
//   Argon2id — 48 bytes of Argon2id output split into key ‖ IV.

use std::fmt;
use std::str::FromStr;

use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::KeyError;

// ─── Constants ───────────────────────────────────────────────────────────────

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// AES block / CBC IV length in bytes.
pub const IV_LEN: usize = 16;

/// Label hashed into the Argon2id salt. Changing it orphans every record
/// written under the Argon2id derivation.
const SALT_LABEL: &[u8] = b"docseal::symmetric-guard";

// m=65536 (64 MiB), t=3, p=4
const ARGON2_M_COST: u32 = 65536;
const ARGON2_T_COST: u32 = 3;
const ARGON2_P_COST: u32 = 4;

// ─── Derived material ────────────────────────────────────────────────────────

/// The AES key and the process-wide fixed IV. Zeroized on drop.
pub struct SymmetricMaterial {
    key: Zeroizing<[u8; KEY_LEN]>,
    iv: Zeroizing<[u8; IV_LEN]>,
}

impl SymmetricMaterial {
    pub fn new(key: [u8; KEY_LEN], iv: [u8; IV_LEN]) -> Self {
        Self {
            key: Zeroizing::new(key),
            iv: Zeroizing::new(iv),
        }
    }

    pub fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    pub fn fixed_iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }
}

impl fmt::Debug for SymmetricMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricMaterial")
            .field("key", &"[REDACTED]")
            .field("iv", &"[REDACTED]")
            .finish()
    }
}

// ─── Derivation scheme ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyDerivation {
    #[default]
    Legacy,
    Argon2id,
}

impl KeyDerivation {
    pub fn derive(&self, secret: &[u8]) -> Result<SymmetricMaterial, KeyError> {
        if secret.is_empty() {
            return Err(KeyError::SecretMissing);
        }

        match self {
            KeyDerivation::Legacy => {
                let mut key = [0u8; KEY_LEN];
                let mut iv = [0u8; IV_LEN];
                stretch(secret, &mut key);
                stretch(secret, &mut iv);
                Ok(SymmetricMaterial::new(key, iv))
            }
            KeyDerivation::Argon2id => {
                let okm = argon2id(secret)?;
                let mut key = [0u8; KEY_LEN];
                let mut iv = [0u8; IV_LEN];
                key.copy_from_slice(&okm[..KEY_LEN]);
                iv.copy_from_slice(&okm[KEY_LEN..]);
                Ok(SymmetricMaterial::new(key, iv))
            }
        }
    }
}

impl fmt::Display for KeyDerivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyDerivation::Legacy => f.write_str("legacy"),
            KeyDerivation::Argon2id => f.write_str("argon2id"),
        }
    }
}

impl FromStr for KeyDerivation {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(KeyDerivation::Legacy),
            "argon2id" | "argon2" => Ok(KeyDerivation::Argon2id),
            other => Err(KeyError::UnknownDerivation(other.to_string())),
        }
    }
}

/// Fill `out` with `secret` repeated from the start, truncating the last copy.
fn stretch(secret: &[u8], out: &mut [u8]) {
    for (dst, src) in out.iter_mut().zip(secret.iter().cycle()) {
        *dst = *src;
    }
}

fn argon2id(secret: &[u8]) -> Result<Zeroizing<Vec<u8>>, KeyError> {
    let salt = Sha256::digest(SALT_LABEL);

    let params = Params::new(
        ARGON2_M_COST,
        ARGON2_T_COST,
        ARGON2_P_COST,
        Some(KEY_LEN + IV_LEN),
    )
    .map_err(|e| KeyError::Derivation(format!("invalid Argon2 params: {}", e)))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut okm = Zeroizing::new(vec![0u8; KEY_LEN + IV_LEN]);
    argon2
        .hash_password_into(secret, &salt, &mut okm)
        .map_err(|e| KeyError::Derivation(format!("Argon2id hash failed: {}", e)))?;

    Ok(okm)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_repeats_short_secret() {
        let material = KeyDerivation::Legacy
            .derive(b"correct horse battery staple")
            .unwrap();
        assert_eq!(
            hex::encode(material.key()),
            "636f727265637420686f727365206261747465727920737461706c65636f7272"
        );
        assert_eq!(
            hex::encode(material.fixed_iv()),
            "636f727265637420686f727365206261"
        );
    }

    #[test]
    fn test_legacy_truncates_long_secret() {
        let secret: Vec<u8> = (0..100u8).collect();
        let material = KeyDerivation::Legacy.derive(&secret).unwrap();
        assert_eq!(material.key().as_slice(), &secret[..KEY_LEN]);
        assert_eq!(material.fixed_iv().as_slice(), &secret[..IV_LEN]);
    }

    #[test]
    fn test_legacy_single_byte_secret() {
        let material = KeyDerivation::Legacy.derive(b"x").unwrap();
        assert!(material.key().iter().all(|b| *b == b'x'));
        assert!(material.fixed_iv().iter().all(|b| *b == b'x'));
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        for scheme in [KeyDerivation::Legacy, KeyDerivation::Argon2id] {
            let err = scheme.derive(b"").unwrap_err();
            assert!(matches!(err, KeyError::SecretMissing));
        }
    }

    #[test]
    fn test_argon2id_is_deterministic_and_differs_from_legacy() {
        let secret = b"correct horse battery staple";
        let a = KeyDerivation::Argon2id.derive(secret).unwrap();
        let b = KeyDerivation::Argon2id.derive(secret).unwrap();
        let legacy = KeyDerivation::Legacy.derive(secret).unwrap();

        assert_eq!(a.key(), b.key());
        assert_eq!(a.fixed_iv(), b.fixed_iv());
        assert_ne!(a.key(), legacy.key());
    }

    #[test]
    fn test_debug_redacts_material() {
        let material = KeyDerivation::Legacy.derive(b"hunter2").unwrap();
        let debug = format!("{:?}", material);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_parse_scheme_names() {
        assert_eq!("legacy".parse::<KeyDerivation>().unwrap(), KeyDerivation::Legacy);
        assert_eq!("Argon2id".parse::<KeyDerivation>().unwrap(), KeyDerivation::Argon2id);

        let err = "pbkdf2".parse::<KeyDerivation>().unwrap_err();
        assert!(matches!(err, KeyError::UnknownDerivation(ref name) if name == "pbkdf2"));
        assert!(err.to_string().contains("pbkdf2"));
    }
}
