// Docseal — Symmetric Guard Module
//
// At-rest protection for stored signatures: AES-256-CBC with PKCS#7 padding.
// Every blob is base64(IV ‖ ciphertext), whichever IV policy produced it.
//
//   Random       — a fresh IV per encryption, read back from the blob.
//   FixedDerived — the single IV derived from the shared secret; any IV
//                  embedded in the blob is ignored on decryption. Equal
//                  plaintexts encrypt to equal blobs, so this policy exists
//                  only to read and reproduce legacy records.

mod error;

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::keys::{SymmetricMaterial, IV_LEN};

pub use error::GuardError;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

const BLOCK_LEN: usize = 16;

/// How the CBC initialization vector is chosen. Stored with every record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IvPolicy {
    #[default]
    Random,
    #[serde(rename = "fixed")]
    FixedDerived,
}

impl IvPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            IvPolicy::Random => "random",
            IvPolicy::FixedDerived => "fixed",
        }
    }
}

impl fmt::Display for IvPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IvPolicy {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(IvPolicy::Random),
            "fixed" | "fixed-derived" => Ok(IvPolicy::FixedDerived),
            other => Err(GuardError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Encrypts and decrypts signature blobs with the process-wide symmetric key.
#[derive(Debug)]
pub struct SymmetricGuard {
    material: SymmetricMaterial,
}

impl SymmetricGuard {
    pub fn new(material: SymmetricMaterial) -> Self {
        Self { material }
    }

    pub fn encrypt(&self, plaintext: &str, policy: IvPolicy) -> String {
        let iv = match policy {
            IvPolicy::Random => {
                let mut iv = [0u8; IV_LEN];
                rand::rng().fill_bytes(&mut iv);
                iv
            }
            IvPolicy::FixedDerived => *self.material.fixed_iv(),
        };

        let ciphertext = Aes256CbcEnc::new(self.material.key().into(), (&iv).into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        let mut blob = Vec::with_capacity(IV_LEN + ciphertext.len());
        blob.extend_from_slice(&iv);
        blob.extend_from_slice(&ciphertext);
        BASE64.encode(blob)
    }

    pub fn decrypt(&self, blob: &str, policy: IvPolicy) -> Result<String, GuardError> {
        let raw = BASE64.decode(blob.trim())?;
        if raw.len() < IV_LEN + BLOCK_LEN || (raw.len() - IV_LEN) % BLOCK_LEN != 0 {
            return Err(GuardError::InvalidLength(raw.len()));
        }

        let (embedded_iv, ciphertext) = raw.split_at(IV_LEN);
        let mut iv = [0u8; IV_LEN];
        match policy {
            IvPolicy::Random => iv.copy_from_slice(embedded_iv),
            IvPolicy::FixedDerived => iv.copy_from_slice(self.material.fixed_iv()),
        }

        let plaintext = Aes256CbcDec::new(self.material.key().into(), (&iv).into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| GuardError::Padding)?;

        String::from_utf8(plaintext).map_err(|_| GuardError::NotUtf8)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
