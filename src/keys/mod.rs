// Docseal — Key Material Module
//
// Process-wide key state: the RSA key pair read from PEM files and the
// symmetric key/IV derived from the shared secret. Built once at startup
// and shared by `Arc`; nothing here is mutated after construction.

mod derivation;
mod error;
mod material;

pub use derivation::{KeyDerivation, SymmetricMaterial, IV_LEN, KEY_LEN};
pub use error::KeyError;
pub use material::KeyMaterial;
