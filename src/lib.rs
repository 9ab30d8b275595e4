// Docseal — Library root
//
// Content-addressed document signing: digest, sign, protect at rest, and
// verify later presentations of the same bytes.

pub mod cli;
pub mod config;
pub mod digest;
pub mod error;
pub mod guard;
pub mod keys;
pub mod notary;
pub mod signer;
pub mod store;

#[cfg(test)]
mod test_support;

pub use digest::{digest, Digest};
pub use error::{DocsealError, Result};
pub use notary::{Notary, SignOutcome};
