// Docseal — Shared test fixtures
//
// Keys under testdata/ were generated with OpenSSL for tests only. The
// reference blobs were produced with `openssl dgst` and `openssl enc`.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::guard::SymmetricGuard;
use crate::keys::{KeyDerivation, KeyMaterial};
use crate::signer::RsaDigestSigner;

pub const SECRET: &str = "correct horse battery staple";

pub const PRIVATE_PEM: &str = include_str!("../testdata/private.key");
pub const PUBLIC_PEM: &str = include_str!("../testdata/public.key");
pub const PRIVATE_PKCS1_PEM: &str = include_str!("../testdata/private_pkcs1.key");
pub const PUBLIC_PKCS1_PEM: &str = include_str!("../testdata/public_pkcs1.key");
pub const OTHER_PRIVATE_PEM: &str = include_str!("../testdata/other_private.key");
pub const OTHER_PUBLIC_PEM: &str = include_str!("../testdata/other_public.key");

/// base64 RSA signature of the hex digest of `b"hello"` under `private.key`.
pub const HELLO_SIGNATURE_B64: &str = include_str!("../testdata/hello.sig");

/// `HELLO_SIGNATURE_B64` encrypted under the legacy-derived key with the fixed IV.
pub const HELLO_SIGNATURE_FIXED_BLOB: &str = "Y29ycmVjdCBob3JzZSBiYe4VNNiB2Yg8U5I0DMoAs9lU8byS8s1axbt+jtmunI02oV0kH1PGMCOT4VuBeCUGaSZKOTqYvQ7Q++8XBJMfdfrtFr4F0K9BQ1+0GuOsYesiXZ8Jr4+QveCx5AypoVv8IrCmxHmW3XnRgzoHRLpXyGzXNK5UhkJnvSHjvkzgVn7eUNqjXTXb7m1CDPdUgEcUz72os4kSD3E4kFEzlNm7eF/1C/b4yuFd7U+CPSAL4KNbRM7V9i8Xml9g3EWf64cGQDVVMn+XbYZD3MJfD0jtP75XdZY+r2dAyBpcwt/qMBJjMLisLa5UVBn+cUb7FoBD5M0t4Ub/nwutDizLX5tFHw5wt1lVQzTKFu41Xyknd5kJfhZ+91IItWxXMTm9cINtryQodcceh8+MpdFVSdt6izKoa+PBEqDIDiqKjpYuy/J6heL6H1A5GJsDdxq4jxLlntlOME6ku2J/XdjNSEJjrq8=";

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata").join(name)
}

/// Signer over the fixture key pair, parsed once per test binary.
pub fn signer() -> Arc<RsaDigestSigner> {
    static SIGNER: OnceLock<Arc<RsaDigestSigner>> = OnceLock::new();
    SIGNER
        .get_or_init(|| {
            Arc::new(RsaDigestSigner::from_pem(PRIVATE_PEM, PUBLIC_PEM).expect("fixture keys"))
        })
        .clone()
}

pub fn guard_with_secret(secret: &str) -> Arc<SymmetricGuard> {
    let material = KeyDerivation::Legacy
        .derive(secret.as_bytes())
        .expect("non-empty secret");
    Arc::new(SymmetricGuard::new(material))
}

/// Fixture signer plus a guard derived from [`SECRET`].
pub fn key_material() -> KeyMaterial {
    KeyMaterial::new(signer(), guard_with_secret(SECRET))
}
