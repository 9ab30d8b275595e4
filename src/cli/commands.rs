// Docseal — CLI Command Handlers
//
// Each function handles one subcommand and returns the envelope to print.
// Settings and key material are loaded per invocation; a failure there is
// fatal and surfaces as an error envelope.

use std::fs::File;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::json;

use crate::config::Settings;
use crate::digest::{digest_reader, Digest};
use crate::error::{DocsealError, Result};
use crate::keys::KeyMaterial;
use crate::notary::{self, Notary};
use crate::store::{Database, SqliteSignatureStore};

use super::{Commands, Envelope};

/// Execute a command with settings read from the environment.
pub fn execute(command: Commands) -> Result<Envelope> {
    let settings = Settings::from_env()?;
    execute_with(command, &settings)
}

/// Execute a command with explicit settings.
pub fn execute_with(command: Commands, settings: &Settings) -> Result<Envelope> {
    match command {
        Commands::Sign { file, base64 } => cmd_sign(settings, &file, base64),
        Commands::Verify {
            file,
            base64,
            signature: Some(signature),
            hash: Some(hash),
        } => cmd_verify_detached(settings, &file, base64, &signature, &hash),
        Commands::Verify { file, base64, .. } => cmd_verify(settings, &file, base64),
        Commands::Digest { file, base64 } => cmd_digest(&file, base64),
    }
}

// ─── Sign ────────────────────────────────────────────────────────────────────

fn cmd_sign(settings: &Settings, file: &Path, base64: bool) -> Result<Envelope> {
    let digest = load_digest(file, base64)?;

    let keys = KeyMaterial::load(settings)?;
    let db = Database::open(&settings.database_path)?;
    let notary = Notary::new(&keys, SqliteSignatureStore::new(&db)).with_iv_policy(settings.iv_policy);

    let outcome = notary.sign_digest(digest)?;
    Envelope::success(201, outcome)
}

// ─── Verify ──────────────────────────────────────────────────────────────────

fn cmd_verify(settings: &Settings, file: &Path, base64: bool) -> Result<Envelope> {
    let digest = load_digest(file, base64)?;

    let keys = KeyMaterial::load(settings)?;
    let db = Database::open(&settings.database_path)?;
    let notary = Notary::new(&keys, SqliteSignatureStore::new(&db));

    let valid = notary.verify_digest(&digest)?;
    Envelope::success(200, json!({ "valid": valid }))
}

fn cmd_verify_detached(
    settings: &Settings,
    file: &Path,
    base64: bool,
    signature: &str,
    hash: &str,
) -> Result<Envelope> {
    let bytes = read_payload(file, base64)?;
    let keys = KeyMaterial::load(settings)?;

    let valid = notary::verify_detached(keys.signer().as_ref(), &bytes, signature, hash);
    Envelope::success(200, json!({ "valid": valid }))
}

// ─── Digest ──────────────────────────────────────────────────────────────────

fn cmd_digest(file: &Path, base64: bool) -> Result<Envelope> {
    let digest = load_digest(file, base64)?;
    Envelope::success(200, json!({ "hash": digest }))
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Read the document bytes, decoding base64 text if asked to.
fn read_payload(file: &Path, base64: bool) -> Result<Vec<u8>> {
    let raw = std::fs::read(file)?;
    if !base64 {
        return Ok(raw);
    }

    let text: Vec<u8> = raw.into_iter().filter(|b| !b.is_ascii_whitespace()).collect();
    BASE64
        .decode(text)
        .map_err(|e| DocsealError::Other(format!("Payload is not valid base64: {}", e)))
}

/// Digest the document, streaming it when no decoding is needed.
fn load_digest(file: &Path, base64: bool) -> Result<Digest> {
    if base64 {
        return Ok(Digest::of(&read_payload(file, base64)?));
    }
    Ok(digest_reader(File::open(file)?)?)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ENV_DATABASE_URL, ENV_PRIVATE_KEY, ENV_PUBLIC_KEY, ENV_SECRET};
    use crate::test_support::{fixture_path, HELLO_SIGNATURE_B64, SECRET};
    use std::path::PathBuf;

    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    fn settings(db_path: &Path) -> Settings {
        let vars = [
            (ENV_SECRET, SECRET.to_string()),
            (ENV_PRIVATE_KEY, fixture_path("private.key").display().to_string()),
            (ENV_PUBLIC_KEY, fixture_path("public.key").display().to_string()),
            (ENV_DATABASE_URL, db_path.display().to_string()),
        ];
        Settings::from_lookup(|name| {
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.clone())
        })
        .unwrap()
    }

    fn write(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_sign_verify_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&dir.path().join("db").join("docseal.db"));
        let doc = write(dir.path(), "hello.txt", b"hello");
        let forged = write(dir.path(), "hellx.txt", b"hellx");

        let signed = execute_with(Commands::Sign { file: doc.clone(), base64: false }, &settings).unwrap();
        assert_eq!(signed.status, 201);
        assert_eq!(signed.data["alreadySigned"], false);
        assert_eq!(signed.data["hash"], HELLO_SHA256);
        assert_eq!(signed.data["signature"], HELLO_SIGNATURE_B64.trim());

        let again = execute_with(Commands::Sign { file: doc.clone(), base64: false }, &settings).unwrap();
        assert_eq!(again.status, 201);
        assert_eq!(again.data["alreadySigned"], true);
        assert_eq!(again.data["hash"], HELLO_SHA256);

        let verify = |file: PathBuf| {
            execute_with(
                Commands::Verify { file, base64: false, signature: None, hash: None },
                &settings,
            )
            .unwrap()
        };
        let valid = verify(doc);
        assert_eq!(valid.status, 200);
        assert_eq!(valid.data, json!({ "valid": true }));
        assert_eq!(verify(forged).data, json!({ "valid": false }));
    }

    #[test]
    fn test_detached_verify_command() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&dir.path().join("docseal.db"));
        let doc = write(dir.path(), "hello.txt", b"hello");

        let env = execute_with(
            Commands::Verify {
                file: doc.clone(),
                base64: false,
                signature: Some(HELLO_SIGNATURE_B64.trim().to_string()),
                hash: Some(HELLO_SHA256.to_string()),
            },
            &settings,
        )
        .unwrap();
        assert_eq!(env.data["valid"], true);

        let env = execute_with(
            Commands::Verify {
                file: doc,
                base64: false,
                signature: Some(HELLO_SIGNATURE_B64.trim().to_string()),
                hash: Some("0".repeat(64)),
            },
            &settings,
        )
        .unwrap();
        assert_eq!(env.data["valid"], false);
    }

    #[test]
    fn test_base64_payload_hashes_decoded_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let encoded = write(dir.path(), "hello.b64", b"aGVs\nbG8=\n");

        let env = cmd_digest(&encoded, true).unwrap();
        assert_eq!(env.data["hash"], HELLO_SHA256);

        let plain = cmd_digest(&encoded, false).unwrap();
        assert_ne!(plain.data["hash"], HELLO_SHA256);
    }

    #[test]
    fn test_bad_base64_payload_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let garbage = write(dir.path(), "bad.b64", b"@@@@");

        let err = cmd_digest(&garbage, true).unwrap_err();
        assert!(matches!(err, DocsealError::Other(_)));
        assert_eq!(Envelope::error(&err).status, 400);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = cmd_digest(&dir.path().join("absent.pdf"), false).unwrap_err();
        assert!(matches!(err, DocsealError::Io(_)));
    }
}
