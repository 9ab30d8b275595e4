// Docseal — Runtime configuration
//
// Everything the engine needs at startup comes from the environment:
//
//   DOCSEAL_SECRET        shared secret for the symmetric guard (required)
//   DOCSEAL_KEYS_DIR      directory holding private.key / public.key (default: ./keys)
//   DOCSEAL_PRIVATE_KEY   explicit private key path (overrides the directory)
//   DOCSEAL_PUBLIC_KEY    explicit public key path (overrides the directory)
//   DATABASE_URL          SQLite path, optionally prefixed with `file:` or `sqlite://`
//   DOCSEAL_IV_POLICY     `random` (default) or `fixed`
//   DOCSEAL_KDF           `legacy` (default) or `argon2id`

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use zeroize::Zeroizing;

use crate::guard::IvPolicy;
use crate::keys::KeyDerivation;

pub const ENV_SECRET: &str = "DOCSEAL_SECRET";
pub const ENV_KEYS_DIR: &str = "DOCSEAL_KEYS_DIR";
pub const ENV_PRIVATE_KEY: &str = "DOCSEAL_PRIVATE_KEY";
pub const ENV_PUBLIC_KEY: &str = "DOCSEAL_PUBLIC_KEY";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_IV_POLICY: &str = "DOCSEAL_IV_POLICY";
pub const ENV_KDF: &str = "DOCSEAL_KDF";

const DEFAULT_KEYS_DIR: &str = "keys";
const PRIVATE_KEY_FILE: &str = "private.key";
const PUBLIC_KEY_FILE: &str = "public.key";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Process-wide settings, read once at startup.
pub struct Settings {
    secret: Zeroizing<String>,
    pub private_key_path: PathBuf,
    pub public_key_path: PathBuf,
    pub database_path: PathBuf,
    pub iv_policy: IvPolicy,
    pub key_derivation: KeyDerivation,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let secret = get(ENV_SECRET)
            .map(Zeroizing::new)
            .ok_or(ConfigError::Missing(ENV_SECRET))?;

        let keys_dir = get(ENV_KEYS_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_KEYS_DIR));
        let private_key_path = get(ENV_PRIVATE_KEY)
            .map(PathBuf::from)
            .unwrap_or_else(|| keys_dir.join(PRIVATE_KEY_FILE));
        let public_key_path = get(ENV_PUBLIC_KEY)
            .map(PathBuf::from)
            .unwrap_or_else(|| keys_dir.join(PUBLIC_KEY_FILE));

        let database_path = get(ENV_DATABASE_URL)
            .map(|url| database_path_from_url(&url))
            .unwrap_or_else(default_database_path);

        let iv_policy = match get(ENV_IV_POLICY) {
            Some(v) => v.parse::<IvPolicy>().map_err(|e| ConfigError::Invalid {
                var: ENV_IV_POLICY,
                reason: e.to_string(),
            })?,
            None => IvPolicy::default(),
        };

        let key_derivation = match get(ENV_KDF) {
            Some(v) => v.parse::<KeyDerivation>().map_err(|e| ConfigError::Invalid {
                var: ENV_KDF,
                reason: e.to_string(),
            })?,
            None => KeyDerivation::default(),
        };

        Ok(Self {
            secret,
            private_key_path,
            public_key_path,
            database_path,
            iv_policy,
            key_derivation,
        })
    }

    /// The shared secret. Never log this.
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("secret", &"[REDACTED]")
            .field("private_key_path", &self.private_key_path)
            .field("public_key_path", &self.public_key_path)
            .field("database_path", &self.database_path)
            .field("iv_policy", &self.iv_policy)
            .field("key_derivation", &self.key_derivation)
            .finish()
    }
}

/// Default database location under the platform data directory.
fn default_database_path() -> PathBuf {
    let base = dirs_next::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("docseal").join("docseal.db")
}

fn database_path_from_url(url: &str) -> PathBuf {
    let url = url.trim();
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("file:"))
        .unwrap_or(url);
    PathBuf::from(path)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let err = settings(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_SECRET)));

        let err = settings(&[(ENV_SECRET, "   ")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_SECRET)));
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[(ENV_SECRET, "s3cret")]).unwrap();
        assert_eq!(s.secret(), "s3cret");
        assert_eq!(s.private_key_path, PathBuf::from("keys/private.key"));
        assert_eq!(s.public_key_path, PathBuf::from("keys/public.key"));
        assert!(s.database_path.ends_with("docseal/docseal.db"));
        assert_eq!(s.iv_policy, IvPolicy::Random);
        assert_eq!(s.key_derivation, KeyDerivation::Legacy);
    }

    #[test]
    fn test_overrides() {
        let s = settings(&[
            (ENV_SECRET, "s3cret"),
            (ENV_KEYS_DIR, "/etc/docseal"),
            (ENV_PUBLIC_KEY, "/tmp/pub.pem"),
            (ENV_DATABASE_URL, "file:./dev.db"),
            (ENV_IV_POLICY, "fixed"),
            (ENV_KDF, "argon2id"),
        ])
        .unwrap();
        assert_eq!(s.private_key_path, PathBuf::from("/etc/docseal/private.key"));
        assert_eq!(s.public_key_path, PathBuf::from("/tmp/pub.pem"));
        assert_eq!(s.database_path, PathBuf::from("./dev.db"));
        assert_eq!(s.iv_policy, IvPolicy::FixedDerived);
        assert_eq!(s.key_derivation, KeyDerivation::Argon2id);
    }

    #[test]
    fn test_database_url_forms() {
        assert_eq!(
            database_path_from_url("sqlite:///var/lib/docseal.db"),
            PathBuf::from("/var/lib/docseal.db")
        );
        assert_eq!(database_path_from_url("file:dev.db"), PathBuf::from("dev.db"));
        assert_eq!(database_path_from_url("plain.db"), PathBuf::from("plain.db"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = settings(&[(ENV_SECRET, "s"), (ENV_IV_POLICY, "ecb")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: ENV_IV_POLICY, .. }));

        let err = settings(&[(ENV_SECRET, "s"), (ENV_KDF, "md5")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: ENV_KDF, .. }));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let s = settings(&[(ENV_SECRET, "hunter2")]).unwrap();
        assert!(!format!("{:?}", s).contains("hunter2"));
    }
}
