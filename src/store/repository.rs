// Docseal — Signature Store Repository
//
// Two operations: look a record up by digest, and insert one unless the
// digest is already present. The insert relies on the UNIQUE index and maps
// its violation to `InsertOutcome::AlreadyExists`, so two signers racing on
// the same content both get a clean answer and exactly one row is written.

use chrono::Utc;
use rusqlite::{params, ErrorCode, OptionalExtension};
use uuid::Uuid;

use super::db::Database;
use super::models::{InsertOutcome, NewSignatureRecord, SignatureRecord};
use super::StoreError;
use crate::digest::Digest;
use crate::guard::IvPolicy;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Content-addressed signature persistence.
pub trait SignatureStore {
    /// Fetch the record for a digest, if one was ever written.
    fn find_by_digest(&self, digest: &Digest) -> Result<Option<SignatureRecord>, StoreError>;

    /// Create the record unless one exists for the same digest.
    /// Never overwrites.
    fn insert_if_absent(&self, record: NewSignatureRecord) -> Result<InsertOutcome, StoreError>;

    /// Number of stored records.
    fn count(&self) -> Result<u64, StoreError>;
}

// ─── SQLite Implementation ──────────────────────────────────────────────────

pub struct SqliteSignatureStore<'a> {
    db: &'a Database,
}

impl<'a> SqliteSignatureStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Parse a signature row from the database.
    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<SignatureRecord> {
        let id_str: String = row.get(0)?;
        let digest_str: String = row.get(1)?;
        let encrypted_signature: String = row.get(2)?;
        let iv_policy_str: String = row.get(3)?;
        let created_at_str: String = row.get(4)?;

        let id = Uuid::parse_str(&id_str).map_err(|e| conversion_failure(0, e))?;
        let digest = Digest::parse(&digest_str).map_err(|e| conversion_failure(1, e))?;
        let iv_policy = iv_policy_str
            .parse::<IvPolicy>()
            .map_err(|e| conversion_failure(3, e))?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| conversion_failure(4, e))?;

        Ok(SignatureRecord {
            id,
            digest,
            encrypted_signature,
            iv_policy,
            created_at,
        })
    }
}

fn conversion_failure<E>(column: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(err))
}

impl<'a> SignatureStore for SqliteSignatureStore<'a> {
    fn find_by_digest(&self, digest: &Digest) -> Result<Option<SignatureRecord>, StoreError> {
        self.db
            .conn()
            .query_row(
                "SELECT id, digest, encrypted_signature, iv_policy, created_at
                 FROM signatures WHERE digest = ?1",
                params![digest.as_str()],
                Self::row_to_record,
            )
            .optional()
            .map_err(|e| match e {
                rusqlite::Error::FromSqlConversionFailure(_, _, reason) => StoreError::Corrupt {
                    digest: digest.to_string(),
                    reason: reason.to_string(),
                },
                other => StoreError::Database(other),
            })
    }

    fn insert_if_absent(&self, record: NewSignatureRecord) -> Result<InsertOutcome, StoreError> {
        let id = Uuid::new_v4();
        let now = Utc::now().to_rfc3339();

        let result = self.db.conn().execute(
            "INSERT INTO signatures (id, digest, encrypted_signature, iv_policy, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                id.to_string(),
                record.digest.as_str(),
                record.encrypted_signature,
                record.iv_policy.as_str(),
                now,
            ],
        );

        match result {
            Ok(_) => {
                tracing::info!(
                    record_id = %id,
                    digest = %record.digest,
                    iv_policy = %record.iv_policy,
                    "Signature record stored"
                );
                Ok(InsertOutcome::Inserted)
            }
            Err(e) if e.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) => {
                tracing::debug!(digest = %record.digest, "Signature record already present");
                Ok(InsertOutcome::AlreadyExists)
            }
            Err(e) => Err(StoreError::Database(e)),
        }
    }

    fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = self
            .db
            .conn()
            .query_row("SELECT count(*) FROM signatures", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
