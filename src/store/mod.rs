// Docseal — Store Module
//
// Content-addressed persistence of encrypted signatures in SQLite. The
// digest column carries a UNIQUE index; that index, not the workflow, is
// what guarantees a single record per content.

mod db;
mod error;
mod models;
mod repository;

pub use db::Database;
pub use error::StoreError;
pub use models::{InsertOutcome, NewSignatureRecord, SignatureRecord};
pub use repository::{SignatureStore, SqliteSignatureStore};
