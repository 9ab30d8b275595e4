// Docseal — CLI Module
//
// Command-line front end using clap derive macros. It plays the transport
// role: turns a file (or base64 text) into bytes, calls the engine, and
// prints a `{status, type, data}` JSON envelope.
// Subcommands: sign, verify, digest.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

use crate::error::{DocsealError, Result};

pub use commands::{execute, execute_with};

/// Docseal — sign documents once, verify them forever.
#[derive(Parser, Debug)]
#[command(name = "docseal")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign a document. Signing the same content twice is a no-op.
    Sign {
        /// Path to the document.
        file: PathBuf,

        /// The file holds base64 text; decode it before hashing.
        #[arg(long)]
        base64: bool,
    },

    /// Verify a document against the stored signature, or against a
    /// detached signature and hash when both are given.
    Verify {
        /// Path to the document.
        file: PathBuf,

        /// The file holds base64 text; decode it before hashing.
        #[arg(long)]
        base64: bool,

        /// Detached base64 signature (requires --hash).
        #[arg(long, requires = "hash")]
        signature: Option<String>,

        /// Hex SHA-256 the signature was made over (requires --signature).
        #[arg(long, requires = "signature")]
        hash: Option<String>,
    },

    /// Print the SHA-256 content digest of a document.
    Digest {
        /// Path to the document.
        file: PathBuf,

        /// The file holds base64 text; decode it before hashing.
        #[arg(long)]
        base64: bool,
    },
}

/// Response envelope printed on stdout.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub status: u16,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: Value,
}

impl Envelope {
    pub fn success<T: Serialize>(status: u16, data: T) -> Result<Self> {
        Ok(Self {
            status,
            kind: "success",
            data: serde_json::to_value(data)?,
        })
    }

    pub fn error(err: &DocsealError) -> Self {
        let status = match err {
            DocsealError::Digest(_) | DocsealError::Io(_) | DocsealError::Other(_) => 400,
            _ => 500,
        };
        Self {
            status,
            kind: "error",
            data: serde_json::json!({ "message": err.to_string() }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == "success"
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
