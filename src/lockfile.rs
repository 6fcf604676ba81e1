//! # Lock Document Model and Serialization
//!
//! A lock document is the persisted record of one workspace snapshot: an
//! ordered list of repositories, each pinned to the exact revision that was
//! checked out when the workspace was scanned.
//!
//! ## Wire format
//!
//! The document serializes to pretty-printed JSON with two-space indent.
//! Field names on the wire are `Repositories`, `ImportPath`, `Rev` and
//! `Lang`, matching lock files produced by earlier versions of this tool,
//! while the Rust API uses the clearer `import_path`/`revision`/`ecosystem`
//! vocabulary. Serialization of an unchanged document is byte-identical from
//! run to run, so pin changes diff cleanly under version control.
//!
//! ## Invariants
//!
//! Within one document, import paths are unique and their order is
//! significant: it is the order repositories were discovered in and the
//! order they are restored in. Loading rejects documents that violate the
//! invariants (duplicate import path, empty import path or revision) with a
//! [`Error::Lockfile`]; no partial recovery is attempted.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One pinned repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// Location relative to the workspace root, forward-slash separated.
    /// Doubles as the identifier the toolchain fetches it by.
    #[serde(rename = "ImportPath")]
    pub import_path: String,

    /// Opaque identifier of the exact state to pin to.
    #[serde(rename = "Rev")]
    pub revision: String,

    /// Tag of the toolchain that owns this repository.
    #[serde(rename = "Lang")]
    pub ecosystem: String,
}

/// The ordered, persisted set of pinned repositories for a workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockDocument {
    #[serde(rename = "Repositories")]
    pub repositories: Vec<RepositoryRecord>,
}

impl LockDocument {
    /// Create an empty document, ready to accumulate scan results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Scanning visits each repository root exactly once,
    /// so appends preserve the uniqueness invariant by construction.
    pub fn push(&mut self, record: RepositoryRecord) {
        self.repositories.push(record);
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    /// Serialize to pretty-printed JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        Ok(text)
    }

    /// Parse and validate a document from JSON text.
    ///
    /// Malformed content and invariant violations both surface as
    /// [`Error::Lockfile`], the same shape `from_file` produces, with
    /// `<memory>` standing in for the file path.
    pub fn from_json(text: &str) -> Result<Self> {
        Self::parse(text, "<memory>")
    }

    /// Write the document to `path`, replacing any existing file.
    pub fn to_file(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load and validate a document from `path`.
    ///
    /// Malformed content surfaces as [`Error::Lockfile`] naming the file;
    /// I/O errors propagate as-is.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text, &path.display().to_string())
    }

    /// Parse JSON text and check the invariants, labelling any failure with
    /// `origin` (a file path, or `<memory>` for in-memory input).
    fn parse(text: &str, origin: &str) -> Result<Self> {
        let document: Self = serde_json::from_str(text).map_err(|e| Error::Lockfile {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        document.validate().map_err(|message| Error::Lockfile {
            path: origin.to_string(),
            message,
        })?;
        Ok(document)
    }

    /// Check the persisted-record invariants.
    fn validate(&self) -> std::result::Result<(), String> {
        let mut seen = HashSet::new();
        for record in &self.repositories {
            if record.import_path.is_empty() {
                return Err("record with empty import path".to_string());
            }
            if record.revision.is_empty() {
                return Err(format!("empty revision for {}", record.import_path));
            }
            if !seen.insert(record.import_path.as_str()) {
                return Err(format!("duplicate import path: {}", record.import_path));
            }
        }
        Ok(())
    }
}
