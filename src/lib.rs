//! # gopin Library
//!
//! This library provides the core functionality for snapshotting and
//! restoring the pinned state of every git repository under a Go workspace.
//! It is used by the `gopin` command-line tool but can also be integrated
//! into other applications that need reproducible multi-repository
//! workspaces.
//!
//! ## Quick Example
//!
//! ```
//! use gopin::lockfile::{LockDocument, RepositoryRecord};
//!
//! // Build a lock document by hand (a scan does this from a live tree)
//! let mut document = LockDocument::new();
//! document.push(RepositoryRecord {
//!     import_path: "github.com/example/repo".to_string(),
//!     revision: "aaa111".to_string(),
//!     ecosystem: "golang".to_string(),
//! });
//!
//! // Serialize it; the output is stable byte-for-byte
//! let text = document.to_json().unwrap();
//! let reloaded = LockDocument::from_json(&text).unwrap();
//! assert_eq!(reloaded, document);
//! ```
//!
//! ## Core Concepts
//!
//! - **Workspace (`workspace`)**: the resolved root directory under which
//!   all managed repositories live, nested by import path. Resolved once by
//!   the caller and passed explicitly into the scan and restore entry
//!   points.
//! - **Scanner (`scanner`)**: recursive traversal of a workspace that stops
//!   at every repository root (a directory containing `.git`), probes its
//!   revision, and accumulates an ordered lock document.
//! - **Lock Document (`lockfile`)**: the persisted, ordered record of
//!   import-path to revision pins, serialized as stable pretty-printed JSON.
//! - **Restore Engine (`restore`)**: replays a lock document against a
//!   workspace in three sequential passes (fetch, pin, build), aborting only
//!   when a pinned revision cannot be checked out.
//! - **External tools (`git`, `toolchain`)**: thin trait-fronted wrappers
//!   over the `git` and `go` binaries, mockable in tests.
//!
//! ## Execution Flow
//!
//! Snapshot: resolve workspace → `Scanner::scan` → `LockDocument::to_file`.
//! Restore: `LockDocument::from_file` → `RestoreEngine::restore` against the
//! resolved workspace.

pub mod error;
pub mod git;
pub mod lockfile;
pub mod output;
pub mod restore;
pub mod scanner;
pub mod toolchain;
pub mod workspace;
