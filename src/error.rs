//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `gopin` application. It uses the `thiserror` library to create an `Error`
//! enum covering every failure mode that is allowed to abort an operation,
//! providing clear and descriptive error messages.
//!
//! Only three conditions ever abort an in-progress operation:
//!
//! - **`Configuration`**: the workspace root could not be resolved. Raised
//!   before any traversal or restore work begins.
//! - **`Lockfile`**: a persisted lock document is malformed or fails
//!   validation (duplicate import path, empty revision).
//! - **`Pin`**: the forced checkout of a pinned revision failed during a
//!   restore. This halts the pin pass and skips the build pass entirely.
//!
//! Everything else (a repository whose revision cannot be probed, a
//! directory that cannot be listed, a failed fetch or build) is absorbed
//! locally with a best-effort continue and never surfaces as an `Error`.
//!
//! The `Result<T>` alias is used throughout the library to keep signatures
//! short.

use thiserror::Error;

/// Main error type for gopin operations
#[derive(Error, Debug)]
pub enum Error {
    /// The workspace root could not be resolved.
    ///
    /// Raised at entry, before any scan or restore work is attempted.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A lock document is malformed or fails validation.
    #[error("Lock document error in {path}: {message}")]
    Lockfile { path: String, message: String },

    /// The forced checkout of a pinned revision failed.
    ///
    /// Fatal for the whole restore: an unpinned repository would leave the
    /// workspace inconsistent with the lock document.
    #[error("Failed to pin {import_path} to {revision}: {detail}")]
    Pin {
        import_path: String,
        revision: String,
        detail: String,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
