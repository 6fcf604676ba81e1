//! # Workspace Resolution
//!
//! A workspace is the directory tree under which all managed repositories
//! live, nested by import path. For the Go toolchain that is `$GOPATH/src`.
//!
//! The library never reads the environment itself: callers resolve the
//! workspace once (from a CLI flag or from `GOPATH`) and pass an explicit
//! [`Workspace`] value into the scan and restore entry points. Resolution
//! failures are configuration errors raised before any traversal or restore
//! work begins.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// The resolved root directory a scan or restore operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Wrap an already-resolved workspace root (the `src` directory).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The on-disk directory of a repository, from its import path.
    ///
    /// Import paths use forward slashes regardless of platform; each segment
    /// becomes one path component.
    pub fn repo_dir(&self, import_path: &str) -> PathBuf {
        let mut dir = self.root.clone();
        for segment in import_path.split('/') {
            dir.push(segment);
        }
        dir
    }
}

/// First entry of the `GOPATH` path list, if set and non-empty.
///
/// `GOPATH` may hold several paths; like the Go toolchain itself, only the
/// first one is used for fetching and pinning.
pub fn gopath_from_env() -> Result<PathBuf> {
    let raw = env::var_os("GOPATH").ok_or_else(|| Error::Configuration {
        message: "GOPATH not set".to_string(),
    })?;

    env::split_paths(&raw)
        .find(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| Error::Configuration {
            message: "GOPATH is empty".to_string(),
        })
}
