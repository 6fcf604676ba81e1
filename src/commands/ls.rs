//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which prints the repositories
//! pinned in a lock document, in restore order. A safe, read-only operation
//! useful for inspecting a lock document before restoring it.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use gopin::lockfile::LockDocument;

/// Arguments for the ls command
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Path of the lock document to list
    #[arg(short, long, value_name = "FILE", default_value = "dependencies.json")]
    pub lockfile: PathBuf,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs) -> Result<()> {
    let document = LockDocument::from_file(&args.lockfile)?;

    for repo in &document.repositories {
        println!("{} {}", repo.import_path, repo.revision);
    }
    println!("{} repositories pinned", document.len());

    Ok(())
}
