//! # Restore Command Implementation
//!
//! This module implements the `restore` subcommand, which replays a lock
//! document against the workspace: every recorded repository is fetched,
//! force-checked-out at its pinned revision, and built.
//!
//! Fetch and build failures are reported but absorbed; a failed pin aborts
//! the restore, because continuing past an unpinned repository would
//! silently produce a workspace inconsistent with the lock document.

use anyhow::Result;
use clap::Args;
use std::fs;
use std::path::PathBuf;

use gopin::git::SystemGit;
use gopin::lockfile::LockDocument;
use gopin::output::{emoji, OutputConfig};
use gopin::restore::RestoreEngine;
use gopin::toolchain::GoToolchain;
use gopin::workspace;
use gopin::workspace::Workspace;

/// Arguments for the restore command
#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// Path of the lock document to restore from
    #[arg(short, long, value_name = "FILE", default_value = "dependencies.json")]
    pub lockfile: PathBuf,

    /// Workspace gopath (defaults to the first entry of $GOPATH)
    #[arg(long, value_name = "DIR")]
    pub gopath: Option<PathBuf>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `restore` command.
pub fn execute(args: RestoreArgs, color_flag: &str) -> Result<()> {
    let output_config = OutputConfig::from_env_and_flag(color_flag);

    let gopath = match args.gopath {
        Some(gopath) => gopath,
        None => workspace::gopath_from_env()?,
    };
    let ws = Workspace::new(gopath.join("src"));

    let document = LockDocument::from_file(&args.lockfile)?;

    if !args.quiet {
        println!(
            "{} Restoring {} repositories into {}",
            emoji(&output_config, "📦", "[RESTORE]"),
            document.len(),
            ws.root().display()
        );
    }

    // The fetch pass runs with the workspace root as working directory, so
    // it has to exist even for a fresh workspace.
    fs::create_dir_all(ws.root())?;

    let git = SystemGit::new();
    let toolchain = GoToolchain::new(gopath);
    let engine = RestoreEngine::new(&git, &toolchain);

    match engine.restore(&document, &ws) {
        Ok(report) => {
            if !args.quiet {
                let absorbed = report.absorbed_failures();
                if absorbed > 0 {
                    println!(
                        "{} Restored {} repositories ({} non-fatal command failures, see warnings)",
                        emoji(&output_config, "⚠️", "[WARN]"),
                        document.len(),
                        absorbed
                    );
                } else {
                    println!(
                        "{} Restored {} repositories",
                        emoji(&output_config, "✅", "[OK]"),
                        document.len()
                    );
                }
            }
            Ok(())
        }
        Err(e) => {
            if !args.quiet {
                println!("{} Restore failed", emoji(&output_config, "❌", "[FAIL]"));
            }
            Err(e.into())
        }
    }
}
