//! # Snapshot Command Implementation
//!
//! This module implements the `snapshot` subcommand, which scans the
//! workspace for git repositories and writes a lock document pinning each
//! one to its currently checked-out revision.
//!
//! The workspace root is `<gopath>/src`, where the gopath comes from the
//! `--gopath` flag or, failing that, from the first entry of the `GOPATH`
//! environment variable. Repositories whose revision cannot be probed are
//! omitted from the snapshot; the scan itself never fails once the
//! workspace root is resolved.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use gopin::git::SystemGit;
use gopin::output::{emoji, OutputConfig};
use gopin::scanner::{FsLister, Scanner};
use gopin::toolchain::{GoToolchain, Toolchain};
use gopin::workspace;
use gopin::workspace::Workspace;

/// Arguments for the snapshot command
#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// Workspace gopath (defaults to the first entry of $GOPATH)
    #[arg(long, value_name = "DIR")]
    pub gopath: Option<PathBuf>,

    /// Path of the lock document to write
    #[arg(short, long, value_name = "FILE", default_value = "dependencies.json")]
    pub output: PathBuf,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `snapshot` command.
pub fn execute(args: SnapshotArgs, color_flag: &str) -> Result<()> {
    let output_config = OutputConfig::from_env_and_flag(color_flag);

    let gopath = match args.gopath {
        Some(gopath) => gopath,
        None => workspace::gopath_from_env()?,
    };
    let ws = Workspace::new(gopath.join("src"));

    if !args.quiet {
        println!(
            "{} Scanning workspace {}",
            emoji(&output_config, "🔍", "[SCAN]"),
            ws.root().display()
        );
    }

    let lister = FsLister::new();
    let git = SystemGit::new();
    let toolchain = GoToolchain::new(gopath);
    let scanner = Scanner::new(&lister, &git, toolchain.ecosystem());
    let document = scanner.scan(&ws);

    document.to_file(&args.output)?;

    if !args.quiet {
        println!(
            "{} Pinned {} repositories to {}",
            emoji(&output_config, "📌", "[PIN]"),
            document.len(),
            args.output.display()
        );
    }

    Ok(())
}
