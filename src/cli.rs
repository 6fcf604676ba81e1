//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// gopin - Snapshot and restore pinned git revisions across a Go workspace
#[derive(Parser, Debug)]
#[command(name = "gopin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan the workspace and write a lock document of every repository's
    /// current revision
    Snapshot(commands::snapshot::SnapshotArgs),

    /// Fetch, pin and build every repository recorded in a lock document
    Restore(commands::restore::RestoreArgs),

    /// List the repositories pinned in a lock document
    Ls(commands::ls::LsArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let env = env_logger::Env::default().default_filter_or(self.log_level.as_str());
        // A second init in the same process (tests) is harmless.
        let _ = env_logger::Builder::from_env(env).try_init();

        match self.command {
            Commands::Snapshot(args) => commands::snapshot::execute(args, &self.color),
            Commands::Restore(args) => commands::restore::execute(args, &self.color),
            Commands::Ls(args) => commands::ls::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
