//! # Toolchain Operations
//!
//! The fetch and build halves of a restore are owned by the language
//! toolchain, not by git: a repository's import path doubles as the
//! identifier the toolchain uses to download and install it.
//!
//! The `Toolchain` trait keeps the restore engine independent of any single
//! ecosystem; `GoToolchain` is the one implementation in scope today and
//! drives the `go` binary (`go get -d -t` to fetch, `go install` to build).
//! The ecosystem tag it stamps into scanned records is data rather than a
//! constant so that lock documents can carry repositories owned by other
//! toolchains in the future.
//!
//! `GoToolchain` is constructed with the resolved gopath and exports it as
//! `GOPATH` on every spawned command: `go` locates its workspace from the
//! environment, not the working directory, so the ambient `GOPATH` must
//! never leak into a restore that was pointed at a different workspace via
//! `--gopath`.
//!
//! Both operations are best effort and return a [`CommandOutcome`]; a fetch
//! or build failure never aborts a restore on its own. Standard output of
//! the underlying commands is forwarded to the operator for visibility.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::git::CommandOutcome;

/// Trait for toolchain operations - allows mocking in tests
pub trait Toolchain: Send + Sync {
    /// Tag identifying which toolchain owns the repositories it records.
    fn ecosystem(&self) -> &str;

    /// Fetch the repository identified by `import_path` into the workspace,
    /// including its history and test-only references, without requiring any
    /// particular revision.
    fn fetch(&self, base_dir: &Path, import_path: &str) -> CommandOutcome;

    /// Build/install the repository identified by `import_path`.
    fn build(&self, base_dir: &Path, import_path: &str) -> CommandOutcome;
}

/// Production implementation driving the `go` binary against one gopath.
#[derive(Debug)]
pub struct GoToolchain {
    gopath: PathBuf,
}

impl GoToolchain {
    pub fn new(gopath: impl Into<PathBuf>) -> Self {
        Self {
            gopath: gopath.into(),
        }
    }

    /// Build a `go <args>` command with `base_dir` as working directory and
    /// `GOPATH` pinned to the resolved gopath.
    ///
    /// Stdout is inherited so download and build progress reaches the
    /// operator; stderr is captured for the outcome diagnostic.
    fn command(&self, base_dir: &Path, args: &[&str]) -> Command {
        let mut cmd = Command::new("go");
        cmd.args(args)
            .current_dir(base_dir)
            .env("GOPATH", &self.gopath)
            .stdout(Stdio::inherit());
        cmd
    }
}

fn run(mut cmd: Command) -> CommandOutcome {
    let output = match cmd.output() {
        Ok(output) => output,
        Err(e) => return CommandOutcome::failure(e.to_string()),
    };

    if output.status.success() {
        CommandOutcome::success()
    } else {
        CommandOutcome::failure(String::from_utf8_lossy(&output.stderr).into_owned())
    }
}

impl Toolchain for GoToolchain {
    fn ecosystem(&self) -> &str {
        "golang"
    }

    fn fetch(&self, base_dir: &Path, import_path: &str) -> CommandOutcome {
        run(self.command(base_dir, &["get", "-d", "-t", import_path]))
    }

    fn build(&self, base_dir: &Path, import_path: &str) -> CommandOutcome {
        run(self.command(base_dir, &["install", import_path]))
    }
}
