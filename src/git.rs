//! # Git Operations
//!
//! This module wraps every invocation of the `git` binary the tool makes:
//! probing a repository's current revision and the three-step pin sequence
//! used during a restore.
//!
//! It uses the system git command, which automatically handles:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Personal access tokens
//! - Any authentication configured in ~/.gitconfig
//!
//! ## Design
//!
//! Git access goes through the `GitOperations` trait so that the scanner and
//! the restore engine can be tested against mock implementations without a
//! git binary or real repositories. `SystemGit` is the production
//! implementation.
//!
//! Most git invocations here are best effort: a broken repository must not
//! abort a whole scan, and a failed `git fetch` must not abort a restore.
//! Instead of discarding those failures, each invocation returns a
//! [`CommandOutcome`] carrying the success flag and the tool's diagnostic
//! output, so callers decide what is fatal and tests can assert on which
//! step failed.

use std::path::Path;
use std::process::Command;

/// The result of one external command invocation.
///
/// `ok` is the command's exit status; `detail` is its captured standard
/// error (or the spawn error message when the command could not run at all).
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    pub ok: bool,
    pub detail: String,
}

impl CommandOutcome {
    pub fn success() -> Self {
        Self {
            ok: true,
            detail: String::new(),
        }
    }

    pub fn failure(detail: impl Into<String>) -> Self {
        Self {
            ok: false,
            detail: detail.into(),
        }
    }
}

/// Trait for git operations - allows mocking in tests
pub trait GitOperations: Send + Sync {
    /// Returns the revision currently checked out at `repo_dir`.
    ///
    /// `None` means the revision could not be determined (git missing, not a
    /// repository, corrupt state). Callers treat that as "skip this
    /// repository", never as an error.
    fn head_revision(&self, repo_dir: &Path) -> Option<String>;

    /// Discard local modifications by forcing a checkout of the current head.
    fn checkout_head(&self, repo_dir: &Path) -> CommandOutcome;

    /// Fetch all remote references plus the specific target revision.
    fn fetch_revision(&self, repo_dir: &Path, revision: &str) -> CommandOutcome;

    /// Force-checkout the target revision.
    fn checkout_revision(&self, repo_dir: &Path, revision: &str) -> CommandOutcome;
}

/// Production implementation driving the system `git` binary.
#[derive(Debug, Default)]
pub struct SystemGit;

impl SystemGit {
    pub fn new() -> Self {
        Self
    }
}

/// Run `git <args>` with `repo_dir` as working directory, capturing output.
fn run_git(repo_dir: &Path, args: &[&str]) -> CommandOutcome {
    let output = match Command::new("git").args(args).current_dir(repo_dir).output() {
        Ok(output) => output,
        Err(e) => return CommandOutcome::failure(e.to_string()),
    };

    if output.status.success() {
        CommandOutcome::success()
    } else {
        CommandOutcome::failure(String::from_utf8_lossy(&output.stderr).into_owned())
    }
}

impl GitOperations for SystemGit {
    fn head_revision(&self, repo_dir: &Path) -> Option<String> {
        let output = Command::new("git")
            .args(["rev-parse", "HEAD"])
            .current_dir(repo_dir)
            .output()
            .ok()?;

        if !output.status.success() {
            return None;
        }

        // Sole stdout content is the revision, with a trailing newline.
        let revision = String::from_utf8_lossy(&output.stdout)
            .trim_end()
            .to_string();
        if revision.is_empty() {
            None
        } else {
            Some(revision)
        }
    }

    fn checkout_head(&self, repo_dir: &Path) -> CommandOutcome {
        run_git(repo_dir, &["checkout", "-f", "HEAD"])
    }

    fn fetch_revision(&self, repo_dir: &Path, revision: &str) -> CommandOutcome {
        run_git(repo_dir, &["fetch", "--all", revision])
    }

    fn checkout_revision(&self, repo_dir: &Path, revision: &str) -> CommandOutcome {
        run_git(repo_dir, &["checkout", "-f", revision])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_outcome_constructors() {
        let ok = CommandOutcome::success();
        assert!(ok.ok);
        assert!(ok.detail.is_empty());

        let failed = CommandOutcome::failure("boom");
        assert!(!failed.ok);
        assert_eq!(failed.detail, "boom");
    }

    #[test]
    fn test_head_revision_not_a_repository() {
        // A plain directory is not a git repository: the probe must yield
        // None whether git is installed or not.
        let temp = TempDir::new().unwrap();
        let git = SystemGit::new();
        assert_eq!(git.head_revision(temp.path()), None);
    }

    #[test]
    fn test_run_git_nonexistent_directory() {
        let git = SystemGit::new();
        let outcome = git.checkout_head(Path::new("/nonexistent/gopin-test-dir"));
        assert!(!outcome.ok);
        assert!(!outcome.detail.is_empty());
    }

    #[test]
    fn test_fetch_revision_not_a_repository() {
        let temp = TempDir::new().unwrap();
        let git = SystemGit::new();
        let outcome = git.fetch_revision(temp.path(), "deadbeef");
        assert!(!outcome.ok);
    }
}
