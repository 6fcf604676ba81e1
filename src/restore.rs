//! # Restore Engine
//!
//! Re-materializes a pinned set of repositories in a workspace from a lock
//! document. Execution is three strictly sequential passes over the entire
//! repository list, in document order:
//!
//! 1. **Fetch**: `go get -d -t <import>` for every record, without requiring
//!    the target revision. Non-fatal; a repository already on disk may be
//!    checkout-able even when its remote is unreachable.
//! 2. **Pin**: for every record, force-checkout the current head, fetch all
//!    remotes plus the target revision, then force-checkout the target
//!    revision. Only the final forced checkout is fatal; the two preparatory
//!    steps are best effort.
//! 3. **Build**: `go install <import>` for every record. Non-fatal.
//!
//! The passes are not interleaved per repository because fetches may
//! populate shared state a later repository's build needs, so all fetches
//! complete before any pin and all pins before any build. A pin failure
//! aborts immediately: continuing past an unpinned repository would silently
//! produce a build inconsistent with the lock document, so the build pass
//! never runs once any pin has failed.
//!
//! Every external invocation, absorbed or not, lands in the returned
//! [`RestoreReport`] so callers can summarize what happened and tests can
//! assert on exactly which step failed.
//!
//! There are no timeouts on the external invocations: a hung git or go
//! process hangs the restore. Documented limitation.

use log::{info, warn};

use crate::error::{Error, Result};
use crate::git::{CommandOutcome, GitOperations};
use crate::lockfile::LockDocument;
use crate::toolchain::Toolchain;
use crate::workspace::Workspace;

/// Which external invocation a [`StepReport`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreStep {
    Fetch,
    CheckoutHead,
    FetchRevision,
    CheckoutRevision,
    Build,
}

/// Outcome of one external invocation against one repository.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub import_path: String,
    pub step: RestoreStep,
    pub outcome: CommandOutcome,
}

/// Everything the engine did, in execution order.
#[derive(Debug, Default)]
pub struct RestoreReport {
    pub steps: Vec<StepReport>,
}

impl RestoreReport {
    fn record(&mut self, import_path: &str, step: RestoreStep, outcome: CommandOutcome) {
        self.steps.push(StepReport {
            import_path: import_path.to_string(),
            step,
            outcome,
        });
    }

    /// Count of invocations that failed but were absorbed.
    pub fn absorbed_failures(&self) -> usize {
        self.steps.iter().filter(|s| !s.outcome.ok).count()
    }
}

/// Drives the fetch, pin and build passes over a lock document.
pub struct RestoreEngine<'a> {
    git: &'a dyn GitOperations,
    toolchain: &'a dyn Toolchain,
}

impl<'a> RestoreEngine<'a> {
    pub fn new(git: &'a dyn GitOperations, toolchain: &'a dyn Toolchain) -> Self {
        Self { git, toolchain }
    }

    /// Restore every repository in `document` under `workspace`.
    ///
    /// Returns the full step report on success, or [`Error::Pin`] if a
    /// forced checkout of a pinned revision failed. The report accumulated
    /// up to that point is dropped with the error; tests observe ordering
    /// through the trait implementations instead.
    pub fn restore(&self, document: &LockDocument, workspace: &Workspace) -> Result<RestoreReport> {
        let mut report = RestoreReport::default();
        let base_dir = workspace.root();

        // Pass 1: fetch everything, best effort.
        for repo in &document.repositories {
            info!("go get {}", repo.import_path);
            let outcome = self.toolchain.fetch(base_dir, &repo.import_path);
            if !outcome.ok {
                warn!("fetch of {} failed: {}", repo.import_path, outcome.detail);
            }
            report.record(&repo.import_path, RestoreStep::Fetch, outcome);
        }

        // Pass 2: pin everything; the forced checkout of the target
        // revision is the only fatal step in the whole restore.
        for repo in &document.repositories {
            info!("checkout {} [{}]", repo.import_path, repo.revision);
            let repo_dir = workspace.repo_dir(&repo.import_path);

            let outcome = self.git.checkout_head(&repo_dir);
            if !outcome.ok {
                warn!(
                    "checkout of current head in {} failed: {}",
                    repo.import_path, outcome.detail
                );
            }
            report.record(&repo.import_path, RestoreStep::CheckoutHead, outcome);

            let outcome = self.git.fetch_revision(&repo_dir, &repo.revision);
            if !outcome.ok {
                warn!(
                    "fetch of {} in {} failed: {}",
                    repo.revision, repo.import_path, outcome.detail
                );
            }
            report.record(&repo.import_path, RestoreStep::FetchRevision, outcome);

            let outcome = self.git.checkout_revision(&repo_dir, &repo.revision);
            report.record(&repo.import_path, RestoreStep::CheckoutRevision, outcome.clone());
            if !outcome.ok {
                return Err(Error::Pin {
                    import_path: repo.import_path.clone(),
                    revision: repo.revision.clone(),
                    detail: outcome.detail,
                });
            }
        }

        // Pass 3: build everything, best effort.
        for repo in &document.repositories {
            info!("go install {}", repo.import_path);
            let outcome = self.toolchain.build(base_dir, &repo.import_path);
            if !outcome.ok {
                warn!("build of {} failed: {}", repo.import_path, outcome.detail);
            }
            report.record(&repo.import_path, RestoreStep::Build, outcome);
        }

        Ok(report)
    }
}
