//! # Repository Discovery
//!
//! This module implements the recursive workspace scan that builds a lock
//! document from a live tree of repositories.
//!
//! ## Traversal rule
//!
//! Starting at the workspace root, each directory's immediate children are
//! visited in lexical order. A child that contains a `.git` subdirectory is
//! a repository root: descent stops there, the repository's head revision is
//! probed and, when the probe succeeds, a record is appended to the
//! accumulating document. A child without the marker is an intermediate
//! namespace segment and is recursed into. Nothing beneath a repository root
//! is ever visited, so nested checkouts inside a repository's working tree
//! are invisible to the scan.
//!
//! A repository whose revision cannot be probed is silently omitted, and a
//! directory that cannot be listed is silently skipped; in both cases the
//! scan continues with the remaining siblings. A single broken repository
//! must not abort the whole snapshot.
//!
//! ## Testability
//!
//! Directory listing goes through the `DirectoryLister` trait, so the
//! traversal can be exercised against an in-memory tree as well as the real
//! filesystem. The real implementation sorts child names lexically, which
//! makes scan output deterministic even though the underlying directory
//! iteration order is not.

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info};

use crate::git::GitOperations;
use crate::lockfile::{LockDocument, RepositoryRecord};
use crate::workspace::Workspace;

/// Name of the hidden subdirectory marking a repository root.
const REPO_MARKER: &str = ".git";

/// Trait for directory listing - allows scanning an in-memory tree in tests
pub trait DirectoryLister: Send + Sync {
    /// Names of the immediate subdirectories of `path`, in the order the
    /// scan should visit them.
    fn child_dirs(&self, path: &Path) -> io::Result<Vec<String>>;
}

/// Real-filesystem lister. Children are sorted lexically for reproducible
/// scan output; entries that vanish mid-listing and names that are not valid
/// UTF-8 (which could never form an import path) are skipped.
#[derive(Debug, Default)]
pub struct FsLister;

impl FsLister {
    pub fn new() -> Self {
        Self
    }
}

impl DirectoryLister for FsLister {
    fn child_dirs(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path)? {
            let Ok(entry) = entry else { continue };
            let Ok(file_type) = entry.file_type() else { continue };
            if !file_type.is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Walks a workspace and accumulates one record per repository root found.
pub struct Scanner<'a> {
    lister: &'a dyn DirectoryLister,
    git: &'a dyn GitOperations,
    ecosystem: String,
}

impl<'a> Scanner<'a> {
    pub fn new(
        lister: &'a dyn DirectoryLister,
        git: &'a dyn GitOperations,
        ecosystem: impl Into<String>,
    ) -> Self {
        Self {
            lister,
            git,
            ecosystem: ecosystem.into(),
        }
    }

    /// Scan the workspace, producing records in depth-first, lexical
    /// per-directory order.
    pub fn scan(&self, workspace: &Workspace) -> LockDocument {
        let mut document = LockDocument::new();
        self.visit(workspace.root(), "", &mut document);
        document
    }

    fn visit(&self, path: &Path, prefix: &str, document: &mut LockDocument) {
        let children = match self.lister.child_dirs(path) {
            Ok(children) => children,
            Err(e) => {
                // Unlistable subtree: skip it, keep scanning siblings.
                debug!("skipping unlistable directory {}: {}", path.display(), e);
                return;
            }
        };

        for name in children {
            // The marker itself is never a namespace segment.
            if name == REPO_MARKER {
                continue;
            }

            let candidate = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", prefix, name)
            };
            let child_path = path.join(&name);

            let grandchildren = match self.lister.child_dirs(&child_path) {
                Ok(grandchildren) => grandchildren,
                Err(e) => {
                    debug!(
                        "skipping unlistable directory {}: {}",
                        child_path.display(),
                        e
                    );
                    continue;
                }
            };

            if !grandchildren.iter().any(|n| n == REPO_MARKER) {
                // Intermediate namespace segment: keep descending.
                self.visit(&child_path, &candidate, document);
                continue;
            }

            // Repository root: stop here and probe it. A failed probe omits
            // the repository from the snapshot without aborting the scan.
            match self.git.head_revision(&child_path) {
                Some(revision) => {
                    info!("dependency repo[{}] hash[{}]", candidate, revision);
                    document.push(RepositoryRecord {
                        import_path: candidate,
                        revision,
                        ecosystem: self.ecosystem.clone(),
                    });
                }
                None => {
                    debug!("could not probe revision of {}, skipping", candidate);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// In-memory directory tree: maps a directory to its child directory
    /// names. Paths absent from the map are unlistable.
    struct FakeLister {
        dirs: BTreeMap<PathBuf, Vec<String>>,
    }

    impl FakeLister {
        fn new(entries: &[(&str, &[&str])]) -> Self {
            let dirs = entries
                .iter()
                .map(|(path, children)| {
                    (
                        PathBuf::from(path),
                        children.iter().map(|c| c.to_string()).collect(),
                    )
                })
                .collect();
            Self { dirs }
        }
    }

    impl DirectoryLister for FakeLister {
        fn child_dirs(&self, path: &Path) -> io::Result<Vec<String>> {
            self.dirs
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such directory"))
        }
    }

    /// Probe stub: maps repository directories to revisions. Directories
    /// absent from the map fail the probe.
    struct FakeGit {
        revisions: BTreeMap<PathBuf, String>,
    }

    impl FakeGit {
        fn new(entries: &[(&str, &str)]) -> Self {
            let revisions = entries
                .iter()
                .map(|(path, rev)| (PathBuf::from(path), rev.to_string()))
                .collect();
            Self { revisions }
        }
    }

    impl GitOperations for FakeGit {
        fn head_revision(&self, repo_dir: &Path) -> Option<String> {
            self.revisions.get(repo_dir).cloned()
        }

        fn checkout_head(&self, _repo_dir: &Path) -> crate::git::CommandOutcome {
            crate::git::CommandOutcome::success()
        }

        fn fetch_revision(&self, _repo_dir: &Path, _revision: &str) -> crate::git::CommandOutcome {
            crate::git::CommandOutcome::success()
        }

        fn checkout_revision(
            &self,
            _repo_dir: &Path,
            _revision: &str,
        ) -> crate::git::CommandOutcome {
            crate::git::CommandOutcome::success()
        }
    }

    fn paths(document: &LockDocument) -> Vec<&str> {
        document
            .repositories
            .iter()
            .map(|r| r.import_path.as_str())
            .collect()
    }

    #[test]
    fn test_scan_workspace_scenario() {
        // /ws/src/alpha is a repository; /ws/src/group/beta is one level
        // deeper behind a namespace directory.
        let lister = FakeLister::new(&[
            ("/ws/src", &["alpha", "group"]),
            ("/ws/src/alpha", &[".git", "cmd"]),
            ("/ws/src/alpha/cmd", &[]),
            ("/ws/src/group", &["beta"]),
            ("/ws/src/group/beta", &[".git"]),
        ]);
        let git = FakeGit::new(&[
            ("/ws/src/alpha", "aaa111"),
            ("/ws/src/group/beta", "bbb222"),
        ]);

        let scanner = Scanner::new(&lister, &git, "golang");
        let document = scanner.scan(&Workspace::new("/ws/src"));

        assert_eq!(paths(&document), vec!["alpha", "group/beta"]);
        assert_eq!(document.repositories[0].revision, "aaa111");
        assert_eq!(document.repositories[1].revision, "bbb222");
        assert_eq!(document.repositories[0].ecosystem, "golang");
    }

    #[test]
    fn test_scan_stops_at_repository_root() {
        // A checkout nested inside another repository's working tree must
        // never be visited, let alone recorded.
        let lister = FakeLister::new(&[
            ("/ws/src", &["outer"]),
            ("/ws/src/outer", &[".git", "vendor"]),
            ("/ws/src/outer/vendor", &["inner"]),
            ("/ws/src/outer/vendor/inner", &[".git"]),
        ]);
        let git = FakeGit::new(&[
            ("/ws/src/outer", "aaa111"),
            ("/ws/src/outer/vendor/inner", "bbb222"),
        ]);

        let scanner = Scanner::new(&lister, &git, "golang");
        let document = scanner.scan(&Workspace::new("/ws/src"));

        assert_eq!(paths(&document), vec!["outer"]);
    }

    #[test]
    fn test_scan_skips_repository_on_probe_failure() {
        let lister = FakeLister::new(&[
            ("/ws/src", &["broken", "healthy"]),
            ("/ws/src/broken", &[".git"]),
            ("/ws/src/healthy", &[".git"]),
        ]);
        // "broken" is absent from the probe map: its revision cannot be
        // determined.
        let git = FakeGit::new(&[("/ws/src/healthy", "ccc333")]);

        let scanner = Scanner::new(&lister, &git, "golang");
        let document = scanner.scan(&Workspace::new("/ws/src"));

        assert_eq!(paths(&document), vec!["healthy"]);
    }

    #[test]
    fn test_scan_skips_unlistable_subtree() {
        // "locked" is listed as a child but cannot itself be listed; its
        // sibling must still be scanned.
        let lister = FakeLister::new(&[
            ("/ws/src", &["locked", "open"]),
            ("/ws/src/open", &[".git"]),
        ]);
        let git = FakeGit::new(&[("/ws/src/open", "ddd444")]);

        let scanner = Scanner::new(&lister, &git, "golang");
        let document = scanner.scan(&Workspace::new("/ws/src"));

        assert_eq!(paths(&document), vec!["open"]);
    }

    #[test]
    fn test_scan_unlistable_root_yields_empty_document() {
        let lister = FakeLister::new(&[]);
        let git = FakeGit::new(&[]);

        let scanner = Scanner::new(&lister, &git, "golang");
        let document = scanner.scan(&Workspace::new("/nonexistent"));

        assert!(document.is_empty());
    }

    #[test]
    fn test_scan_never_records_the_marker_as_a_segment() {
        // A directory literally named .git at namespace level is neither a
        // segment nor a repository.
        let lister = FakeLister::new(&[
            ("/ws/src", &[".git", "alpha"]),
            ("/ws/src/alpha", &[".git"]),
        ]);
        let git = FakeGit::new(&[("/ws/src/alpha", "aaa111")]);

        let scanner = Scanner::new(&lister, &git, "golang");
        let document = scanner.scan(&Workspace::new("/ws/src"));

        assert_eq!(paths(&document), vec!["alpha"]);
    }

    #[test]
    fn test_fs_lister_sorts_and_ignores_files() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("zeta")).unwrap();
        fs::create_dir(temp.path().join("alpha")).unwrap();
        fs::create_dir(temp.path().join("mid")).unwrap();
        fs::write(temp.path().join("file.txt"), b"not a dir").unwrap();

        let lister = FsLister::new();
        let names = lister.child_dirs(temp.path()).unwrap();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_fs_lister_missing_directory() {
        let lister = FsLister::new();
        assert!(lister.child_dirs(Path::new("/nonexistent/gopin-dir")).is_err());
    }

    #[test]
    fn test_scan_real_filesystem_tree() {
        // Real lister, stubbed probe: the traversal itself runs against an
        // actual directory tree.
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("alpha/.git")).unwrap();
        fs::create_dir_all(root.join("group/beta/.git")).unwrap();
        fs::create_dir_all(root.join("group/empty")).unwrap();

        let alpha = root.join("alpha");
        let beta = root.join("group/beta");
        let git = FakeGit {
            revisions: BTreeMap::from([
                (alpha, "aaa111".to_string()),
                (beta, "bbb222".to_string()),
            ]),
        };

        let lister = FsLister::new();
        let scanner = Scanner::new(&lister, &git, "golang");
        let document = scanner.scan(&Workspace::new(root));

        assert_eq!(paths(&document), vec!["alpha", "group/beta"]);
    }
}
