//! Depth-first discovery of kustomize directories.

use crate::validator::KUSTOMIZATION_FILE;

use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Walks a directory tree looking for directories that contain a
/// `kustomization.yaml`.
///
/// Directories are visited in pre-order with siblings sorted by name, so
/// the order is stable across runs. A match does not stop the walk from
/// descending into the matched directory.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: PathBuf,
    exclude: Vec<Pattern>,
    follow_links: bool,
}

impl TreeWalker {
    /// Creates a walker rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exclude: Vec::new(),
            follow_links: false,
        }
    }

    /// Skips directories whose root-relative path matches any pattern.
    #[must_use]
    pub fn exclude(mut self, patterns: Vec<Pattern>) -> Self {
        self.exclude = patterns;
        self
    }

    /// Sets whether symlinked directories are descended into.
    #[must_use]
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily yields every kustomize directory under the root, root included.
    ///
    /// Only a failure to read the root itself is yielded as an error.
    /// Directories below it that cannot be read are logged and skipped.
    pub fn kustomize_dirs(&self) -> impl Iterator<Item = Result<PathBuf, walkdir::Error>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !self.is_excluded(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => {
                    if entry.file_type().is_dir() && is_kustomize_dir(entry.path()) {
                        Some(Ok(entry.into_path()))
                    } else {
                        None
                    }
                }
                Err(e) if e.depth() == 0 => Some(Err(e)),
                Err(e) => {
                    let path = e.path().map_or_else(String::new, |p| p.display().to_string());
                    warn!("Skipping unreadable directory {path}: {e}");
                    None
                }
            })
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let relative = entry
            .path()
            .strip_prefix(&self.root)
            .unwrap_or_else(|_| entry.path());
        let excluded = self.exclude.iter().any(|p| p.matches_path(relative));
        if excluded {
            debug!("Excluding: {}", entry.path().display());
        }
        excluded
    }
}

/// Returns true if `dir` directly contains a non-directory entry named
/// `kustomization.yaml`. A dangling symlink counts.
#[must_use]
pub fn is_kustomize_dir(dir: &Path) -> bool {
    let path = dir.join(KUSTOMIZATION_FILE);
    path.symlink_metadata().is_ok() && !path.is_dir()
}
