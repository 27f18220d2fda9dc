//! Discovery of `main.tf` files under an examples tree.
//!
//! The walker recursively visits the examples directory, collecting every
//! file named `main.tf` (case-insensitive) while skipping any subtree
//! rooted at a `.terraform` directory and any configured exclude patterns.

use crate::config::Config;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// File name the rewriter operates on.
pub const TARGET_FILE: &str = "main.tf";

/// Directories whose subtrees are never visited.
pub const SKIP_DIRS: &[&str] = &[".terraform"];

/// Directory walker for `main.tf` discovery.
pub struct Walker {
    /// Configuration for walk behavior
    config: Config,
}

impl Walker {
    /// Create a new walker with the given configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Find all `main.tf` files under `root`, in walk order.
    ///
    /// A missing root directory yields an empty list; the absence of
    /// files is a no-op downstream, not an error.
    #[must_use]
    pub fn find_target_files(&self, root: &Path) -> Vec<PathBuf> {
        if !root.exists() {
            tracing::warn!(root = %root.display(), "Examples directory does not exist, nothing to rewrite");
            return Vec::new();
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(self.config.scan.follow_links)
            .into_iter()
            .filter_entry(|e| !self.should_skip(e))
        {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read directory entry");
                    continue;
                }
            };

            let file_path = entry.path();

            // Skip directories
            if file_path.is_dir() {
                continue;
            }

            if !is_target_file(file_path) {
                continue;
            }

            tracing::debug!(file = %file_path.display(), "Discovered target file");
            files.push(file_path.to_path_buf());
        }

        tracing::info!(root = %root.display(), count = files.len(), "Discovery complete");
        files
    }

    /// Check if an entry should be skipped (pruning its subtree for
    /// directories).
    fn should_skip(&self, entry: &DirEntry) -> bool {
        let Some(name) = entry.path().file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        if entry.file_type().is_dir() && SKIP_DIRS.iter().any(|s| name == *s) {
            tracing::debug!(path = %entry.path().display(), reason = "known skip directory", "Skipping path");
            return true;
        }

        if self.config.scan.exclude_patterns.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(name))
                .unwrap_or(false)
        }) {
            tracing::debug!(path = %entry.path().display(), reason = "matches exclude pattern", "Skipping path");
            return true;
        }

        false
    }
}

/// Check if a file is a rewrite target (`main.tf`, case-insensitive).
fn is_target_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.trim().eq_ignore_ascii_case(TARGET_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_finds_nested_main_tf() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(&root.join("eks/main.tf"), "");
        write(&root.join("eks/deep/nested/main.tf"), "");
        write(&root.join("eks/outputs.tf"), "");

        let walker = Walker::new(&Config::default());
        let files = walker.find_target_files(root);

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.ends_with("main.tf")));
    }

    #[test]
    fn test_case_insensitive_match() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(&root.join("upper/MAIN.TF"), "");

        let walker = Walker::new(&Config::default());
        assert_eq!(walker.find_target_files(root).len(), 1);
    }

    #[test]
    fn test_skips_terraform_subtrees() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(&root.join("eks/main.tf"), "");
        write(&root.join("eks/.terraform/modules/vpc/main.tf"), "");
        write(&root.join(".terraform/main.tf"), "");

        let walker = Walker::new(&Config::default());
        let files = walker.find_target_files(root);

        assert_eq!(files.len(), 1);
        assert!(files[0].starts_with(root.join("eks")));
    }

    #[test]
    fn test_exclude_patterns() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(&root.join("keep/main.tf"), "");
        write(&root.join("skip-me/main.tf"), "");

        let mut config = Config::default();
        config.scan.exclude_patterns = vec!["skip-*".to_string()];
        let walker = Walker::new(&config);
        let files = walker.find_target_files(root);

        assert_eq!(files.len(), 1);
        assert!(files[0].starts_with(root.join("keep")));
    }

    #[test]
    fn test_missing_root_yields_empty() {
        let walker = Walker::new(&Config::default());
        let files = walker.find_target_files(Path::new("/nonexistent/tfshift-test"));
        assert!(files.is_empty());
    }
}
