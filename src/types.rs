//! Core data types used throughout tfshift.
//!
//! This module defines the fundamental data structures for representing:
//! - Rewrite modes and per-file source substitutions
//! - Run results for reporting
//! - Report formats

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::PathBuf;

/// How a run rewrites matched `source = "..."` references.
///
/// The three strategies are mutually exclusive per run and are derived
/// from the `update_tag` / `to_github` configuration flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewriteMode {
    /// Re-pin GitHub-hosted sources to the configured tag, replacing any
    /// existing `?ref=...` suffix.
    UpdateTag,
    /// Convert local relative-path sources into GitHub URLs pinned to the
    /// configured tag.
    ToGithub,
    /// Convert GitHub-hosted sources back into local relative paths.
    ToLocal,
}

impl Display for RewriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UpdateTag => write!(f, "update-tag"),
            Self::ToGithub => write!(f, "to-github"),
            Self::ToLocal => write!(f, "to-local"),
        }
    }
}

/// A single resolved substitution within one file.
///
/// Both strings include their surrounding quote characters exactly as
/// they appear in (or will be written to) the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    /// The matched source string, as captured from the file
    pub original: String,

    /// The replacement it resolves to under the active mode
    pub replacement: String,
}

/// Outcome of planning or rewriting a single `main.tf` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRewrite {
    /// Path of the processed file
    pub path: PathBuf,

    /// Resolved substitutions, in the order they were discovered
    pub substitutions: Vec<Substitution>,

    /// Whether the rewritten text differs from the original
    pub changed: bool,
}

/// Result of rewriting an examples tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteResult {
    /// The mode this run executed under
    pub mode: RewriteMode,

    /// Whether files were left untouched (plan only)
    pub dry_run: bool,

    /// Per-file outcomes, in walk order
    pub files: Vec<FileRewrite>,
}

impl RewriteResult {
    /// Create an empty result for a run in the given mode.
    #[must_use]
    pub fn new(mode: RewriteMode, dry_run: bool) -> Self {
        Self {
            mode,
            dry_run,
            files: Vec::new(),
        }
    }

    /// Number of files scanned.
    #[must_use]
    pub fn files_scanned(&self) -> usize {
        self.files.len()
    }

    /// Number of files whose text changed (or would change, in a dry run).
    #[must_use]
    pub fn files_changed(&self) -> usize {
        self.files.iter().filter(|f| f.changed).count()
    }

    /// Total number of resolved substitutions across all files.
    #[must_use]
    pub fn substitution_count(&self) -> usize {
        self.files.iter().map(|f| f.substitutions.len()).sum()
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: Self) {
        self.files.extend(other.files);
    }

    /// Generate a report in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if report generation fails.
    pub fn generate_report(&self, format: ReportFormat) -> crate::Result<String> {
        let config = crate::Config::default();
        let reporter = crate::reporter::Reporter::new(&config);
        reporter.generate(self, format)
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum ReportFormat {
    /// JSON format
    #[default]
    Json,
    /// Plain text format
    Text,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_display() {
        assert_eq!(RewriteMode::UpdateTag.to_string(), "update-tag");
        assert_eq!(RewriteMode::ToGithub.to_string(), "to-github");
        assert_eq!(RewriteMode::ToLocal.to_string(), "to-local");
    }

    #[test]
    fn test_result_counters() {
        let mut result = RewriteResult::new(RewriteMode::ToGithub, false);
        result.files.push(FileRewrite {
            path: PathBuf::from("examples/eks/main.tf"),
            substitutions: vec![Substitution {
                original: "\"../modules/irsa\"".to_string(),
                replacement: "\"github.com/org/repo//modules/irsa?ref=v1\"".to_string(),
            }],
            changed: true,
        });
        result.files.push(FileRewrite {
            path: PathBuf::from("examples/plain/main.tf"),
            substitutions: Vec::new(),
            changed: false,
        });

        assert_eq!(result.files_scanned(), 2);
        assert_eq!(result.files_changed(), 1);
        assert_eq!(result.substitution_count(), 1);
    }

    #[test]
    fn test_result_merge() {
        let mut a = RewriteResult::new(RewriteMode::ToLocal, false);
        let mut b = RewriteResult::new(RewriteMode::ToLocal, false);
        b.files.push(FileRewrite {
            path: PathBuf::from("examples/a/main.tf"),
            substitutions: Vec::new(),
            changed: false,
        });
        a.merge(b);
        assert_eq!(a.files_scanned(), 1);
    }
}
