//! # tfshift
//!
//! A Terraform example source rewriter.
//!
//! tfshift walks an examples tree for `main.tf` files and rewrites their
//! `source = "..."` references, toggling between local relative-path
//! module references and GitHub-hosted references pinned to a version
//! tag.
//!
//! ## Features
//!
//! - **Three rewrite modes**: re-pin GitHub refs to a new tag, convert
//!   local paths to GitHub URLs, or convert GitHub URLs back to local
//!   paths
//! - **Heuristic line matching**: raw-text `source` detection, no HCL
//!   parsing, so comments and formatting pass through untouched
//! - **Dry runs**: plan substitutions without touching any file
//! - **Multiple output formats**: JSON and plain text change reports
//!
//! ## Example
//!
//! ```rust,no_run
//! use tfshift::{Config, ReportFormat, Rewriter};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut config = Config::default();
//!     config.rewrite.to_github = true;
//!
//!     let rewriter = Rewriter::new(config);
//!     let result = rewriter
//!         .rewrite_tree("../examples".as_ref(), "..".as_ref(), false)
//!         .await?;
//!
//!     let report = result.generate_report(ReportFormat::Text)?;
//!     println!("{}", report);
//!
//!     Ok(())
//! }
//! ```

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod reporter;
pub mod rewrite;
pub mod types;
pub mod walker;

// Re-export commonly used types at crate root
pub use config::Config;
pub use error::{Result, TfShiftError};
pub use types::{FileRewrite, ReportFormat, RewriteMode, RewriteResult, Substitution};

use crate::error::ErrorCollector;
use crate::rewrite::{apply_source_map, map_sources, resolve_replacements, SourceMap};
use std::path::{Path, PathBuf};

/// Main rewrite orchestrator that coordinates discovery and rewriting.
///
/// The `Rewriter` is the primary entry point for using tfshift as a
/// library. It handles:
/// - Discovering `main.tf` files under an examples tree
/// - Mapping and resolving source substitutions per file
/// - Overwriting files in place (unless running dry)
///
/// # Example
///
/// ```rust,no_run
/// use tfshift::{Config, Rewriter};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = Config::default();
///     let rewriter = Rewriter::new(config);
///
///     let result = rewriter
///         .rewrite_tree("../examples".as_ref(), "..".as_ref(), true)
///         .await?;
///
///     println!("{} files would change", result.files_changed());
///     Ok(())
/// }
/// ```
pub struct Rewriter {
    config: Config,
}

impl Rewriter {
    /// Create a new rewriter with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Rewrite every `main.tf` under `examples_root`.
    ///
    /// Files are processed strictly one at a time in walk order; each
    /// file's source map is built, resolved, applied, and discarded
    /// before the next file is read. With `dry_run` set, no file is
    /// written and the result only describes what would change.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured mode flags conflict, or if
    /// reading/writing a file fails (unless `continue_on_error` is
    /// enabled, in which case per-file failures are logged and skipped).
    pub async fn rewrite_tree(
        &self,
        examples_root: &Path,
        project_root: &Path,
        dry_run: bool,
    ) -> Result<RewriteResult> {
        let mode = self.config.mode()?;

        // Canonical absolute paths so the relative-path arithmetic in
        // to-local mode sees comparable components
        let examples_root = canonical_or_given(examples_root);
        let project_root = canonical_or_given(project_root);

        tracing::info!(
            examples_root = %examples_root.display(),
            project_root = %project_root.display(),
            mode = %mode,
            dry_run,
            "Starting rewrite"
        );

        let files = walker::Walker::new(&self.config).find_target_files(&examples_root);

        let mut result = RewriteResult::new(mode, dry_run);
        let mut error_collector = ErrorCollector::new();

        for path in files {
            match self.rewrite_file(&path, &project_root, mode, dry_run).await {
                Ok(file_rewrite) => {
                    result.files.push(file_rewrite);
                }
                Err(e) => {
                    if self.config.scan.continue_on_error && e.is_recoverable() {
                        tracing::warn!(
                            file = %path.display(),
                            "failed to rewrite file, continuing: {}",
                            e
                        );
                        error_collector.add(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        tracing::info!(
            files = result.files_scanned(),
            changed = result.files_changed(),
            substitutions = result.substitution_count(),
            errors = error_collector.count(),
            "Rewrite complete"
        );

        Ok(result)
    }

    /// Build the resolved source map for one file without applying it.
    ///
    /// Returns the file's original text alongside the map; useful for
    /// inspecting what a rewrite would do to a single file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub async fn plan_file(
        &self,
        path: &Path,
        project_root: &Path,
        mode: RewriteMode,
    ) -> Result<(String, SourceMap)> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| TfShiftError::io(path, e, file!(), line!()))?;

        let mut map = map_sources(&content, mode, &self.config);
        resolve_replacements(&mut map, mode, path, project_root, &self.config);

        Ok((content, map))
    }

    /// Rewrite a single file in place (or plan it, under `dry_run`).
    async fn rewrite_file(
        &self,
        path: &Path,
        project_root: &Path,
        mode: RewriteMode,
        dry_run: bool,
    ) -> Result<FileRewrite> {
        let (content, map) = self.plan_file(path, project_root, mode).await?;

        let rewritten = apply_source_map(&content, &map);
        let changed = rewritten != content;

        if changed && !dry_run {
            tokio::fs::write(path, &rewritten)
                .await
                .map_err(|e| TfShiftError::io(path, e, file!(), line!()))?;
        }

        tracing::debug!(
            file = %path.display(),
            substitutions = map.len(),
            changed,
            "Processed file"
        );

        Ok(FileRewrite {
            path: path.to_path_buf(),
            substitutions: map
                .into_iter()
                .map(|(original, replacement)| Substitution { original, replacement })
                .collect(),
            changed,
        })
    }
}

/// Canonicalize a path, falling back to the given path when it does not
/// exist (the walker then reports it as empty).
fn canonical_or_given(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
