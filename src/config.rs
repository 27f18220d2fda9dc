//! Configuration module for tfshift.
//!
//! This module handles loading and validating configuration from:
//! - YAML configuration files (`tfshift.yaml`)
//! - Environment variables
//! - CLI arguments
//!
//! # Configuration File Format
//!
//! ```yaml
//! # tfshift.yaml
//!
//! # Rewrite options
//! rewrite:
//!   tag_version: v4.4.0
//!   github_url: github.com/aws-ia/terraform-aws-eks-blueprints
//!   project_name: terraform-aws-eks-blueprints
//!   to_github: false
//!   update_tag: false
//!
//! # Scanning options
//! scan:
//!   exclude_patterns:
//!     - "*.disabled"
//!   continue_on_error: false
//!   follow_links: false
//!
//! # Output options
//! output:
//!   colored: true
//!   verbose: false
//!   pretty: true
//! ```

use crate::error::{Result, TfShiftError};
use crate::types::RewriteMode;
use serde::{Deserialize, Serialize};

/// Default tag to pin GitHub sources to.
pub const DEFAULT_TAG_VERSION: &str = "v4.4.0";

/// Canonical GitHub repository URL for the rewritten sources.
pub const DEFAULT_GITHUB_URL: &str = "github.com/aws-ia/terraform-aws-eks-blueprints";

/// Name of the project the examples tree belongs to.
pub const DEFAULT_PROJECT_NAME: &str = "terraform-aws-eks-blueprints";

/// Rewrite options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteOptions {
    /// Tag/version to pin GitHub sources to (e.g., "v4.4.0").
    pub tag_version: String,

    /// Canonical GitHub repository URL, without scheme.
    pub github_url: String,

    /// Name of the project the examples belong to.
    pub project_name: String,

    /// Convert local relative-path sources into GitHub URLs.
    pub to_github: bool,

    /// Re-pin GitHub sources to `tag_version`.
    pub update_tag: bool,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            tag_version: DEFAULT_TAG_VERSION.to_string(),
            github_url: DEFAULT_GITHUB_URL.to_string(),
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            to_github: false,
            update_tag: false,
        }
    }
}

/// Scanning options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanOptions {
    /// Patterns to exclude from scanning (glob patterns matched against
    /// file/directory names). `.terraform` directories are always skipped.
    pub exclude_patterns: Vec<String>,

    /// Continue rewriting remaining files if one fails.
    pub continue_on_error: bool,

    /// Follow symbolic links while walking the examples tree.
    pub follow_links: bool,
}

/// Output options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputOptions {
    /// Use colored output.
    #[serde(default = "default_true")]
    pub colored: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Pretty-print JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

/// Main configuration structure with nested sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rewrite options
    pub rewrite: RewriteOptions,

    /// Scanning options
    pub scan: ScanOptions,

    /// Output options
    pub output: OutputOptions,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rewrite: RewriteOptions::default(),
            scan: ScanOptions {
                exclude_patterns: Vec::new(),
                continue_on_error: false,
                follow_links: false,
            },
            output: OutputOptions {
                colored: true,
                verbose: false,
                pretty: true,
            },
        }
    }
}

impl Config {
    /// Load configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn from_yaml(content: &str) -> Result<Self> {
        tracing::debug!("Parsing configuration from YAML");
        // First, expand environment variables
        let expanded = expand_env_vars(content);

        let config: Config = serde_yaml::from_str(&expanded).map_err(|e| TfShiftError::ConfigParse {
            message: e.to_string(),
            source: None,
            src_path: file!(),
            src_line: line!(),
        })?;

        tracing::debug!(
            tag_version = %config.rewrite.tag_version,
            to_github = config.rewrite.to_github,
            update_tag = config.rewrite.update_tag,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Generate an example YAML configuration.
    #[must_use]
    pub fn example_yaml() -> String {
        r#"# tfshift Configuration File

# Rewrite options
rewrite:
  # Tag to pin GitHub-hosted sources to
  tag_version: v4.4.0

  # Canonical GitHub repository URL (no scheme)
  github_url: github.com/aws-ia/terraform-aws-eks-blueprints

  # Project name (the repository root directory name)
  project_name: terraform-aws-eks-blueprints

  # Convert local relative-path sources into GitHub URLs
  to_github: false

  # Re-pin GitHub sources to tag_version (mutually exclusive with to_github)
  update_tag: false

# Scanning options
scan:
  # Patterns to exclude from scanning (glob patterns, matched against names).
  # Subtrees rooted at a `.terraform` directory are always skipped.
  # exclude_patterns:
  #   - "*.disabled"

  # Continue rewriting remaining files if one fails
  continue_on_error: false

  # Follow symbolic links while walking the examples tree
  follow_links: false

# Output options
output:
  # Use colored output in terminal
  colored: true

  # Enable verbose output
  verbose: false

  # Pretty-print JSON output
  pretty: true
"#
        .to_string()
    }

    /// Apply `TAG_VERSION`, `CONVERT_TO_GITHUB`, and `UPDATE_TAG`
    /// environment variables on top of the file-level configuration.
    ///
    /// Flag variables accept `1`, `true`, `yes`, `on` (case-insensitive)
    /// as true; any other value is false.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(tag) = std::env::var("TAG_VERSION") {
            if !tag.is_empty() {
                tracing::debug!(tag = %tag, "Using tag from TAG_VERSION environment variable");
                self.rewrite.tag_version = tag;
            }
        }

        if let Some(value) = env_flag("CONVERT_TO_GITHUB") {
            tracing::debug!(value, "Using CONVERT_TO_GITHUB environment variable");
            self.rewrite.to_github = value;
        }

        if let Some(value) = env_flag("UPDATE_TAG") {
            tracing::debug!(value, "Using UPDATE_TAG environment variable");
            self.rewrite.update_tag = value;
        }
    }

    /// Derive the rewrite mode from the configured flags.
    ///
    /// # Errors
    ///
    /// Returns `ModeConflict` when both `update_tag` and `to_github` are
    /// enabled: the two modes select different source-matching predicates
    /// and the combination is ambiguous.
    pub fn mode(&self) -> Result<RewriteMode> {
        match (self.rewrite.update_tag, self.rewrite.to_github) {
            (true, true) => Err(crate::err!(ModeConflict {})),
            (true, false) => Ok(RewriteMode::UpdateTag),
            (false, true) => Ok(RewriteMode::ToGithub),
            (false, false) => Ok(RewriteMode::ToLocal),
        }
    }

    /// The GitHub URL with a leading quote, as it appears at the start of
    /// a quoted source string.
    #[must_use]
    pub fn quoted_github_prefix(&self) -> String {
        format!("\"{}", self.rewrite.github_url)
    }
}

/// Read an environment variable as a boolean flag.
///
/// Returns `None` when the variable is unset or empty.
fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    if value.is_empty() {
        return None;
    }
    Some(parse_flag(&value))
}

/// Interpret a flag string: `1`, `true`, `yes`, `on` (case-insensitive)
/// are true, everything else is false.
pub(crate) fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Expand `${VAR}` and `$VAR` references against the process environment.
fn expand_env_vars(content: &str) -> String {
    let mut result = content.to_string();

    // Find all ${VAR} patterns
    let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();
    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    // Find all $VAR patterns (word boundary)
    let re = regex::Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").unwrap();
    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}
