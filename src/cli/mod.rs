//! Command-line interface module.
//!
//! This module defines the CLI structure using Clap, including
//! all commands, arguments, and options.
//!
//! # Commands
//!
//! - `rewrite`: Rewrite module sources in an examples tree
//! - `init`: Create an example configuration file
//! - `validate`: Validate a configuration file
//!
//! # Example Usage
//!
//! ```bash
//! # Convert local module references to GitHub refs pinned to a tag
//! tfshift rewrite ../examples --to-github --tag v5.0.0
//!
//! # Re-pin existing GitHub refs to a new tag
//! tfshift rewrite ../examples --update-tag --tag v4.5.0
//!
//! # Convert GitHub refs back to local paths (default mode)
//! tfshift rewrite ../examples --project-root ..
//!
//! # See what would change without touching any file
//! tfshift rewrite ../examples --to-github --dry-run --format json
//!
//! # Initialize configuration
//! tfshift init
//!
//! # Validate configuration
//! tfshift validate tfshift.yaml
//! ```
//!
//! The `TAG_VERSION`, `CONVERT_TO_GITHUB`, and `UPDATE_TAG` environment
//! variables are also honored (CLI flags take precedence).

use crate::types::ReportFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// tfshift - Terraform example source rewriter.
#[derive(Parser, Debug)]
#[command(
    name = "tfshift",
    author,
    version,
    about = "Terraform example source rewriter",
    long_about = "tfshift walks an examples tree for main.tf files and rewrites their \
                  source = \"...\" references, toggling between local relative-path \
                  module references and GitHub-hosted references pinned to a version tag."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "TFSHIFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite module sources in an examples tree
    #[command(visible_alias = "r")]
    Rewrite(RewriteArgs),

    /// Create an example configuration file
    Init,

    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Arguments for the rewrite command.
#[derive(Args, Debug)]
pub struct RewriteArgs {
    /// Examples tree to rewrite
    #[arg(value_name = "PATH", default_value = "../examples")]
    pub path: PathBuf,

    /// Project root the relative paths resolve against
    #[arg(long, value_name = "DIR", default_value = "..")]
    pub project_root: PathBuf,

    /// Tag to pin GitHub sources to (e.g., v4.5.0)
    #[arg(short, long, value_name = "TAG")]
    pub tag: Option<String>,

    /// Convert local relative-path sources into GitHub URLs
    #[arg(long, conflicts_with = "update_tag")]
    pub to_github: bool,

    /// Re-pin GitHub sources to the configured tag
    #[arg(long)]
    pub update_tag: bool,

    /// Plan substitutions without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Output format
    #[arg(short, long, default_value = "text", value_enum)]
    pub format: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Continue rewriting remaining files if one fails
    #[arg(long)]
    pub continue_on_error: bool,

    /// Patterns to exclude from scanning (glob patterns)
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude_patterns: Vec<String>,
}

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(value_name = "FILE", default_value = "tfshift.yaml")]
    pub config: PathBuf,
}
