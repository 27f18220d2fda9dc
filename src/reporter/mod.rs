//! Report generation module.
//!
//! This module provides report generation in multiple formats:
//! - JSON: Machine-readable structured output
//! - Text: Human-readable CLI output
//!
//! # Example
//!
//! ```rust,no_run
//! use tfshift::reporter::Reporter;
//! use tfshift::{Config, ReportFormat, RewriteMode, RewriteResult};
//!
//! let config = Config::default();
//! let reporter = Reporter::new(&config);
//!
//! let result = RewriteResult::new(RewriteMode::ToGithub, true);
//! let json = reporter.generate(&result, ReportFormat::Json).unwrap();
//! let text = reporter.generate(&result, ReportFormat::Text).unwrap();
//! ```

mod json;
mod text;

use crate::config::Config;
use crate::error::Result;
use crate::types::{ReportFormat, RewriteResult};

pub use json::JsonReporter;
pub use text::TextReporter;

/// Report generator that supports multiple output formats.
pub struct Reporter {
    config: Config,
}

impl Reporter {
    /// Create a new reporter with the given configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Generate a report in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if report generation fails.
    pub fn generate(&self, result: &RewriteResult, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => JsonReporter::new(&self.config).generate(result),
            ReportFormat::Text => TextReporter::new(&self.config).generate(result),
        }
    }
}

/// Trait for report generators.
pub trait ReportGenerator {
    /// Generate a report from a rewrite result.
    ///
    /// # Errors
    ///
    /// Returns an error if generation fails.
    fn generate(&self, result: &RewriteResult) -> Result<String>;
}
