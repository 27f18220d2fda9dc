//! JSON report generator.

use crate::config::Config;
use crate::reporter::ReportGenerator;
use crate::error::Result;
use crate::types::{FileRewrite, RewriteMode, RewriteResult};
use serde::Serialize;

/// JSON report generator.
pub struct JsonReporter {
    /// Whether to pretty-print the output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            pretty: config.output.pretty,
        }
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, result: &RewriteResult) -> Result<String> {
        let report = JsonReport::from(result);

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };

        json.map_err(|e| crate::err!(ReportGeneration {
            message: format!("Failed to serialize JSON report: {e}"),
        }))
    }
}

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    /// Report metadata
    pub metadata: ReportMetadata,
    /// Summary statistics
    pub summary: ReportSummary,
    /// Per-file outcomes
    pub files: Vec<JsonFileRewrite>,
}

impl From<&RewriteResult> for JsonReport {
    fn from(result: &RewriteResult) -> Self {
        Self {
            metadata: ReportMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                mode: result.mode,
                dry_run: result.dry_run,
            },
            summary: ReportSummary {
                files_scanned: result.files_scanned(),
                files_changed: result.files_changed(),
                total_substitutions: result.substitution_count(),
            },
            files: result.files.iter().map(JsonFileRewrite::from).collect(),
        }
    }
}

/// Report metadata.
#[derive(Debug, Serialize)]
pub struct ReportMetadata {
    /// tfshift version
    pub version: String,
    /// Report generation timestamp
    pub timestamp: String,
    /// Rewrite mode the run executed under
    pub mode: RewriteMode,
    /// Whether files were left untouched
    pub dry_run: bool,
}

/// Report summary.
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    /// Number of files scanned
    pub files_scanned: usize,
    /// Number of files whose text changed (or would change)
    pub files_changed: usize,
    /// Total resolved substitutions
    pub total_substitutions: usize,
}

/// Per-file report entry.
#[derive(Debug, Serialize)]
pub struct JsonFileRewrite {
    /// Path of the processed file
    pub path: String,
    /// Whether the rewritten text differs from the original
    pub changed: bool,
    /// Resolved substitutions, in discovery order
    pub substitutions: Vec<JsonSubstitution>,
}

impl From<&FileRewrite> for JsonFileRewrite {
    fn from(file: &FileRewrite) -> Self {
        Self {
            path: file.path.display().to_string(),
            changed: file.changed,
            substitutions: file
                .substitutions
                .iter()
                .map(|s| JsonSubstitution {
                    original: s.original.clone(),
                    replacement: s.replacement.clone(),
                })
                .collect(),
        }
    }
}

/// A single substitution in the JSON report.
#[derive(Debug, Serialize)]
pub struct JsonSubstitution {
    /// The matched source string
    pub original: String,
    /// The replacement it resolved to
    pub replacement: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Substitution;
    use std::path::PathBuf;

    fn sample_result() -> RewriteResult {
        let mut result = RewriteResult::new(RewriteMode::ToGithub, false);
        result.files.push(FileRewrite {
            path: PathBuf::from("examples/eks/main.tf"),
            substitutions: vec![Substitution {
                original: "\"../modules/irsa\"".to_string(),
                replacement: "\"github.com/aws-ia/terraform-aws-eks-blueprints//modules/irsa?ref=v5.0.0\"".to_string(),
            }],
            changed: true,
        });
        result
    }

    #[test]
    fn test_json_report_structure() {
        let reporter = JsonReporter::new(&Config::default());
        let json = reporter.generate(&sample_result()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed["metadata"]["version"].is_string());
        assert_eq!(parsed["metadata"]["mode"], "to-github");
        assert_eq!(parsed["summary"]["files_scanned"], 1);
        assert_eq!(parsed["summary"]["files_changed"], 1);
        assert_eq!(parsed["files"][0]["substitutions"][0]["original"], "\"../modules/irsa\"");
    }

    #[test]
    fn test_compact_output() {
        let mut config = Config::default();
        config.output.pretty = false;
        let json = JsonReporter::new(&config).generate(&sample_result()).unwrap();
        assert!(!json.contains('\n'));
    }
}
