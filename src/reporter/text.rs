//! Plain text report generator.

use crate::config::Config;
use crate::reporter::ReportGenerator;
use crate::error::Result;
use crate::types::RewriteResult;
use colored::Colorize;
use comfy_table::{Cell, ContentArrangement, Table};

/// Text report generator for CLI output.
pub struct TextReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl TextReporter {
    /// Create a new text reporter.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            use_colors: config.output.colored,
            verbose: config.output.verbose,
        }
    }
}

impl ReportGenerator for TextReporter {
    fn generate(&self, result: &RewriteResult) -> Result<String> {
        let mut output = String::new();

        // Header
        output.push_str(&self.format_header(result));
        output.push('\n');

        // Summary
        output.push_str(&self.format_summary(result));
        output.push('\n');

        // Substitution table
        if result.substitution_count() > 0 {
            output.push_str(&self.format_substitutions(result));
            output.push('\n');
        }

        // Unchanged files only appear in verbose mode
        if self.verbose {
            let unchanged = self.format_unchanged(result);
            if !unchanged.is_empty() {
                output.push_str(&unchanged);
                output.push('\n');
            }
        }

        Ok(output)
    }
}

impl TextReporter {
    /// Format the report header.
    fn format_header(&self, result: &RewriteResult) -> String {
        let title = "tfshift Rewrite";
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let dry_run = if result.dry_run { " [dry-run]" } else { "" };

        if self.use_colors {
            format!(
                "\n{}{} {} {}\n{}\n",
                title.bright_white().bold(),
                dry_run.yellow().bold(),
                version.dimmed(),
                format!("({})", timestamp).dimmed(),
                "=".repeat(80).bright_blue(),
            )
        } else {
            format!(
                "\n{}{} {} ({})\n{}\n",
                title,
                dry_run,
                version,
                timestamp,
                "=".repeat(80),
            )
        }
    }

    /// Format the summary section.
    fn format_summary(&self, result: &RewriteResult) -> String {
        let mut output = String::new();

        let section_title = if self.use_colors {
            "Summary".bright_cyan().bold().to_string()
        } else {
            "Summary".to_string()
        };

        output.push_str(&format!("\n{section_title}\n"));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        let scanned = result.files_scanned();
        let changed = result.files_changed();
        let substitutions = result.substitution_count();

        if self.use_colors {
            output.push_str(&format!(
                "  Mode: {} | {} {} scanned | {} {} | {} {}\n",
                result.mode.to_string().bright_white().bold(),
                scanned.to_string().bold(),
                if scanned == 1 { "file" } else { "files" },
                changed.to_string().green().bold(),
                "rewritten",
                substitutions.to_string().blue(),
                if substitutions == 1 { "substitution" } else { "substitutions" }
            ));
        } else {
            output.push_str(&format!(
                "  Mode: {} | {} {} scanned | {} rewritten | {} {}\n",
                result.mode,
                scanned,
                if scanned == 1 { "file" } else { "files" },
                changed,
                substitutions,
                if substitutions == 1 { "substitution" } else { "substitutions" }
            ));
        }

        output
    }

    /// Format the per-file substitution table.
    fn format_substitutions(&self, result: &RewriteResult) -> String {
        let mut output = String::new();

        let section_title = if self.use_colors {
            "Substitutions".bright_cyan().bold().to_string()
        } else {
            "Substitutions".to_string()
        };

        output.push_str(&format!("\n{section_title}\n"));

        let mut table = Table::new();
        table
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("File"),
                Cell::new("Original"),
                Cell::new("Replacement"),
            ]);

        for file in &result.files {
            for substitution in &file.substitutions {
                table.add_row(vec![
                    Cell::new(file.path.display()),
                    Cell::new(&substitution.original),
                    Cell::new(&substitution.replacement),
                ]);
            }
        }

        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    /// Format the list of scanned-but-unchanged files.
    fn format_unchanged(&self, result: &RewriteResult) -> String {
        let unchanged: Vec<_> = result.files.iter().filter(|f| !f.changed).collect();
        if unchanged.is_empty() {
            return String::new();
        }

        let mut output = String::new();
        let section_title = if self.use_colors {
            "Unchanged".bright_cyan().bold().to_string()
        } else {
            "Unchanged".to_string()
        };

        output.push_str(&format!("\n{section_title}\n"));
        for file in unchanged {
            output.push_str(&format!("  {}\n", file.path.display()));
        }
        output
    }
}
