//! Source mapping: extract rewrite candidates from a file's text.

use crate::config::Config;
use crate::rewrite::SourceMap;
use crate::types::RewriteMode;

/// Scan `content` for `source` assignment lines and collect the quoted
/// source strings that need rewriting under `mode`.
///
/// For each line whose trimmed content starts with the literal token
/// `source`, the line is space-stripped and partitioned on the first
/// `=`; the remainder is the source string, surrounding quotes included.
/// An entry is added only if the string matches the mode's predicate:
///
/// - [`RewriteMode::ToGithub`]: starts with `"../` (local relative path)
/// - [`RewriteMode::ToLocal`] / [`RewriteMode::UpdateTag`]: starts with
///   the quoted canonical GitHub URL
///
/// Everything else is left untouched (absent from the map). Replacement
/// values start empty and are filled in by the resolver.
#[must_use]
pub fn map_sources(content: &str, mode: RewriteMode, config: &Config) -> SourceMap {
    let mut map = SourceMap::new();
    let github_prefix = config.quoted_github_prefix();

    for line in content.lines() {
        let trimmed = line.trim();
        if !trimmed.starts_with("source") {
            continue;
        }

        let compact = trimmed.replace(' ', "");
        let Some((_, value)) = compact.split_once('=') else {
            // No assignment on this line, nothing to extract
            continue;
        };

        let wanted = match mode {
            RewriteMode::ToGithub => value.starts_with("\"../"),
            RewriteMode::ToLocal | RewriteMode::UpdateTag => value.starts_with(&github_prefix),
        };

        if wanted {
            tracing::debug!(source = %value, "Mapped source for rewriting");
            map.entry(value.to_string()).or_default();
        }
    }

    map
}
