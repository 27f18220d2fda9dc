//! Literal application of a resolved source map to a file's text.

use crate::rewrite::SourceMap;

/// Produce new text by replacing, in map order, every occurrence of each
/// mapped source string with its replacement.
///
/// Exact substring match, no regex. Occurrences of a mapped string
/// outside `source` lines are replaced too; callers rely on the mapper
/// only capturing strings specific enough for this to be safe in
/// practice.
#[must_use]
pub fn apply_source_map(text: &str, map: &SourceMap) -> String {
    let mut out = text.to_string();
    for (original, replacement) in map {
        out = out.replace(original, replacement);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_replaces_single_occurrence() {
        let mut map = SourceMap::new();
        map.insert("\"../modules/irsa\"".to_string(), "\"url//modules/irsa?ref=v1\"".to_string());

        let text = "module \"irsa\" {\n  source = \"../modules/irsa\"\n}\n";
        let out = apply_source_map(text, &map);

        assert_eq!(out, "module \"irsa\" {\n  source = \"url//modules/irsa?ref=v1\"\n}\n");
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let mut map = SourceMap::new();
        map.insert("\"../modules/vpc\"".to_string(), "\"X\"".to_string());

        let text = concat!(
            "  source = \"../modules/vpc\"\n",
            "  # also mentions \"../modules/vpc\" in a comment\n",
        );
        let out = apply_source_map(text, &map);

        assert!(!out.contains("\"../modules/vpc\""));
        assert_eq!(out.matches("\"X\"").count(), 2);
    }

    #[test]
    fn test_empty_map_leaves_text_untouched() {
        let text = "resource \"aws_vpc\" \"this\" {}\n";
        assert_eq!(apply_source_map(text, &SourceMap::new()), text);
    }

    #[test]
    fn test_applies_entries_in_map_order() {
        let mut map = SourceMap::new();
        map.insert("\"../modules/a\"".to_string(), "\"../modules/b\"".to_string());
        map.insert("\"../modules/b\"".to_string(), "\"X\"".to_string());

        // Replacements apply sequentially, so an earlier entry's output is
        // visible to later entries
        let out = apply_source_map("source = \"../modules/a\"\n", &map);
        assert_eq!(out, "source = \"X\"\n");
    }
}
