//! Replacement resolution: one strategy per rewrite mode.

use crate::config::Config;
use crate::rewrite::{SourceMap, MODULES_SEGMENT};
use crate::types::RewriteMode;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static REF_SUFFIX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // Matches from the first '?' to the end of the source string,
    // closing quote included
    Regex::new(r"\?.*").expect("Invalid regex")
});

/// Fill in the replacement for every mapped source string.
///
/// `file_path` is the `main.tf` being processed; it only matters in
/// [`RewriteMode::ToLocal`], where replacements are relative paths from
/// that file's directory up to `project_root`.
pub fn resolve_replacements(
    map: &mut SourceMap,
    mode: RewriteMode,
    file_path: &Path,
    project_root: &Path,
    config: &Config,
) {
    match mode {
        RewriteMode::UpdateTag => resolve_update_tag(map, &config.rewrite.tag_version),
        RewriteMode::ToGithub => resolve_to_github(map, config),
        RewriteMode::ToLocal => resolve_to_local(map, file_path, project_root, config),
    }
}

/// Re-pin every mapped source to `tag`, replacing any existing
/// `?ref=...` suffix. Idempotent on the ref suffix.
fn resolve_update_tag(map: &mut SourceMap, tag: &str) {
    for (source, replacement) in map.iter_mut() {
        *replacement = format!("{}?ref={}\"", REF_SUFFIX_PATTERN.replace(source, ""), tag);
    }
}

/// Convert local relative-path sources into GitHub URLs pinned to the
/// configured tag.
///
/// Sources referencing a module subdirectory keep their module path as a
/// `//` subpath; anything else resolves to the repository root module.
fn resolve_to_github(map: &mut SourceMap, config: &Config) {
    let url = &config.rewrite.github_url;
    let tag = &config.rewrite.tag_version;

    for (source, replacement) in map.iter_mut() {
        *replacement = if source.contains(MODULES_SEGMENT) {
            let module_path = source.replace("../", "").replace('"', "");
            format!("\"{url}//{module_path}?ref={tag}\"")
        } else {
            format!("\"{url}?ref={tag}\"")
        };
    }
}

/// Convert GitHub-hosted sources back into local relative paths.
///
/// Module subpaths are preserved; root-module references collapse to the
/// relative path of the project root itself.
fn resolve_to_local(map: &mut SourceMap, file_path: &Path, project_root: &Path, config: &Config) {
    let file_dir = file_path.parent().unwrap_or_else(|| Path::new(""));
    let relative = relative_path(project_root, file_dir);

    for (source, replacement) in map.iter_mut() {
        *replacement = if source.contains(MODULES_SEGMENT) {
            let trimmed = REF_SUFFIX_PATTERN.replace(source, "");
            let local = trimmed
                .replace(&config.rewrite.github_url, &relative)
                .replace("//", "/")
                .replace('"', "");
            format!("\"{local}\"")
        } else {
            format!("\"{relative}\"")
        };
    }
}

/// Relative path from the directory `from` to the path `to`, with
/// forward-slash separators (`.` when the two coincide).
pub(crate) fn relative_path(to: &Path, from: &Path) -> String {
    let to_comps: Vec<_> = to.components().collect();
    let from_comps: Vec<_> = from.components().collect();
    let common = to_comps
        .iter()
        .zip(from_comps.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    for _ in common..from_comps.len() {
        parts.push("..".to_string());
    }
    for comp in &to_comps[common..] {
        parts.push(comp.as_os_str().to_string_lossy().into_owned());
    }

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
