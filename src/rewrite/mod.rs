//! Source rewriting pipeline for `main.tf` files.
//!
//! This module implements the per-file rewrite steps:
//!
//! 1. **Mapping** ([`map_sources`]): scan lines for `source = "..."`
//!    assignments and collect the quoted source strings that need
//!    rewriting under the active mode.
//! 2. **Resolution** ([`resolve_replacements`]): fill in each mapped
//!    entry's replacement using one strategy per
//!    [`RewriteMode`](crate::types::RewriteMode) variant.
//! 3. **Application** ([`apply_source_map`]): literal whole-text
//!    substring replacement of every mapped source.
//!
//! The mapper is a line-prefix heuristic, not an HCL parser: only lines
//! whose trimmed content starts with `source` are interpreted, and the
//! rest of the file passes through untouched.

mod apply;
mod mapper;
mod resolver;

pub use apply::apply_source_map;
pub use mapper::map_sources;
pub use resolver::resolve_replacements;

use indexmap::IndexMap;

/// Substring that marks a source as referencing a module subdirectory
/// rather than the repository root module.
pub const MODULES_SEGMENT: &str = "/modules/";

/// Per-file mapping from the matched source string (quotes included,
/// exactly as written) to its resolved replacement.
///
/// Insertion-ordered; keys are unique within a file and the map is
/// discarded after that file is rewritten.
pub type SourceMap = IndexMap<String, String>;
