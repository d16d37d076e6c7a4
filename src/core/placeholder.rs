//! Positional placeholder extraction.
//!
//! Property values use `{0}`-style positional placeholders that are
//! substituted at render time. A translation must use the same set of
//! indices as its base value, in any order.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\d+)\}").unwrap());

/// Placeholder indices used in a value, sorted and deduplicated.
pub fn placeholder_indices(value: &str) -> BTreeSet<u32> {
    PLACEHOLDER_REGEX
        .captures_iter(value)
        .filter_map(|caps| caps[1].parse().ok())
        .collect()
}

/// Format an index set for display: `{0}, {1}`.
pub fn format_indices(indices: &BTreeSet<u32>) -> String {
    if indices.is_empty() {
        return "(none)".to_string();
    }
    indices
        .iter()
        .map(|i| format!("{{{}}}", i))
        .collect::<Vec<_>>()
        .join(", ")
}
