//! Utility functions for header normalization and display formatting.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::warn;

/// Acronym followed by a capitalized word, e.g. `HTTPServer`
static ACRONYM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("Invalid regex"));

/// Lowercase letter or digit followed by an uppercase letter, e.g. `costFor`
static CAMEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("Invalid regex"));

/// Runs of whitespace and hyphens
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-]+").expect("Invalid regex"));

/// Normalize a raw column header into a snake_case identifier.
///
/// Splits words on whitespace, hyphens, underscores and case boundaries,
/// lowercases them and joins them with a single underscore:
/// `"Restaurant ID"` becomes `restaurant_id`, `"Average Cost for two"`
/// becomes `average_cost_for_two`. Already normalized headers come back
/// unchanged.
pub fn normalize_header(header: &str) -> String {
    let trimmed = header.trim_start_matches('\u{feff}').trim();
    let split = ACRONYM_RE.replace_all(trimmed, "${1}_${2}");
    let split = CAMEL_RE.replace_all(&split, "${1}_${2}");
    let mut norm = SEPARATOR_RE.replace_all(&split, "_").to_lowercase();

    // Collapse multiple underscores
    while norm.contains("__") {
        norm = norm.replace("__", "_");
    }

    norm.trim_matches('_').to_string()
}

/// Normalize every header, preserving order.
///
/// Collisions are reported but left in place.
pub fn normalize_headers<S: AsRef<str>>(headers: &[S]) -> Vec<String> {
    let normalized: Vec<String> = headers
        .iter()
        .map(|h| normalize_header(h.as_ref()))
        .collect();

    let mut seen = HashSet::new();
    for name in &normalized {
        if !seen.insert(name.as_str()) {
            warn!("Duplicate column after normalization: {}", name);
        }
    }

    normalized
}

/// Format a float with two decimals, the way tables show means.
pub fn format_decimal(value: f64) -> String {
    format!("{:.2}", value)
}
