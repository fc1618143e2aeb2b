//! Dependency annotation parsing
//!
//! Pure text matching; no validation of the referenced numbers happens here.

use regex::Regex;
use std::sync::LazyLock;

/// `depend`, `depends`, `depended` or `depending`, then `on`, an optional
/// colon, and `#<digits>`. Case-insensitive.
static DEPENDS_ON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bdepend(?:s|ed|ing)?\s+on:?\s*#(\d+)").expect("dependency pattern is valid")
});

/// Extract every dependency reference from a PR body
///
/// References are returned in order of appearance, duplicates included.
/// A number too large for `u64` cannot name a PR and is ignored.
pub fn extract_dependencies(body: &str) -> Vec<u64> {
    DEPENDS_ON
        .captures_iter(body)
        .filter_map(|caps| caps[1].parse().ok())
        .collect()
}
