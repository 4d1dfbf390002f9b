//! Completion text → opener list

use once_cell::sync::Lazy;
use regex::Regex;

use super::scenarios::cold_opener::OPENER_COUNT;

// "1) ", "2. ", "3 - ", "10-" or "- " / "• "
static LIST_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+[).\s-]+|[-•]\s+)").expect("list marker pattern is valid")
});

/// Split raw model output into at most [`OPENER_COUNT`] clean lines.
///
/// Blank lines and lines that are only a list marker are dropped. Order is
/// preserved. An empty result is left to the caller to reject.
pub fn parse_openers(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| LIST_MARKER.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .take(OPENER_COUNT)
        .collect()
}
