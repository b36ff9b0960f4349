//! Lenient line-oriented extraction over unstructured generation output.
//! Unmatched prefixes yield empty strings; this parser never fails.

use crate::workflows::applicants::domain::EnrichmentResult;

pub fn parse_response(raw: &str) -> EnrichmentResult {
    EnrichmentResult {
        summary: extract_line(raw, "Summary:"),
        score: extract_line(raw, "Score:"),
        issues: extract_line(raw, "Issues:"),
        followups: extract_bullets(raw),
    }
}

/// Content of the first line starting with `prefix`, stripped and trimmed.
fn extract_line(raw: &str, prefix: &str) -> String {
    raw.lines()
        .find_map(|line| line.strip_prefix(prefix))
        .map(|rest| rest.trim().to_string())
        .unwrap_or_default()
}

/// Every trimmed line beginning with the bullet glyph, rejoined with
/// newlines in original order.
fn extract_bullets(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| line.starts_with('•'))
        .collect::<Vec<_>>()
        .join("\n")
}
