use crate::workflows::applicants::enrichment::{enrichment_prompt, parse_response};

#[test]
fn parses_documented_sample() {
    let result = parse_response("Summary: ok\nScore: 7\nrandom line\n• Q1\n• Q2");

    assert_eq!(result.summary, "ok");
    assert_eq!(result.score, "7");
    assert_eq!(result.issues, "");
    assert_eq!(result.followups, "• Q1\n• Q2");
}

#[test]
fn unmatched_prefixes_yield_empty_fields() {
    let result = parse_response("nothing structured here\nscore: lowercase prefix ignored");

    assert_eq!(result.summary, "");
    assert_eq!(result.score, "");
    assert_eq!(result.issues, "");
    assert_eq!(result.followups, "");
}

#[test]
fn prefix_must_start_the_line() {
    let result = parse_response("The final Score: 9 appears mid-line\nScore: 4");

    // Only the line that begins with the prefix counts.
    assert_eq!(result.score, "4");
}

#[test]
fn first_matching_line_wins() {
    let result = parse_response("Summary: first\nSummary: second");
    assert_eq!(result.summary, "first");
}

#[test]
fn indented_bullets_are_collected_in_order() {
    let result = parse_response("Follow-Ups:\n  • What rate applies to short contracts?\n\t• When can you start?");

    assert_eq!(
        result.followups,
        "• What rate applies to short contracts?\n• When can you start?"
    );
}

#[test]
fn empty_response_parses_to_defaults() {
    let result = parse_response("");
    assert_eq!(result, Default::default());
}

#[test]
fn prompt_appends_payload_after_template() {
    let prompt = enrichment_prompt("{\"personal\":{}}");

    assert!(prompt.starts_with("You are a recruiting analyst."));
    assert!(prompt.contains("Summary: <text>"));
    assert!(prompt.ends_with("\n\n{\"personal\":{}}"));
}
