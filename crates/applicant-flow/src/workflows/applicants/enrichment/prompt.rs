pub(crate) const PROMPT_TEMPLATE: &str = "You are a recruiting analyst. Given this JSON applicant profile, do four things:
1. Provide a concise 75-word summary.
2. Rate overall candidate quality from 1 to 10 (higher is better).
3. List any data gaps or inconsistencies you notice.
4. Suggest up to three follow-up questions to clarify gaps.

Return exactly:
Summary: <text>
Score: <integer>
Issues: <comma-separated list or 'None'>
Follow-Ups:
• <question 1>
• <question 2>
";

/// Full prompt: the analyst template followed by the profile payload.
pub fn enrichment_prompt(profile_json: &str) -> String {
    format!("{PROMPT_TEMPLATE}\n\n{profile_json}")
}
