use super::config::ShortlistConfig;
use crate::workflows::applicants::domain::ProfileDocument;

/// Independent checks, each contributing at most one reason.
pub(crate) const CHECK_COUNT: usize = 3;

/// Runs the three checks in fixed order and collects their reasons.
pub(crate) fn collect_reasons(document: &ProfileDocument, config: &ShortlistConfig) -> Vec<String> {
    let mut reasons = Vec::new();

    let worked_tier_one = document.experience.iter().any(|entry| {
        config
            .tier_one_companies
            .iter()
            .any(|company| entry.company.contains(company.as_str()))
    });

    // The two experience sub-conditions are exclusive: whichever triggers
    // first contributes the reason, never both.
    if worked_tier_one {
        reasons.push("Worked at a Tier-1 company".to_string());
    } else if document.experience.len() >= config.min_experience_entries {
        reasons.push(format!(
            "Has {}+ work experiences",
            config.min_experience_entries
        ));
    }

    if document.salary.rate <= config.max_hourly_rate
        && document.salary.availability >= config.min_weekly_availability
    {
        reasons.push("Compensation and availability are acceptable".to_string());
    }

    let location = document.personal.location.trim();
    if config
        .approved_countries
        .iter()
        .any(|country| location.contains(country.as_str()))
    {
        reasons.push(format!("Location eligible ({location})"));
    }

    reasons
}
