/// Fixed sets and thresholds applied by the shortlist rules.
#[derive(Debug, Clone)]
pub struct ShortlistConfig {
    /// Matched as case-sensitive substrings of experience company names.
    pub tier_one_companies: Vec<String>,
    /// Full names and abbreviations are independent entries.
    pub approved_countries: Vec<String>,
    /// Inclusive upper bound on the preferred hourly rate.
    pub max_hourly_rate: f64,
    /// Inclusive lower bound on weekly availability hours.
    pub min_weekly_availability: f64,
    /// Raw entry count that passes the experience check without a tier-1
    /// employer; entries are not vetted for relevance.
    pub min_experience_entries: usize,
}

impl Default for ShortlistConfig {
    fn default() -> Self {
        Self {
            tier_one_companies: ["Google", "Meta", "OpenAI", "Microsoft", "Apple", "Amazon"]
                .iter()
                .map(|name| name.to_string())
                .collect(),
            approved_countries: [
                "US",
                "United States",
                "UK",
                "United Kingdom",
                "Canada",
                "Germany",
                "India",
            ]
            .iter()
            .map(|name| name.to_string())
            .collect(),
            max_hourly_rate: 100.0,
            min_weekly_availability: 20.0,
            min_experience_entries: 4,
        }
    }
}
