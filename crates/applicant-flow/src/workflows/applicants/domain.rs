use serde::{Deserialize, Serialize};

/// External applicant identifier, unique per applicant ("Applicant ID").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

/// Storage-layer record identity assigned by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

/// Canonical denormalized form of an applicant's child records.
///
/// Every field carries a type-stable default: an absent key at any level
/// decodes to an empty string, zero, or empty sequence, never to a missing
/// or null value. Documents produced outside this system are tolerated as
/// long as the present keys are well-typed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileDocument {
    pub personal: PersonalInfo,
    pub salary: SalaryPreferences,
    pub experience: Vec<ExperienceEntry>,
}

/// Singleton personal-details slice of the profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub location: String,
    pub linkedin: String,
}

/// Singleton salary-preferences slice of the profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryPreferences {
    pub rate: f64,
    pub min_rate: f64,
    pub currency: String,
    /// Hours per week the applicant is available.
    pub availability: f64,
}

/// One work-experience entry; order mirrors the source records.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub company: String,
    pub title: String,
    pub start: String,
    pub end: String,
    pub technologies: Vec<String>,
}

/// Structured result extracted from a text-generation response.
///
/// `score` is kept as raw text; the orchestrator coerces it to an integer
/// and treats non-numeric content as a failure at that point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnrichmentResult {
    pub summary: String,
    pub score: String,
    pub issues: String,
    /// Bullet lines from the response, rejoined with newlines.
    pub followups: String,
}
