use serde_json::Value;

use super::domain::{ApplicantId, RecordId};

/// Storage field names shared by every `RecordStore` implementation.
pub mod fields {
    pub const APPLICANT_ID: &str = "Applicant ID";
    pub const COMPRESSED_JSON: &str = "Compressed JSON";

    pub const FULL_NAME: &str = "Full Name";
    pub const EMAIL: &str = "Email";
    pub const LOCATION: &str = "Location";
    pub const LINKEDIN: &str = "LinkedIn";

    pub const PREFERRED_RATE: &str = "Preferred Rate";
    pub const MINIMUM_RATE: &str = "Minimum Rate";
    pub const CURRENCY: &str = "Currency";
    pub const AVAILABILITY: &str = "Availability (hrs/wk)";

    pub const COMPANY: &str = "Company";
    pub const TITLE: &str = "Title";
    pub const START: &str = "Start";
    pub const END: &str = "End";
    pub const TECHNOLOGIES: &str = "Technologies";

    pub const LLM_SUMMARY: &str = "LLM Summary";
    pub const LLM_SCORE: &str = "LLM Score";
    pub const LLM_FOLLOWUP: &str = "LLM Followup";

    pub const APPLICANT_LINK: &str = "Applicant";
    pub const SCORE_REASON: &str = "Score Reason";
}

/// Logical tables the workflows read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Applicants,
    PersonalDetails,
    SalaryPreferences,
    WorkExperience,
    ShortlistedLeads,
}

impl Table {
    pub const fn name(self) -> &'static str {
        match self {
            Table::Applicants => "Applicants",
            Table::PersonalDetails => "Personal Details",
            Table::SalaryPreferences => "Salary Preferences",
            Table::WorkExperience => "Work Experience",
            Table::ShortlistedLeads => "Shortlisted Leads",
        }
    }
}

/// Field-value mapping carried by stored records and write payloads.
pub type FieldMap = serde_json::Map<String, Value>;

/// A record as returned by the store: storage identity plus fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub id: RecordId,
    pub fields: FieldMap,
}

impl StoredRecord {
    /// Text field value, defaulting to the empty string when absent or
    /// not a string. This is the codec's defaulting convention.
    pub fn text(&self, field: &str) -> String {
        self.fields
            .get(field)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    /// Numeric field value, defaulting to zero.
    pub fn number(&self, field: &str) -> f64 {
        self.fields
            .get(field)
            .and_then(Value::as_f64)
            .unwrap_or_default()
    }

    /// String-sequence field value, defaulting to the empty sequence.
    pub fn text_list(&self, field: &str) -> Vec<String> {
        self.fields
            .get(field)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Equality filter on a named field, the only predicate the workflows need.
///
/// For link-type fields the store matches against the linked applicant's
/// external identifier, mirroring how the hosted store evaluates formulas
/// over linked records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: &'static str,
    pub value: String,
}

impl FieldFilter {
    pub fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    pub fn applicant(id: &ApplicantId) -> Self {
        Self::new(fields::APPLICANT_ID, id.0.clone())
    }
}

/// Link-field value: a one-element sequence holding the linked record's
/// storage identity.
pub fn link(record: &RecordId) -> Value {
    Value::Array(vec![Value::String(record.0.clone())])
}

/// Storage abstraction so the workflow modules can be exercised in
/// isolation and backed by either the hosted store or an in-memory one.
pub trait RecordStore: Send + Sync {
    fn all(&self, table: Table, filter: Option<&FieldFilter>)
        -> Result<Vec<StoredRecord>, StoreError>;
    fn first(&self, table: Table, filter: &FieldFilter)
        -> Result<Option<StoredRecord>, StoreError>;
    fn create(&self, table: Table, fields: FieldMap) -> Result<StoredRecord, StoreError>;
    fn update(&self, table: Table, id: &RecordId, fields: FieldMap) -> Result<(), StoreError>;
    fn delete(&self, table: Table, id: &RecordId) -> Result<(), StoreError>;
}

/// Error enumeration for record-store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("record store rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("record store unavailable: {0}")]
    Unavailable(String),
    #[error("record store returned a malformed payload: {0}")]
    Malformed(String),
}
