//! Pure transformation between normalized child records and the canonical
//! profile document. No I/O on either half of the round trip.

use super::domain::{ExperienceEntry, PersonalInfo, ProfileDocument, SalaryPreferences};
use super::repository::{fields, StoredRecord};

/// Builds the canonical document from the applicant's child records.
///
/// Total: absent records and absent fields degrade to the documented
/// defaults, never to an error. Experience entries keep their input order.
pub fn encode(
    personal: Option<&StoredRecord>,
    salary: Option<&StoredRecord>,
    experience: &[StoredRecord],
) -> ProfileDocument {
    ProfileDocument {
        personal: PersonalInfo {
            name: text_of(personal, fields::FULL_NAME),
            email: text_of(personal, fields::EMAIL),
            location: text_of(personal, fields::LOCATION),
            linkedin: text_of(personal, fields::LINKEDIN),
        },
        salary: SalaryPreferences {
            rate: number_of(salary, fields::PREFERRED_RATE),
            min_rate: number_of(salary, fields::MINIMUM_RATE),
            currency: text_of(salary, fields::CURRENCY),
            availability: number_of(salary, fields::AVAILABILITY),
        },
        experience: experience
            .iter()
            .map(|record| ExperienceEntry {
                company: record.text(fields::COMPANY),
                title: record.text(fields::TITLE),
                start: record.text(fields::START),
                end: record.text(fields::END),
                technologies: record.text_list(fields::TECHNOLOGIES),
            })
            .collect(),
    }
}

/// Parses stored JSON text back into a document.
///
/// Absent keys default at every level; syntactically invalid text, or a
/// present key with the wrong type, is a `DecodeError` so callers can skip
/// the run without partial writes.
pub fn decode(raw: &str) -> Result<ProfileDocument, DecodeError> {
    Ok(serde_json::from_str(raw)?)
}

/// Serializes a document to the stored "Compressed JSON" text form.
pub fn serialize(document: &ProfileDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(document)
}

/// The stored JSON payload could not be decoded.
#[derive(Debug, thiserror::Error)]
#[error("compressed JSON is invalid: {0}")]
pub struct DecodeError(#[from] pub serde_json::Error);

fn text_of(record: Option<&StoredRecord>, field: &str) -> String {
    record.map(|record| record.text(field)).unwrap_or_default()
}

fn number_of(record: Option<&StoredRecord>, field: &str) -> f64 {
    record.map(|record| record.number(field)).unwrap_or_default()
}
