//! Reconciles normalized child records from a profile document: singleton
//! relations are upserted, the experience list is replaced wholesale.

use serde_json::Value;
use tracing::debug;

use super::domain::{ApplicantId, ExperienceEntry, PersonalInfo, ProfileDocument, RecordId, SalaryPreferences};
use super::repository::{fields, link, FieldFilter, FieldMap, RecordStore, StoreError, Table};

/// Whether a singleton upsert found an existing record or created one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

impl UpsertOutcome {
    pub const fn label(self) -> &'static str {
        match self {
            UpsertOutcome::Created => "created",
            UpsertOutcome::Updated => "updated",
        }
    }
}

/// Summary of one sync run over the three child-record categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub personal: UpsertOutcome,
    pub salary: UpsertOutcome,
    pub experience_removed: usize,
    pub experience_created: usize,
}

/// Reconciles all child records for the applicant from the document.
///
/// Singleton and list reconciliation are independent; no ordering between
/// the categories is guaranteed to callers. The run is idempotent in field
/// content, though replaced experience records get fresh storage ids.
pub fn sync_children(
    store: &dyn RecordStore,
    applicant_id: &ApplicantId,
    applicant_record: &RecordId,
    document: &ProfileDocument,
) -> Result<SyncReport, StoreError> {
    let personal = upsert_singleton(
        store,
        Table::PersonalDetails,
        applicant_id,
        personal_payload(&document.personal, applicant_record),
    )?;
    let salary = upsert_singleton(
        store,
        Table::SalaryPreferences,
        applicant_id,
        salary_payload(&document.salary, applicant_record),
    )?;

    let experience_removed = clear_experience(store, applicant_id)?;
    let experience_created = insert_experience(store, applicant_record, &document.experience)?;

    Ok(SyncReport {
        personal,
        salary,
        experience_removed,
        experience_created,
    })
}

/// Deletes every experience record linked to the applicant and returns the
/// count removed.
///
/// This is the first half of the list replacement. Between this call and
/// `insert_experience` the store legitimately holds zero experience records
/// for the applicant; a run interrupted in that window leaves that state
/// behind until the run is retried in full.
pub fn clear_experience(
    store: &dyn RecordStore,
    applicant_id: &ApplicantId,
) -> Result<usize, StoreError> {
    let existing = store.all(
        Table::WorkExperience,
        Some(&FieldFilter::applicant(applicant_id)),
    )?;
    for record in &existing {
        store.delete(Table::WorkExperience, &record.id)?;
    }
    debug!(
        applicant = %applicant_id.0,
        removed = existing.len(),
        "cleared existing work experience records"
    );
    Ok(existing.len())
}

/// Creates one experience record per document entry, in document order,
/// each linked back to the applicant row. Second half of the replacement.
pub fn insert_experience(
    store: &dyn RecordStore,
    applicant_record: &RecordId,
    entries: &[ExperienceEntry],
) -> Result<usize, StoreError> {
    for entry in entries {
        store.create(Table::WorkExperience, experience_payload(entry, applicant_record))?;
    }
    debug!(created = entries.len(), "recreated work experience records");
    Ok(entries.len())
}

fn upsert_singleton(
    store: &dyn RecordStore,
    table: Table,
    applicant_id: &ApplicantId,
    payload: FieldMap,
) -> Result<UpsertOutcome, StoreError> {
    let filter = FieldFilter::applicant(applicant_id);
    match store.first(table, &filter)? {
        Some(existing) => {
            store.update(table, &existing.id, payload)?;
            Ok(UpsertOutcome::Updated)
        }
        None => {
            store.create(table, payload)?;
            Ok(UpsertOutcome::Created)
        }
    }
}

// Payloads carry every tracked field so an update is a full overwrite:
// fields absent from the document land as their defaults, not as holes.

fn personal_payload(personal: &PersonalInfo, applicant_record: &RecordId) -> FieldMap {
    FieldMap::from_iter([
        (fields::FULL_NAME.to_string(), Value::from(personal.name.clone())),
        (fields::EMAIL.to_string(), Value::from(personal.email.clone())),
        (fields::LOCATION.to_string(), Value::from(personal.location.clone())),
        (fields::LINKEDIN.to_string(), Value::from(personal.linkedin.clone())),
        (fields::APPLICANT_ID.to_string(), link(applicant_record)),
    ])
}

fn salary_payload(salary: &SalaryPreferences, applicant_record: &RecordId) -> FieldMap {
    FieldMap::from_iter([
        (fields::PREFERRED_RATE.to_string(), Value::from(salary.rate)),
        (fields::MINIMUM_RATE.to_string(), Value::from(salary.min_rate)),
        (fields::CURRENCY.to_string(), Value::from(salary.currency.clone())),
        (fields::AVAILABILITY.to_string(), Value::from(salary.availability)),
        (fields::APPLICANT_ID.to_string(), link(applicant_record)),
    ])
}

fn experience_payload(entry: &ExperienceEntry, applicant_record: &RecordId) -> FieldMap {
    FieldMap::from_iter([
        (fields::COMPANY.to_string(), Value::from(entry.company.clone())),
        (fields::TITLE.to_string(), Value::from(entry.title.clone())),
        (fields::START.to_string(), Value::from(entry.start.clone())),
        (fields::END.to_string(), Value::from(entry.end.clone())),
        (fields::TECHNOLOGIES.to_string(), Value::from(entry.technologies.clone())),
        (fields::APPLICANT_ID.to_string(), link(applicant_record)),
    ])
}
