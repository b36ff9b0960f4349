use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::workflows::applicants::domain::{
    ApplicantId, ExperienceEntry, PersonalInfo, ProfileDocument, RecordId, SalaryPreferences,
};
use crate::workflows::applicants::enrichment::{GenerationError, TextGenerator};
use crate::workflows::applicants::repository::{
    fields, link, FieldFilter, FieldMap, RecordStore, StoreError, StoredRecord, Table,
};
use crate::workflows::applicants::service::ApplicantPipeline;
use crate::workflows::applicants::shortlist::ShortlistConfig;

/// In-memory record store with sequential ids so listings preserve
/// creation order. Equality filters on link fields resolve through the
/// Applicants table, the way the hosted store's formulas do.
#[derive(Default)]
pub(super) struct MemoryStore {
    tables: Mutex<HashMap<Table, BTreeMap<String, FieldMap>>>,
    sequence: AtomicU64,
}

impl MemoryStore {
    fn next_id(&self) -> String {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        format!("rec{id:06}")
    }
}

fn matches(
    tables: &HashMap<Table, BTreeMap<String, FieldMap>>,
    record: &FieldMap,
    filter: &FieldFilter,
) -> bool {
    match record.get(filter.field) {
        Some(Value::String(text)) => text == &filter.value,
        Some(Value::Array(links)) => links.iter().filter_map(Value::as_str).any(|linked| {
            tables
                .get(&Table::Applicants)
                .and_then(|records| records.get(linked))
                .and_then(|applicant| applicant.get(fields::APPLICANT_ID))
                .and_then(Value::as_str)
                == Some(filter.value.as_str())
        }),
        Some(Value::Number(number)) => number.to_string() == filter.value,
        _ => false,
    }
}

impl RecordStore for MemoryStore {
    fn all(
        &self,
        table: Table,
        filter: Option<&FieldFilter>,
    ) -> Result<Vec<StoredRecord>, StoreError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        let Some(records) = tables.get(&table) else {
            return Ok(Vec::new());
        };
        Ok(records
            .iter()
            .filter(|(_, record)| filter.map_or(true, |filter| matches(&tables, record, filter)))
            .map(|(id, record)| StoredRecord {
                id: RecordId(id.clone()),
                fields: record.clone(),
            })
            .collect())
    }

    fn first(
        &self,
        table: Table,
        filter: &FieldFilter,
    ) -> Result<Option<StoredRecord>, StoreError> {
        Ok(self.all(table, Some(filter))?.into_iter().next())
    }

    fn create(&self, table: Table, fields: FieldMap) -> Result<StoredRecord, StoreError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        let id = self.next_id();
        tables.entry(table).or_default().insert(id.clone(), fields.clone());
        Ok(StoredRecord {
            id: RecordId(id),
            fields,
        })
    }

    fn update(&self, table: Table, id: &RecordId, fields: FieldMap) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        let record = tables
            .entry(table)
            .or_default()
            .get_mut(&id.0)
            .ok_or(StoreError::NotFound)?;
        for (key, value) in fields {
            record.insert(key, value);
        }
        Ok(())
    }

    fn delete(&self, table: Table, id: &RecordId) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        tables
            .entry(table)
            .or_default()
            .remove(&id.0)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

/// Generator returning a fixed response so enrichment runs stay offline.
pub(super) struct CannedGenerator {
    pub(super) response: String,
}

impl Default for CannedGenerator {
    fn default() -> Self {
        Self {
            response: "Summary: Strong systems candidate.\n\
                       Score: 8\n\
                       Issues: None\n\
                       Follow-Ups:\n\
                       • Confirm the earliest start date.\n\
                       • Verify the most recent contract end."
                .to_string(),
        }
    }
}

impl TextGenerator for CannedGenerator {
    fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Ok(self.response.clone())
    }
}

pub(super) fn applicant_id() -> ApplicantId {
    ApplicantId("A001".to_string())
}

pub(super) fn build_pipeline() -> (ApplicantPipeline<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let pipeline = ApplicantPipeline::new(store.clone(), ShortlistConfig::default());
    (pipeline, store)
}

pub(super) fn seed_applicant(store: &MemoryStore, external_id: &str) -> RecordId {
    store
        .create(
            Table::Applicants,
            FieldMap::from_iter([(fields::APPLICANT_ID.to_string(), Value::from(external_id))]),
        )
        .expect("seed applicant")
        .id
}

pub(super) fn seed_children(store: &MemoryStore, applicant_record: &RecordId) {
    store
        .create(
            Table::PersonalDetails,
            FieldMap::from_iter([
                (fields::FULL_NAME.to_string(), Value::from("A")),
                (fields::EMAIL.to_string(), Value::from("")),
                (fields::LOCATION.to_string(), Value::from("Germany")),
                (fields::LINKEDIN.to_string(), Value::from("")),
                (fields::APPLICANT_ID.to_string(), link(applicant_record)),
            ]),
        )
        .expect("seed personal details");
    store
        .create(
            Table::SalaryPreferences,
            FieldMap::from_iter([
                (fields::PREFERRED_RATE.to_string(), Value::from(90.0)),
                (fields::MINIMUM_RATE.to_string(), Value::from(0.0)),
                (fields::CURRENCY.to_string(), Value::from("EUR")),
                (fields::AVAILABILITY.to_string(), Value::from(25.0)),
                (fields::APPLICANT_ID.to_string(), link(applicant_record)),
            ]),
        )
        .expect("seed salary preferences");
    store
        .create(
            Table::WorkExperience,
            FieldMap::from_iter([
                (fields::COMPANY.to_string(), Value::from("Google")),
                (fields::TITLE.to_string(), Value::from("Engineer")),
                (fields::START.to_string(), Value::from("2020-01")),
                (fields::END.to_string(), Value::from("2023-06")),
                (
                    fields::TECHNOLOGIES.to_string(),
                    Value::from(vec!["Go".to_string(), "Rust".to_string()]),
                ),
                (fields::APPLICANT_ID.to_string(), link(applicant_record)),
            ]),
        )
        .expect("seed work experience");
}

/// Document matching the seeded child records above.
pub(super) fn sample_document() -> ProfileDocument {
    ProfileDocument {
        personal: PersonalInfo {
            name: "A".to_string(),
            email: String::new(),
            location: "Germany".to_string(),
            linkedin: String::new(),
        },
        salary: SalaryPreferences {
            rate: 90.0,
            min_rate: 0.0,
            currency: "EUR".to_string(),
            availability: 25.0,
        },
        experience: vec![ExperienceEntry {
            company: "Google".to_string(),
            title: "Engineer".to_string(),
            start: "2020-01".to_string(),
            end: "2023-06".to_string(),
            technologies: vec!["Go".to_string(), "Rust".to_string()],
        }],
    }
}
