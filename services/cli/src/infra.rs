use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use applicant_flow::workflows::applicants::{
    fields, FieldFilter, FieldMap, GenerationError, RecordId, RecordStore, StoreError,
    StoredRecord, Table, TextGenerator,
};
use serde_json::Value;

/// In-memory record store used by the demo so every workflow can run
/// without hosted credentials. Sequential ids keep listings in creation
/// order; equality filters on link fields resolve through the Applicants
/// table the way hosted formulas do.
#[derive(Default)]
pub(crate) struct InMemoryRecordStore {
    tables: Mutex<HashMap<Table, BTreeMap<String, FieldMap>>>,
    sequence: AtomicU64,
}

impl InMemoryRecordStore {
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
        _ => false,
    }
}

impl RecordStore for InMemoryRecordStore {
    fn all(
        &self,
        table: Table,
        filter: Option<&FieldFilter>,
    ) -> Result<Vec<StoredRecord>, StoreError> {
        let tables = self
            .tables
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))?;
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
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))?;
        let id = self.next_id();
        tables
            .entry(table)
            .or_default()
            .insert(id.clone(), fields.clone());
        Ok(StoredRecord {
            id: RecordId(id),
            fields,
        })
    }

    fn update(&self, table: Table, id: &RecordId, fields: FieldMap) -> Result<(), StoreError> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))?;
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
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))?;
        tables
            .entry(table)
            .or_default()
            .remove(&id.0)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

/// Fixed-response generator so the enrichment leg of the demo stays
/// offline.
pub(crate) struct CannedTextGenerator;

impl TextGenerator for CannedTextGenerator {
    fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Ok("Summary: Experienced engineer with strong systems background and Tier-1 tenure.\n\
            Score: 8\n\
            Issues: None\n\
            Follow-Ups:\n\
            • Confirm the earliest available start date.\n\
            • Verify the most recent contract end."
            .to_string())
    }
}
