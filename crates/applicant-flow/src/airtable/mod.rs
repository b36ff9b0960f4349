//! Airtable-backed implementation of the record-store boundary.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Url;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::StoreConfig;
use crate::workflows::applicants::{
    FieldFilter, FieldMap, RecordId, RecordStore, StoreError, StoredRecord, Table,
};

const API_BASE: &str = "https://api.airtable.com/v0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct AirtableStore {
    client: Client,
    token: String,
    base_url: Url,
}

impl AirtableStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        let base_url = Url::parse(&format!("{API_BASE}/{}", config.base_id))
            .map_err(|err| StoreError::Unavailable(format!("invalid base URL: {err}")))?;
        Ok(Self {
            client,
            token: config.api_token.clone(),
            base_url,
        })
    }

    fn table_url(&self, table: Table) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::Unavailable("base URL cannot carry segments".to_string()))?
            .push(table.name());
        Ok(url)
    }

    fn record_url(&self, table: Table, id: &RecordId) -> Result<Url, StoreError> {
        let mut url = self.table_url(table)?;
        url.path_segments_mut()
            .map_err(|_| StoreError::Unavailable("base URL cannot carry segments".to_string()))?
            .push(&id.0);
        Ok(url)
    }

    fn execute(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().unwrap_or_default();
            Err(StoreError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }

    fn fetch_page(
        &self,
        url: &Url,
        filter: Option<&FieldFilter>,
        max_records: Option<u32>,
        offset: Option<&str>,
    ) -> Result<RecordPage, StoreError> {
        let mut request = self.client.get(url.clone());
        if let Some(filter) = filter {
            request = request.query(&[("filterByFormula", formula(filter))]);
        }
        if let Some(limit) = max_records {
            request = request.query(&[("maxRecords", limit.to_string())]);
        }
        if let Some(token) = offset {
            request = request.query(&[("offset", token)]);
        }
        self.execute(request)?
            .json()
            .map_err(|err| StoreError::Malformed(err.to_string()))
    }
}

impl RecordStore for AirtableStore {
    fn all(
        &self,
        table: Table,
        filter: Option<&FieldFilter>,
    ) -> Result<Vec<StoredRecord>, StoreError> {
        let url = self.table_url(table)?;
        let mut records = Vec::new();
        let mut offset: Option<String> = None;
        loop {
            let page = self.fetch_page(&url, filter, None, offset.as_deref())?;
            records.extend(page.records.into_iter().map(StoredRecord::from));
            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }
        debug!(table = table.name(), count = records.len(), "listed records");
        Ok(records)
    }

    fn first(
        &self,
        table: Table,
        filter: &FieldFilter,
    ) -> Result<Option<StoredRecord>, StoreError> {
        let url = self.table_url(table)?;
        let page = self.fetch_page(&url, Some(filter), Some(1), None)?;
        Ok(page.records.into_iter().next().map(StoredRecord::from))
    }

    fn create(&self, table: Table, fields: FieldMap) -> Result<StoredRecord, StoreError> {
        let url = self.table_url(table)?;
        let payload: RecordPayload = self
            .execute(self.client.post(url).json(&json!({ "fields": fields })))?
            .json()
            .map_err(|err| StoreError::Malformed(err.to_string()))?;
        Ok(payload.into())
    }

    fn update(&self, table: Table, id: &RecordId, fields: FieldMap) -> Result<(), StoreError> {
        let url = self.record_url(table, id)?;
        self.execute(self.client.patch(url).json(&json!({ "fields": fields })))?;
        Ok(())
    }

    fn delete(&self, table: Table, id: &RecordId) -> Result<(), StoreError> {
        let url = self.record_url(table, id)?;
        self.execute(self.client.delete(url))?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RecordPage {
    #[serde(default)]
    records: Vec<RecordPayload>,
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecordPayload {
    id: String,
    #[serde(default)]
    fields: FieldMap,
}

impl From<RecordPayload> for StoredRecord {
    fn from(payload: RecordPayload) -> Self {
        StoredRecord {
            id: RecordId(payload.id),
            fields: payload.fields,
        }
    }
}

/// Equality formula over a named field, e.g. `{Applicant ID} = 'A001'`.
fn formula(filter: &FieldFilter) -> String {
    let escaped = filter.value.replace('\'', "\\'");
    format!("{{{}}} = '{}'", filter.field, escaped)
}
