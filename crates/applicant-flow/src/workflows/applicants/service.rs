//! Orchestrators sequencing the record-store collaborator and the pure
//! components: compression, decompression, shortlisting, and enrichment
//! runs. Synchronous, single attempt each; safe to retry in full.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use super::codec::{self, DecodeError};
use super::domain::{ApplicantId, EnrichmentResult, ProfileDocument};
use super::enrichment::{enrichment_prompt, parse_response, GenerationError, TextGenerator};
use super::repository::{fields, link, FieldFilter, FieldMap, RecordStore, StoreError, StoredRecord, Table};
use super::shortlist::{ShortlistConfig, ShortlistEngine, ShortlistOutcome};
use super::sync::{sync_children, SyncReport};

/// A run either completed with a result or was skipped as a diagnostic
/// no-op: missing applicants and undecodable payloads are surfaced as
/// values, never as errors.
#[derive(Debug)]
pub enum RunOutcome<T> {
    Completed(T),
    Skipped(SkipReason),
}

/// Why a run was skipped without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    ApplicantNotFound,
    MissingCompressedJson,
    InvalidCompressedJson(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::ApplicantNotFound => write!(f, "applicant not found"),
            SkipReason::MissingCompressedJson => {
                write!(f, "no compressed JSON on the applicant row")
            }
            SkipReason::InvalidCompressedJson(detail) => {
                write!(f, "compressed JSON failed to decode: {detail}")
            }
        }
    }
}

/// Error raised by the pipeline runs. Collaborator failures propagate
/// uncaught; runs are idempotent, so callers may simply retry.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("failed to serialize profile document: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("generation response score '{raw}' is not an integer")]
    InvalidScore { raw: String },
}

/// Facade over the record store and the pure components.
pub struct ApplicantPipeline<S> {
    store: Arc<S>,
    shortlist: ShortlistEngine,
}

impl<S: RecordStore> ApplicantPipeline<S> {
    pub fn new(store: Arc<S>, shortlist_config: ShortlistConfig) -> Self {
        Self {
            store,
            shortlist: ShortlistEngine::new(shortlist_config),
        }
    }

    /// Denormalizes the applicant's child records into the canonical
    /// document and writes it to the applicant row.
    pub fn compress(
        &self,
        applicant_id: &ApplicantId,
    ) -> Result<RunOutcome<ProfileDocument>, PipelineError> {
        let Some(applicant) = self.fetch_applicant(applicant_id)? else {
            warn!(applicant = %applicant_id.0, "applicant not found; skipping compression");
            return Ok(RunOutcome::Skipped(SkipReason::ApplicantNotFound));
        };

        let filter = FieldFilter::applicant(applicant_id);
        let personal = self.store.first(Table::PersonalDetails, &filter)?;
        let salary = self.store.first(Table::SalaryPreferences, &filter)?;
        let experience = self.store.all(Table::WorkExperience, Some(&filter))?;

        let document = codec::encode(personal.as_ref(), salary.as_ref(), &experience);
        let payload = codec::serialize(&document).map_err(PipelineError::Serialize)?;

        self.store.update(
            Table::Applicants,
            &applicant.id,
            FieldMap::from_iter([(fields::COMPRESSED_JSON.to_string(), Value::from(payload))]),
        )?;

        info!(
            applicant = %applicant_id.0,
            entries = document.experience.len(),
            "compressed profile saved to applicant row"
        );
        Ok(RunOutcome::Completed(document))
    }

    /// Rebuilds the child records from the stored document. Skipped with
    /// no partial writes when the payload is absent or undecodable.
    pub fn decompress(
        &self,
        applicant_id: &ApplicantId,
    ) -> Result<RunOutcome<SyncReport>, PipelineError> {
        let (applicant, document) = match self.stored_document(applicant_id)? {
            RunOutcome::Completed(found) => found,
            RunOutcome::Skipped(reason) => return Ok(RunOutcome::Skipped(reason)),
        };

        let report = sync_children(self.store.as_ref(), applicant_id, &applicant.id, &document)?;
        info!(
            applicant = %applicant_id.0,
            personal = report.personal.label(),
            salary = report.salary.label(),
            removed = report.experience_removed,
            created = report.experience_created,
            "child records synchronized from compressed profile"
        );
        Ok(RunOutcome::Completed(report))
    }

    /// Evaluates the shortlist criteria and, when they pass, records a
    /// shortlisted lead carrying the payload and the reason trail. Leads
    /// are only ever created, never updated or deleted.
    pub fn shortlist(
        &self,
        applicant_id: &ApplicantId,
    ) -> Result<RunOutcome<ShortlistOutcome>, PipelineError> {
        let (applicant, document) = match self.stored_document(applicant_id)? {
            RunOutcome::Completed(found) => found,
            RunOutcome::Skipped(reason) => return Ok(RunOutcome::Skipped(reason)),
        };

        let outcome = self.shortlist.evaluate(&document);
        if outcome.passed {
            let payload = FieldMap::from_iter([
                (fields::APPLICANT_LINK.to_string(), link(&applicant.id)),
                (
                    fields::COMPRESSED_JSON.to_string(),
                    Value::from(applicant.text(fields::COMPRESSED_JSON)),
                ),
                (
                    fields::SCORE_REASON.to_string(),
                    Value::from(outcome.reason_trail()),
                ),
            ]);
            self.store.create(Table::ShortlistedLeads, payload)?;
            info!(applicant = %applicant_id.0, reasons = %outcome.reason_trail(), "applicant shortlisted");
        } else {
            info!(applicant = %applicant_id.0, "applicant did not pass shortlist criteria");
        }
        Ok(RunOutcome::Completed(outcome))
    }

    /// Prompts the text generator with the profile, parses the response,
    /// and persists the enrichment fields onto the applicant row.
    pub fn enrich(
        &self,
        applicant_id: &ApplicantId,
        generator: &dyn TextGenerator,
    ) -> Result<RunOutcome<EnrichmentResult>, PipelineError> {
        let (applicant, document) = match self.stored_document(applicant_id)? {
            RunOutcome::Completed(found) => found,
            RunOutcome::Skipped(reason) => return Ok(RunOutcome::Skipped(reason)),
        };

        let profile_json =
            serde_json::to_string(&document).map_err(PipelineError::Serialize)?;
        let response = generator.generate(&enrichment_prompt(&profile_json))?;
        let result = parse_response(&response);

        let score: i64 = result
            .score
            .trim()
            .parse()
            .map_err(|_| PipelineError::InvalidScore {
                raw: result.score.clone(),
            })?;

        self.store.update(
            Table::Applicants,
            &applicant.id,
            FieldMap::from_iter([
                (fields::LLM_SUMMARY.to_string(), Value::from(result.summary.clone())),
                (fields::LLM_SCORE.to_string(), Value::from(score)),
                (fields::LLM_FOLLOWUP.to_string(), Value::from(result.followups.clone())),
            ]),
        )?;

        info!(applicant = %applicant_id.0, score, "enrichment saved to applicant row");
        Ok(RunOutcome::Completed(result))
    }

    fn fetch_applicant(
        &self,
        applicant_id: &ApplicantId,
    ) -> Result<Option<StoredRecord>, StoreError> {
        self.store
            .first(Table::Applicants, &FieldFilter::applicant(applicant_id))
    }

    /// Shared gate for the runs that consume the stored document: resolves
    /// the applicant row and decodes its payload, or names the skip reason.
    fn stored_document(
        &self,
        applicant_id: &ApplicantId,
    ) -> Result<RunOutcome<(StoredRecord, ProfileDocument)>, PipelineError> {
        let Some(applicant) = self.fetch_applicant(applicant_id)? else {
            warn!(applicant = %applicant_id.0, "applicant not found; skipping run");
            return Ok(RunOutcome::Skipped(SkipReason::ApplicantNotFound));
        };

        let raw = applicant.text(fields::COMPRESSED_JSON);
        if raw.is_empty() {
            warn!(applicant = %applicant_id.0, "no compressed JSON on applicant row; skipping run");
            return Ok(RunOutcome::Skipped(SkipReason::MissingCompressedJson));
        }

        match codec::decode(&raw) {
            Ok(document) => Ok(RunOutcome::Completed((applicant, document))),
            Err(DecodeError(err)) => {
                warn!(applicant = %applicant_id.0, error = %err, "compressed JSON invalid; skipping run");
                Ok(RunOutcome::Skipped(SkipReason::InvalidCompressedJson(
                    err.to_string(),
                )))
            }
        }
    }
}
