//! Applicant profile workflows: the compression/decompression round trip
//! between normalized child records and the stored JSON document, the
//! shortlist decision over that document, and generated enrichment.

pub mod codec;
pub mod domain;
pub mod enrichment;
pub mod repository;
pub mod service;
pub mod shortlist;
pub mod sync;

#[cfg(test)]
mod tests;

pub use codec::{decode, encode, DecodeError};
pub use domain::{
    ApplicantId, EnrichmentResult, ExperienceEntry, PersonalInfo, ProfileDocument, RecordId,
    SalaryPreferences,
};
pub use enrichment::{
    enrichment_prompt, parse_response, GenerationError, OpenAiGenerator, TextGenerator,
};
pub use repository::{
    fields, link, FieldFilter, FieldMap, RecordStore, StoreError, StoredRecord, Table,
};
pub use service::{ApplicantPipeline, PipelineError, RunOutcome, SkipReason};
pub use shortlist::{ShortlistConfig, ShortlistEngine, ShortlistOutcome};
pub use sync::{clear_experience, insert_experience, sync_children, SyncReport, UpsertOutcome};
