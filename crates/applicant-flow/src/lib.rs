//! Applicant record automation: denormalizes an applicant's relational
//! child records into a single compressed JSON profile, rebuilds those
//! records from the stored profile, shortlists candidates against fixed
//! criteria, and enriches applicant rows with generated analysis.

pub mod airtable;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
