use std::sync::Arc;

use applicant_flow::error::AppError;
use applicant_flow::workflows::applicants::{
    fields, link, ApplicantId, ApplicantPipeline, FieldMap, RecordId, RecordStore, RunOutcome,
    ShortlistConfig, StoreError, Table,
};
use clap::Args;
use serde_json::Value;

use crate::infra::{CannedTextGenerator, InMemoryRecordStore};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// External applicant identifier used for the seeded records
    #[arg(long, default_value = "A001")]
    pub(crate) applicant_id: String,
    /// Skip the enrichment leg of the demo
    #[arg(long)]
    pub(crate) skip_enrichment: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        applicant_id,
        skip_enrichment,
    } = args;

    println!("Applicant workflow demo (in-memory store, no credentials needed)");

    let store = Arc::new(InMemoryRecordStore::default());
    let applicant = ApplicantId(applicant_id);
    let applicant_record = seed(store.as_ref(), &applicant)?;
    println!(
        "- Seeded applicant {} as {} with personal, salary, and experience records",
        applicant.0, applicant_record.0
    );

    let pipeline = ApplicantPipeline::new(store.clone(), ShortlistConfig::default());

    println!("\nCompression");
    match pipeline.compress(&applicant)? {
        RunOutcome::Completed(document) => {
            println!(
                "- Gathered {} experience entries into the compressed profile",
                document.experience.len()
            );
            match serde_json::to_string_pretty(&document) {
                Ok(json) => println!("{json}"),
                Err(err) => println!("- Profile payload unavailable: {err}"),
            }
        }
        RunOutcome::Skipped(reason) => println!("- Skipped: {reason}"),
    }

    println!("\nDecompression");
    match pipeline.decompress(&applicant)? {
        RunOutcome::Completed(report) => println!(
            "- Personal {} | salary {} | experience -{} +{}",
            report.personal.label(),
            report.salary.label(),
            report.experience_removed,
            report.experience_created
        ),
        RunOutcome::Skipped(reason) => println!("- Skipped: {reason}"),
    }

    println!("\nShortlisting");
    match pipeline.shortlist(&applicant)? {
        RunOutcome::Completed(outcome) if outcome.passed => {
            println!("- Shortlisted: {}", outcome.reason_trail());
        }
        RunOutcome::Completed(_) => println!("- Criteria not met; no lead recorded"),
        RunOutcome::Skipped(reason) => println!("- Skipped: {reason}"),
    }

    if skip_enrichment {
        return Ok(());
    }

    println!("\nEnrichment (canned generator)");
    match pipeline.enrich(&applicant, &CannedTextGenerator)? {
        RunOutcome::Completed(result) => {
            println!("- Score {} | {}", result.score, result.summary);
            if !result.followups.is_empty() {
                for line in result.followups.lines() {
                    println!("  {line}");
                }
            }
        }
        RunOutcome::Skipped(reason) => println!("- Skipped: {reason}"),
    }

    Ok(())
}

fn seed(store: &InMemoryRecordStore, applicant: &ApplicantId) -> Result<RecordId, StoreError> {
    let applicant_record = store
        .create(
            Table::Applicants,
            FieldMap::from_iter([(
                fields::APPLICANT_ID.to_string(),
                Value::from(applicant.0.clone()),
            )]),
        )?
        .id;

    store.create(
        Table::PersonalDetails,
        FieldMap::from_iter([
            (fields::FULL_NAME.to_string(), Value::from("Ada Example")),
            (fields::EMAIL.to_string(), Value::from("ada@example.com")),
            (fields::LOCATION.to_string(), Value::from("Germany")),
            (
                fields::LINKEDIN.to_string(),
                Value::from("linkedin.com/in/ada-example"),
            ),
            (fields::APPLICANT_ID.to_string(), link(&applicant_record)),
        ]),
    )?;

    store.create(
        Table::SalaryPreferences,
        FieldMap::from_iter([
            (fields::PREFERRED_RATE.to_string(), Value::from(90.0)),
            (fields::MINIMUM_RATE.to_string(), Value::from(75.0)),
            (fields::CURRENCY.to_string(), Value::from("EUR")),
            (fields::AVAILABILITY.to_string(), Value::from(25.0)),
            (fields::APPLICANT_ID.to_string(), link(&applicant_record)),
        ]),
    )?;

    let entries = [
        ("Google", "Engineer", "2020-01", "2023-06", vec!["Go", "Rust"]),
        ("Acme Robotics", "Senior Engineer", "2023-07", "", vec!["Rust"]),
    ];
    for (company, title, start, end, technologies) in entries {
        store.create(
            Table::WorkExperience,
            FieldMap::from_iter([
                (fields::COMPANY.to_string(), Value::from(company)),
                (fields::TITLE.to_string(), Value::from(title)),
                (fields::START.to_string(), Value::from(start)),
                (fields::END.to_string(), Value::from(end)),
                (
                    fields::TECHNOLOGIES.to_string(),
                    Value::from(
                        technologies
                            .into_iter()
                            .map(str::to_string)
                            .collect::<Vec<_>>(),
                    ),
                ),
                (fields::APPLICANT_ID.to_string(), link(&applicant_record)),
            ]),
        )?;
    }

    Ok(applicant_record)
}
