use std::sync::Arc;

use applicant_flow::airtable::AirtableStore;
use applicant_flow::config::AppConfig;
use applicant_flow::error::AppError;
use applicant_flow::telemetry;
use applicant_flow::workflows::applicants::{
    ApplicantId, ApplicantPipeline, OpenAiGenerator, RunOutcome, ShortlistConfig,
};
use clap::{Args, Parser, Subcommand};

use crate::demo::{run_demo, DemoArgs};

#[derive(Parser, Debug)]
#[command(
    name = "Applicant Pipeline",
    about = "Run the applicant compression, shortlisting, and enrichment workflows from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Gather an applicant's child records into the compressed profile
    Compress(RunArgs),
    /// Rebuild the child records from the stored compressed profile
    Decompress(RunArgs),
    /// Evaluate the shortlist criteria and record a lead when they pass
    Shortlist(RunArgs),
    /// Generate and persist a qualitative profile analysis
    Enrich(RunArgs),
    /// Run every workflow end to end against an in-memory store
    Demo(DemoArgs),
}

#[derive(Args, Debug)]
pub(crate) struct RunArgs {
    /// External applicant identifier to operate on
    #[arg(long, default_value = "A001")]
    pub(crate) applicant_id: String,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Compress(args) => run_compress(args),
        Command::Decompress(args) => run_decompress(args),
        Command::Shortlist(args) => run_shortlist(args),
        Command::Enrich(args) => run_enrich(args),
        Command::Demo(args) => run_demo(args),
    }
}

fn build_pipeline(config: &AppConfig) -> Result<ApplicantPipeline<AirtableStore>, AppError> {
    let store = Arc::new(AirtableStore::new(&config.store)?);
    Ok(ApplicantPipeline::new(store, ShortlistConfig::default()))
}

fn load() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

fn run_compress(args: RunArgs) -> Result<(), AppError> {
    let config = load()?;
    let pipeline = build_pipeline(&config)?;
    let applicant = ApplicantId(args.applicant_id);

    match pipeline.compress(&applicant)? {
        RunOutcome::Completed(document) => {
            println!(
                "Compressed profile for {} ({} experience entries) saved to the applicant row",
                applicant.0,
                document.experience.len()
            );
        }
        RunOutcome::Skipped(reason) => println!("Compression skipped: {reason}"),
    }
    Ok(())
}

fn run_decompress(args: RunArgs) -> Result<(), AppError> {
    let config = load()?;
    let pipeline = build_pipeline(&config)?;
    let applicant = ApplicantId(args.applicant_id);

    match pipeline.decompress(&applicant)? {
        RunOutcome::Completed(report) => {
            println!(
                "Synchronized {}: personal {}, salary {}, experience -{} +{}",
                applicant.0,
                report.personal.label(),
                report.salary.label(),
                report.experience_removed,
                report.experience_created
            );
        }
        RunOutcome::Skipped(reason) => println!("Decompression skipped: {reason}"),
    }
    Ok(())
}

fn run_shortlist(args: RunArgs) -> Result<(), AppError> {
    let config = load()?;
    let pipeline = build_pipeline(&config)?;
    let applicant = ApplicantId(args.applicant_id);

    match pipeline.shortlist(&applicant)? {
        RunOutcome::Completed(outcome) if outcome.passed => {
            println!("{} shortlisted: {}", applicant.0, outcome.reason_trail());
        }
        RunOutcome::Completed(_) => {
            println!("{} did not meet the shortlist criteria", applicant.0);
        }
        RunOutcome::Skipped(reason) => println!("Shortlisting skipped: {reason}"),
    }
    Ok(())
}

fn run_enrich(args: RunArgs) -> Result<(), AppError> {
    let config = load()?;
    let pipeline = build_pipeline(&config)?;
    let applicant = ApplicantId(args.applicant_id);
    let generator = OpenAiGenerator::new(config.generation.require_key()?)?;

    match pipeline.enrich(&applicant, &generator)? {
        RunOutcome::Completed(result) => {
            println!("Enriched {} (score {})", applicant.0, result.score);
            println!("  Summary: {}", result.summary);
            if !result.issues.is_empty() {
                println!("  Issues: {}", result.issues);
            }
            if !result.followups.is_empty() {
                println!("  Follow-ups:\n{}", indent(&result.followups));
            }
        }
        RunOutcome::Skipped(reason) => println!("Enrichment skipped: {reason}"),
    }
    Ok(())
}

fn indent(block: &str) -> String {
    block
        .lines()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
