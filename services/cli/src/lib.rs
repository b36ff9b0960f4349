mod cli;
mod demo;
mod infra;

use applicant_flow::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
