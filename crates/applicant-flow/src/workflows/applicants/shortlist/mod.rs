mod config;
mod rules;

pub use config::ShortlistConfig;

use crate::workflows::applicants::domain::ProfileDocument;

/// Stateless evaluator applying the shortlist criteria to a document.
pub struct ShortlistEngine {
    config: ShortlistConfig,
}

impl ShortlistEngine {
    pub fn new(config: ShortlistConfig) -> Self {
        Self { config }
    }

    /// Pure, total decision: missing data fails the relevant check through
    /// the codec's defaulting convention, never through an error.
    pub fn evaluate(&self, document: &ProfileDocument) -> ShortlistOutcome {
        let reasons = rules::collect_reasons(document, &self.config);
        let passed = reasons.len() >= rules::CHECK_COUNT;
        ShortlistOutcome { passed, reasons }
    }
}

/// Decision plus the ordered reasons contributed by the checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortlistOutcome {
    pub passed: bool,
    pub reasons: Vec<String>,
}

impl ShortlistOutcome {
    /// Semicolon-joined reasons in check order; empty when not passed.
    pub fn reason_trail(&self) -> String {
        if self.passed {
            self.reasons.join("; ")
        } else {
            String::new()
        }
    }
}
