//! Qualitative enrichment: prompt construction, the text-generation
//! boundary, and the lenient parser over its free-text responses.

mod openai;
mod parser;
mod prompt;

pub use openai::OpenAiGenerator;
pub use parser::parse_response;
pub use prompt::enrichment_prompt;

/// Boundary to the external text-generation service: prompt in, free text
/// out. No schema is imposed on the response beyond what the parser can
/// leniently extract.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Error enumeration for text-generation failures.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("text generation transport failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("text generation service returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("text generation service returned no content")]
    EmptyContent,
}
