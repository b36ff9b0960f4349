use std::env;
use std::fmt;

/// Top-level configuration for the pipeline binaries. Built once from the
/// environment and passed into constructors; nothing reads ambient state.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub generation: GenerationConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_token =
            read_var("AIRTABLE_API_TOKEN").ok_or(ConfigError::MissingStoreToken)?;
        // Legacy deployments exported the base id under plain `base`.
        let base_id = read_var("AIRTABLE_BASE_ID")
            .or_else(|| read_var("base"))
            .ok_or(ConfigError::MissingStoreBase)?;
        let api_key = read_var("OPENAI_API_KEY");
        let log_level = read_var("APP_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            store: StoreConfig { api_token, base_id },
            generation: GenerationConfig { api_key },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Credentials for the hosted record store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub api_token: String,
    pub base_id: String,
}

/// Credentials for the text-generation service. Optional at load time so
/// compression-only deployments need no generation key.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub api_key: Option<String>,
}

impl GenerationConfig {
    pub fn require_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or(ConfigError::MissingGenerationKey)
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

fn read_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

#[derive(Debug)]
pub enum ConfigError {
    MissingStoreToken,
    MissingStoreBase,
    MissingGenerationKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingStoreToken => {
                write!(f, "AIRTABLE_API_TOKEN must be set in the environment or .env file")
            }
            ConfigError::MissingStoreBase => {
                write!(f, "AIRTABLE_BASE_ID (or base) must be set in the environment or .env file")
            }
            ConfigError::MissingGenerationKey => {
                write!(f, "OPENAI_API_KEY must be set to run enrichment")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
