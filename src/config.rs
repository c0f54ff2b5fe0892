use crate::core::{MatchPolicy, DEFAULT_FUZZY_THRESHOLD, DEFAULT_MIN_ADDRESS_TOKENS, DEFAULT_STREET_TYPES};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use validator::Validate;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub registry: RegistrySettings,
    pub extraction: ExtractionSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    /// Upper bound on the JSON body, which carries both base64 images
    pub max_payload_bytes: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrySettings {
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    /// Fixed jurisdiction every lookup is scoped to, e.g. `/us/tx/dallas`
    pub jurisdiction_path: String,
    pub timeout_secs: Option<u64>,
}

impl RegistrySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(30))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    #[serde(default = "default_tesseract_path")]
    pub tesseract_path: String,
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,
    pub ner_endpoint: String,
    pub ner_timeout_secs: Option<u64>,
}

impl ExtractionSettings {
    pub fn ner_timeout(&self) -> Duration {
        Duration::from_secs(self.ner_timeout_secs.unwrap_or(30))
    }
}

fn default_tesseract_path() -> String { "tesseract".to_string() }
fn default_ocr_language() -> String { "eng".to_string() }

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MatchingSettings {
    #[validate(range(max = 100))]
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: u8,
    #[validate(range(min = 1, max = 5))]
    #[serde(default = "default_min_address_tokens")]
    pub min_address_tokens: usize,
    #[validate(length(min = 1))]
    #[serde(default = "default_street_types")]
    pub street_types: Vec<String>,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            fuzzy_threshold: default_fuzzy_threshold(),
            min_address_tokens: default_min_address_tokens(),
            street_types: default_street_types(),
        }
    }
}

impl MatchingSettings {
    pub fn policy(&self) -> MatchPolicy {
        MatchPolicy {
            fuzzy_threshold: self.fuzzy_threshold,
            min_address_tokens: self.min_address_tokens,
            street_types: self.street_types.clone(),
        }
    }
}

fn default_fuzzy_threshold() -> u8 { DEFAULT_FUZZY_THRESHOLD }
fn default_min_address_tokens() -> usize { DEFAULT_MIN_ADDRESS_TOKENS }
fn default_street_types() -> Vec<String> {
    DEFAULT_STREET_TYPES.iter().map(|s| s.to_string()).collect()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with DEEDCHECK_)
    /// 5. REGRID_API_KEY, if set
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., DEEDCHECK_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("DEEDCHECK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        let settings: Settings = settings.try_deserialize()?;
        settings.check()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("DEEDCHECK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.check()?;
        Ok(settings)
    }

    fn check(&self) -> Result<(), ConfigError> {
        self.matching
            .validate()
            .map_err(|e| ConfigError::Message(format!("invalid matching settings: {}", e)))?;

        if self.matching.street_types.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::Message("street_types must not contain blank entries".into()));
        }

        if self.registry.api_key.is_empty() {
            tracing::warn!("Registry API key is empty; lookups will be rejected");
        }

        Ok(())
    }
}

/// The registry credential is conventionally exported as REGRID_API_KEY
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(api_key) = env::var("REGRID_API_KEY") {
        builder = builder.set_override("registry.api_key", api_key)?;
    }

    builder.build()
}
