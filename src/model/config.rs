//! Engine configuration
//!
//! Loaded once before a run from an optional YAML file plus environment
//! variables. Missing or malformed configuration never fails startup;
//! every field falls back to its default.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

const ENV_CONFIG_PATH: &str = "GREENWASH_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// YAML configuration file structure; every field optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub max_concurrent_requests: Option<usize>,
    #[serde(default)]
    pub max_retries: Option<u32>,
    #[serde(default)]
    pub retry_base_delay_secs: Option<u64>,
    #[serde(default)]
    pub extraction_timeout_secs: Option<u64>,
    #[serde(default)]
    pub assessment_timeout_secs: Option<u64>,
    #[serde(default)]
    pub max_claims_per_prompt: Option<usize>,
    #[serde(default)]
    pub max_context_chars: Option<usize>,
    #[serde(default)]
    pub max_document_chars: Option<usize>,
}

/// Engine configuration shared by all services in a run
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum simultaneous outstanding oracle calls
    pub max_concurrent_requests: usize,
    /// Retries after the first attempt of each oracle call
    pub max_retries: u32,
    /// Base delay for exponential backoff
    pub retry_base_delay: Duration,
    /// Request timeout for claim extraction; larger than the assessment
    /// budget since extraction reads the whole document
    pub extraction_timeout: Duration,
    /// Request timeout for one criterion assessment
    pub assessment_timeout: Duration,
    /// Claims included per assessment prompt
    pub max_claims_per_prompt: usize,
    /// Document context characters included per assessment prompt
    pub max_context_chars: usize,
    /// Document characters sent to the extraction prompt
    pub max_document_chars: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 10,
            max_retries: 2,
            retry_base_delay: Duration::from_secs(1),
            extraction_timeout: Duration::from_secs(60),
            assessment_timeout: Duration::from_secs(30),
            max_claims_per_prompt: 50,
            max_context_chars: 3000,
            max_document_chars: 48_000,
        }
    }
}

impl EngineConfig {
    /// Load configuration from the YAML file named by `GREENWASH_CONFIG_PATH`
    /// (default `config.yaml`), falling back to defaults for anything
    /// missing or unreadable
    pub fn from_env() -> Self {
        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path).unwrap_or_default();
        Self::from_file(file)
    }

    /// Merge a parsed config file over the defaults
    pub fn from_file(file: ConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            max_concurrent_requests: file
                .max_concurrent_requests
                .filter(|&n| n > 0)
                .unwrap_or(defaults.max_concurrent_requests),
            max_retries: file.max_retries.unwrap_or(defaults.max_retries),
            retry_base_delay: file
                .retry_base_delay_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.retry_base_delay),
            extraction_timeout: file
                .extraction_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.extraction_timeout),
            assessment_timeout: file
                .assessment_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.assessment_timeout),
            max_claims_per_prompt: file
                .max_claims_per_prompt
                .filter(|&n| n > 0)
                .unwrap_or(defaults.max_claims_per_prompt),
            max_context_chars: file
                .max_context_chars
                .unwrap_or(defaults.max_context_chars),
            max_document_chars: file
                .max_document_chars
                .filter(|&n| n > 0)
                .unwrap_or(defaults.max_document_chars),
        }
    }

    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }
}
