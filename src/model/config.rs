use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

const ENV_CONFIG_PATH: &str = "CONTRACT_ANALYZER_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_API_KEY: &str = "ANTHROPIC_API_KEY";
const ENV_MODEL: &str = "MODEL";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Output token budget for contract analysis completions
const DEFAULT_ANALYSIS_MAX_TOKENS: u64 = 4096;
/// Output token budget for summary completions
const DEFAULT_SUMMARY_MAX_TOKENS: u64 = 1024;

/// Configuration errors raised while the process starts
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// Token budget overrides read from the YAML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LlmFileConfig {
    pub analysis_max_tokens: Option<u64>,
    pub summary_max_tokens: Option<u64>,
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub llm: LlmFileConfig,
}

/// Settings for the LLM provider
#[derive(Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub analysis_max_tokens: u64,
    pub summary_max_tokens: u64,
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("analysis_max_tokens", &self.analysis_max_tokens)
            .field("summary_max_tokens", &self.summary_max_tokens)
            .finish()
    }
}

/// Application configuration
///
/// Built once at startup and handed to the services that need it.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub port: u16,
    pub host: String,
}

impl Config {
    /// Load configuration from the process environment and config file
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` to resolve environment variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingVar(ENV_API_KEY))?;

        let model = lookup(ENV_MODEL)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let config_path =
            lookup(ENV_CONFIG_PATH).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        let file = Self::load_config_file(&config_path).unwrap_or_default();

        Ok(Self {
            llm: LlmConfig {
                api_key,
                model,
                analysis_max_tokens: file
                    .llm
                    .analysis_max_tokens
                    .unwrap_or(DEFAULT_ANALYSIS_MAX_TOKENS),
                summary_max_tokens: file
                    .llm
                    .summary_max_tokens
                    .unwrap_or(DEFAULT_SUMMARY_MAX_TOKENS),
            },
            port,
            host,
        })
    }

    /// Load configuration from YAML file
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

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
