//! Application state and service initialization
//!
//! This module centralizes all service initialization and dependency injection,
//! making it easier to manage the application lifecycle and test services.

use std::sync::Arc;

use actix_web::web;

use crate::model::{Config, ConfigError};
use crate::service::{CompletionProvider, ContractAnalysisService, LlmClient};

/// Application state containing all services and shared resources
pub struct AppState {
    /// Contract analysis and summarization service
    pub analysis_service: web::Data<ContractAnalysisService>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// Fails when the LLM client cannot be created from the configured API key.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let llm_client = LlmClient::new(&config.llm.api_key)
            .map_err(|e| AppError::InvalidConfig(format!("Invalid ANTHROPIC_API_KEY: {}", e)))?;

        Ok(Self::with_provider(Arc::new(llm_client), config))
    }

    /// Build application state on top of an existing completion provider
    pub fn with_provider(llm: Arc<dyn CompletionProvider>, config: &Config) -> Self {
        let analysis_service = web::Data::new(ContractAnalysisService::new(llm, &config.llm));

        Self { analysis_service }
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Missing required configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
