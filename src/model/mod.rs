pub mod analysis;
pub mod config;

pub use analysis::{AnalysisResult, Severity};
pub use config::{Config, ConfigError, LlmConfig};
