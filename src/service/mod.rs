pub mod analysis;
pub mod llm;

pub use analysis::ContractAnalysisService;
pub use llm::{CompletionProvider, LlmClient};
