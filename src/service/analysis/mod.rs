//! Contract analysis service using LLM
//!
//! Turns raw contract text into a validated [`AnalysisResult`], or into a
//! plain-language summary. One provider call per operation, never retried.

use std::sync::Arc;

use crate::model::{AnalysisResult, LlmConfig};
use crate::service::analysis::extraction::extract_json_object;
use crate::service::analysis::normalization::normalize_analysis;
use crate::service::analysis::prompts::{build_analysis_prompt, build_summary_prompt};
use crate::service::analysis::validation::validate_analysis;
use crate::service::llm::{CompletionProvider, CompletionRequest};

pub mod dates;
pub mod error;
pub mod extraction;
pub mod normalization;
pub mod prompts;
pub mod validation;

pub use error::AnalysisError;

/// Service for analyzing and summarizing contracts
pub struct ContractAnalysisService {
    llm: Arc<dyn CompletionProvider>,
    model: String,
    analysis_max_tokens: u64,
    summary_max_tokens: u64,
}

impl ContractAnalysisService {
    /// Creates a new analysis service on top of a shared completion provider
    pub fn new(llm: Arc<dyn CompletionProvider>, config: &LlmConfig) -> Self {
        tracing::info!(
            model = %config.model,
            analysis_max_tokens = config.analysis_max_tokens,
            summary_max_tokens = config.summary_max_tokens,
            "Contract analysis service initialized"
        );

        Self {
            llm,
            model: config.model.clone(),
            analysis_max_tokens: config.analysis_max_tokens,
            summary_max_tokens: config.summary_max_tokens,
        }
    }

    /// Analyze contract text into a structured risk report
    pub async fn analyze(&self, contract_text: &str) -> Result<AnalysisResult, AnalysisError> {
        let prompt = build_analysis_prompt(contract_text);
        let completion = self
            .complete("analysis", &prompt, self.analysis_max_tokens)
            .await?;

        let data = extract_json_object(&completion).inspect_err(|e| {
            tracing::error!(
                error = %e,
                completion_length = completion.len(),
                "Failed to extract JSON from analysis completion"
            );
        })?;

        let data = normalize_analysis(data);

        let (analysis, report) = validate_analysis(data).inspect_err(|e| {
            tracing::error!(error = %e, "Analysis failed schema validation");
        })?;

        for warning in &report.warnings {
            tracing::warn!(warning = %warning, "Analysis quality warning");
        }

        tracing::debug!(
            document_type = %analysis.document_type,
            key_sections = analysis.key_sections.len(),
            red_flags = analysis.red_flags.len(),
            suggested_questions = analysis.suggested_questions.len(),
            alternative_wordings = analysis.alternative_wordings.len(),
            "Contract analysis completed"
        );

        Ok(analysis)
    }

    /// Summarize arbitrary text in plain language
    pub async fn summarize(&self, text: &str) -> Result<String, AnalysisError> {
        let prompt = build_summary_prompt(text);
        let completion = self
            .complete("summary", &prompt, self.summary_max_tokens)
            .await?;

        Ok(completion.trim().to_string())
    }

    async fn complete(
        &self,
        operation: &'static str,
        prompt: &str,
        max_tokens: u64,
    ) -> Result<String, AnalysisError> {
        let start_time = std::time::Instant::now();
        let prompt_length = prompt.len();

        tracing::debug!(
            operation = operation,
            model = %self.model,
            max_tokens = max_tokens,
            "Initiating LLM call"
        );

        let request = CompletionRequest {
            model: &self.model,
            max_tokens,
            prompt,
        };

        match self.llm.complete(request).await {
            Ok(completion) => {
                tracing::info!(
                    operation = operation,
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    prompt_length = prompt_length,
                    completion_length = completion.len(),
                    "LLM call completed successfully"
                );
                Ok(completion)
            }
            Err(e) => {
                tracing::error!(
                    operation = operation,
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    prompt_length = prompt_length,
                    error = %e,
                    "LLM call failed"
                );
                Err(AnalysisError::Upstream(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::llm::testing::ScriptedProvider;

    const CONTRACT: &str = "This Rental Agreement begins on 7/1/2024 and runs for twelve months. \
                            Rent of $2000 is due monthly by bank transfer.";

    fn config() -> LlmConfig {
        LlmConfig {
            api_key: "sk-test".to_string(),
            model: "claude-test".to_string(),
            analysis_max_tokens: 4096,
            summary_max_tokens: 1024,
        }
    }

    fn service(provider: &Arc<ScriptedProvider>) -> ContractAnalysisService {
        let llm: Arc<dyn CompletionProvider> = provider.clone();
        ContractAnalysisService::new(llm, &config())
    }

    const COMPLETION: &str = r#"Here is the analysis you asked for:
```json
{
  "document_type": "Rental Agreement",
  "key_sections": [
    {
      "section_name": "Term",
      "contract_start": "7/1/2024",
      "contract_end": "2025-6-30",
      "Notice_Deadline": "N/A",
      "upcoming_renewal": null,
      "contract_value": "$24000",
      "term_length": "12 months",
      "Payment_type": "bank transfer",
      "governing_law": null,
      "location": "Paragraph 1"
    }
  ],
  "red_flags": [
    {"issue": "No notice period", "severity": "Medium", "location": "Paragraph 1", "explanation": "Termination terms are unclear"}
  ],
  "suggested_questions": [
    {"question": "Is there a grace period?", "reason": "Late fees", "section": "Payment"}
  ],
  "alternative_wordings": []
}
```
Let me know if you need anything else."#;

    #[tokio::test]
    async fn test_analyze_runs_full_pipeline() {
        let provider = Arc::new(ScriptedProvider::replying(COMPLETION));
        let analysis = service(&provider).analyze(CONTRACT).await.unwrap();

        assert_eq!(analysis.document_type, "Rental Agreement");
        let section = &analysis.key_sections[0];
        assert_eq!(section.contract_start.as_deref(), Some("2024-07-01"));
        assert_eq!(section.contract_end.as_deref(), Some("2025-06-30"));
        assert_eq!(section.notice_deadline.as_deref(), Some("unknown"));
        assert_eq!(section.upcoming_renewal, None);
        assert_eq!(section.payment_type.as_deref(), Some("bank transfer"));
        assert_eq!(analysis.red_flags.len(), 1);
        assert!(analysis.alternative_wordings.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_sends_single_request() {
        let provider = Arc::new(ScriptedProvider::replying(COMPLETION));
        service(&provider).analyze(CONTRACT).await.unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        let (model, max_tokens, prompt) = &requests[0];
        assert_eq!(model, "claude-test");
        assert_eq!(*max_tokens, 4096);
        assert!(prompt.contains(CONTRACT));
    }

    #[tokio::test]
    async fn test_analyze_upstream_failure_is_not_retried() {
        let provider = Arc::new(ScriptedProvider::failing("rate limited"));
        let result = service(&provider).analyze(CONTRACT).await;

        assert!(matches!(result, Err(AnalysisError::Upstream(_))));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_analyze_malformed_completion() {
        let provider = Arc::new(ScriptedProvider::replying(
            "I'm sorry, I can't help with that contract.",
        ));
        let result = service(&provider).analyze(CONTRACT).await;

        assert!(matches!(result, Err(AnalysisError::MalformedCompletion(_))));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_analyze_accepts_both_key_spellings() {
        let provider = Arc::new(ScriptedProvider::replying(
            r#"{
                "document_type": "Lease",
                "key_sections": [{
                    "section_name": "T",
                    "location": "L",
                    "notice_deadline": "2024-1-2",
                    "Notice_Deadline": "2024-1-2"
                }],
                "red_flags": [],
                "suggested_questions": [],
                "alternative_wordings": []
            }"#,
        ));
        let analysis = service(&provider).analyze(CONTRACT).await.unwrap();

        assert_eq!(
            analysis.key_sections[0].notice_deadline.as_deref(),
            Some("2024-01-02")
        );
    }

    #[tokio::test]
    async fn test_analyze_schema_mismatch() {
        let provider = Arc::new(ScriptedProvider::replying(
            r#"{"document_type": "Lease", "key_sections": []}"#,
        ));
        let result = service(&provider).analyze(CONTRACT).await;

        assert!(matches!(result, Err(AnalysisError::ResponseValidation(_))));
    }

    #[tokio::test]
    async fn test_summarize_trims_completion() {
        let provider = Arc::new(ScriptedProvider::replying(
            "\n\n  The tenant rents the unit for a year.  \n",
        ));
        let summary = service(&provider).summarize("Some long text").await.unwrap();

        assert_eq!(summary, "The tenant rents the unit for a year.");
        let requests = provider.requests();
        assert_eq!(requests[0].1, 1024);
        assert!(requests[0].2.contains("Some long text"));
    }

    #[tokio::test]
    async fn test_summarize_does_not_parse_json() {
        let provider = Arc::new(ScriptedProvider::replying("{ not json at all"));
        let summary = service(&provider).summarize("Some long text").await.unwrap();
        assert_eq!(summary, "{ not json at all");
    }

    #[tokio::test]
    async fn test_summarize_upstream_failure() {
        let provider = Arc::new(ScriptedProvider::failing("unauthorized"));
        let result = service(&provider).summarize("Some long text").await;

        assert!(matches!(result, Err(AnalysisError::Upstream(_))));
        assert_eq!(provider.call_count(), 1);
    }
}
