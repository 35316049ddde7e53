//! REST API endpoints for contract analysis and summarization

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::{ApiError, ErrorResponse};
use crate::model::AnalysisResult;
use crate::service::ContractAnalysisService;

/// Minimum trimmed length of contract text accepted for analysis
const MIN_CONTRACT_CHARS: usize = 50;
/// Minimum trimmed length of text accepted for summarization
const MIN_SUMMARY_CHARS: usize = 10;

/// Request body for contract analysis
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// Raw contract text, at least 50 characters after trimming
    pub contract_text: String,
}

/// Request body for summarization
#[derive(Debug, Deserialize, ToSchema)]
pub struct SummarizeRequest {
    /// Text to summarize, at least 10 characters after trimming
    pub text: String,
}

/// Summarization response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// Reject text whose trimmed length is below `min_chars`
fn require_min_length(text: &str, min_chars: usize, what: &str) -> Result<(), ApiError> {
    if text.trim().chars().count() < min_chars {
        return Err(ApiError::BadRequest(format!(
            "{} is too short or empty (minimum {} characters)",
            what, min_chars
        )));
    }
    Ok(())
}

/// Analyze contract text
///
/// Returns the document type, key sections with normalized dates, red flags,
/// suggested questions and alternative wordings.
#[utoipa::path(
    post,
    path = "/api/v1/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Contract analyzed successfully", body = AnalysisResult),
        (status = 400, description = "Contract text is too short or empty", body = ErrorResponse),
        (status = 500, description = "Analysis failed", body = ErrorResponse)
    ),
    tag = "contract-analyzer"
)]
#[post("/api/v1/analyze")]
pub async fn analyze(
    service: web::Data<ContractAnalysisService>,
    request: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, ApiError> {
    require_min_length(&request.contract_text, MIN_CONTRACT_CHARS, "Contract text")?;

    tracing::info!(
        contract_length = request.contract_text.len(),
        "Received contract analysis request"
    );

    let analysis = service.analyze(&request.contract_text).await?;
    Ok(HttpResponse::Ok().json(analysis))
}

/// Summarize text
///
/// Returns a concise plain-language summary of the submitted text.
#[utoipa::path(
    post,
    path = "/api/v1/summarize",
    request_body = SummarizeRequest,
    responses(
        (status = 200, description = "Text summarized successfully", body = SummarizeResponse),
        (status = 400, description = "Text is too short or empty", body = ErrorResponse),
        (status = 500, description = "Summarization failed", body = ErrorResponse)
    ),
    tag = "contract-analyzer"
)]
#[post("/api/v1/summarize")]
pub async fn summarize(
    service: web::Data<ContractAnalysisService>,
    request: web::Json<SummarizeRequest>,
) -> Result<HttpResponse, ApiError> {
    require_min_length(&request.text, MIN_SUMMARY_CHARS, "Text")?;

    tracing::info!(text_length = request.text.len(), "Received summarization request");

    let summary = service.summarize(&request.text).await?;
    Ok(HttpResponse::Ok().json(SummarizeResponse { summary }))
}

/// JSON extractor settings that report malformed bodies as [`ApiError::BadRequest`]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

/// Configure analysis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(analyze)
        .service(summarize);
}
