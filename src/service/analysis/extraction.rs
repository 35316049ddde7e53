//! Recovery of the JSON payload from a raw completion
//!
//! The model is told to answer with JSON only, but it regularly wraps the
//! object in prose or markdown fences. Only that outer wrapping is stripped:
//! the payload runs from the first `{` to the last `}` and must parse as is.

use serde_json::Value;

use crate::service::analysis::error::AnalysisError;

/// Extract the JSON object embedded in `raw`
pub fn extract_json_object(raw: &str) -> Result<Value, AnalysisError> {
    let start = raw.find('{').ok_or_else(|| {
        AnalysisError::MalformedCompletion("no opening brace in completion".to_string())
    })?;
    let end = raw.rfind('}').ok_or_else(|| {
        AnalysisError::MalformedCompletion("no closing brace in completion".to_string())
    })?;

    if end < start {
        return Err(AnalysisError::MalformedCompletion(
            "closing brace precedes opening brace".to_string(),
        ));
    }

    serde_json::from_str(&raw[start..=end])
        .map_err(|e| AnalysisError::MalformedCompletion(format!("invalid JSON: {}", e)))
}
