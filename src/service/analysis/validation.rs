//! Validation of normalized analysis payloads
//!
//! Maps the JSON into [`AnalysisResult`] and checks the content the type
//! system cannot express. Errors reject the analysis, warnings are only logged.

use chrono::NaiveDate;
use serde_json::Value;

use crate::model::{AnalysisResult, Severity};
use crate::service::analysis::dates::UNKNOWN_DATE;
use crate::service::analysis::error::AnalysisError;

/// Targets the prompt asks the model to meet
const MIN_RED_FLAGS: usize = 3;
const MIN_SUGGESTED_QUESTIONS: usize = 5;
const MIN_ALTERNATIVE_WORDINGS: usize = 3;

/// Legacy section keys and the schema field each one stands for
const LEGACY_SECTION_KEYS: &[(&str, &str)] = &[
    ("Notice_Deadline", "notice_deadline"),
    ("Upcoming_Renewal", "upcoming_renewal"),
    ("Payment_type", "payment_type"),
];

/// Result of analysis validation
#[derive(Debug)]
pub struct AnalysisValidationResult {
    /// Whether the analysis passed validation
    pub is_valid: bool,
    /// Critical errors that indicate invalid output
    pub errors: Vec<String>,
    /// Warnings that indicate potential quality issues
    pub warnings: Vec<String>,
}

impl AnalysisValidationResult {
    /// Create a new validation result with no issues
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error to the validation result
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Add a warning to the validation result
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

/// Map a normalized payload into the output schema and validate it
pub fn validate_analysis(
    mut data: Value,
) -> Result<(AnalysisResult, AnalysisValidationResult), AnalysisError> {
    fold_legacy_keys(&mut data);
    let analysis: AnalysisResult = serde_json::from_value(data)
        .map_err(|e| AnalysisError::ResponseValidation(e.to_string()))?;

    let report = check_analysis(&analysis);
    if !report.is_valid {
        return Err(AnalysisError::ResponseValidation(report.errors.join("; ")));
    }

    Ok((analysis, report))
}

/// Move legacy section keys onto their schema names
///
/// When both spellings are present the schema name wins and the legacy key
/// is dropped.
fn fold_legacy_keys(data: &mut Value) {
    let Some(sections) = data.get_mut("key_sections").and_then(Value::as_array_mut) else {
        return;
    };

    for section in sections.iter_mut().filter_map(Value::as_object_mut) {
        for (legacy, canonical) in LEGACY_SECTION_KEYS {
            let Some(value) = section.remove(*legacy) else {
                continue;
            };
            if section.contains_key(*canonical) {
                tracing::debug!(field = *canonical, "Dropping duplicate legacy key {}", legacy);
            } else {
                section.insert(canonical.to_string(), value);
            }
        }
    }
}

/// Content checks on an already well-typed analysis
///
/// Checks:
/// 1. `document_type` is not blank
/// 2. Date fields hold a `YYYY-MM-DD` date or `"unknown"`
/// 3. Red flag severities are High, Medium or Low (warning)
/// 4. Section counts meet the prompt's targets (warning)
pub fn check_analysis(analysis: &AnalysisResult) -> AnalysisValidationResult {
    let mut result = AnalysisValidationResult::valid();

    if analysis.document_type.trim().is_empty() {
        result.add_error("document_type is empty".to_string());
    }

    for (i, section) in analysis.key_sections.iter().enumerate() {
        for (field, value) in section.date_fields() {
            if let Some(value) = value {
                if !is_canonical_date(value) {
                    result.add_error(format!(
                        "key_sections[{}].{} is not a normalized date: '{}'",
                        i, field, value
                    ));
                }
            }
        }
    }

    for (i, flag) in analysis.red_flags.iter().enumerate() {
        if Severity::parse(&flag.severity).is_none() {
            result.add_warning(format!(
                "red_flags[{}] has non-standard severity '{}'",
                i, flag.severity
            ));
        }
    }

    let counts = [
        ("red_flags", analysis.red_flags.len(), MIN_RED_FLAGS),
        (
            "suggested_questions",
            analysis.suggested_questions.len(),
            MIN_SUGGESTED_QUESTIONS,
        ),
        (
            "alternative_wordings",
            analysis.alternative_wordings.len(),
            MIN_ALTERNATIVE_WORDINGS,
        ),
    ];
    for (name, count, minimum) in counts {
        if count < minimum {
            result.add_warning(format!(
                "{} has {} entries, fewer than the requested {}",
                name, count, minimum
            ));
        }
    }

    result
}

/// An empty string is tolerated, the normalizer leaves it alone
fn is_canonical_date(value: &str) -> bool {
    value.is_empty()
        || value == UNKNOWN_DATE
        || (value.len() == 10 && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok())
}
