//! Date normalization over the raw analysis payload
//!
//! Runs on the untyped JSON before schema validation so that a badly written
//! date degrades to `"unknown"` instead of failing the whole analysis.

use serde_json::Value;

use crate::service::analysis::dates::normalize_date;

/// Date-valued keys inside each `key_sections` entry
///
/// The capitalized keys are the names older prompts asked for.
const DATE_FIELDS: &[&str] = &[
    "contract_start",
    "contract_end",
    "notice_deadline",
    "upcoming_renewal",
    "Notice_Deadline",
    "Upcoming_Renewal",
];

/// Rewrite every date field in `key_sections` to its normalized form
///
/// Never fails. Entries and fields are kept in place, unexpected shapes are
/// passed through untouched.
pub fn normalize_analysis(mut data: Value) -> Value {
    let Some(sections) = data.get_mut("key_sections") else {
        return data;
    };

    let Some(sections) = sections.as_array_mut() else {
        tracing::warn!("key_sections is not an array, skipping date normalization");
        return data;
    };

    for (i, section) in sections.iter_mut().enumerate() {
        let Some(section) = section.as_object_mut() else {
            tracing::warn!(index = i, "key_sections entry is not an object, skipping");
            continue;
        };

        for field in DATE_FIELDS {
            if let Some(value) = section.get_mut(*field) {
                if is_empty(value) {
                    continue;
                }
                let normalized = normalize_date(&value_as_text(value)).to_string();
                *value = Value::String(normalized);
            }
        }
    }

    data
}

/// Values the model uses for "not present"
///
/// Anything else, including `false` and `0`, goes through the date parser.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_analysis() -> Value {
        json!({
            "document_type": "Service Agreement",
            "key_sections": [
                {
                    "section_name": "Term",
                    "contract_start": "01-07-2024",
                    "contract_end": "2025/6/30",
                    "notice_deadline": "n/a",
                    "upcoming_renewal": null,
                    "contract_value": "$24000",
                    "term_length": "12 months",
                    "payment_type": null,
                    "governing_law": "California",
                    "location": "Section 2"
                }
            ],
            "red_flags": [],
            "suggested_questions": [],
            "alternative_wordings": []
        })
    }

    #[test]
    fn test_normalizes_start_date_and_leaves_other_fields() {
        let input = json!({
            "document_type": "Lease",
            "key_sections": [
                {
                    "section_name": "Term",
                    "contract_start": "01-07-2024",
                    "contract_value": "$1200",
                    "location": "Clause 1"
                }
            ],
            "red_flags": [{"issue": "x", "severity": "High", "location": "y", "explanation": "z"}]
        });

        let output = normalize_analysis(input.clone());

        assert_eq!(output["key_sections"][0]["contract_start"], "2024-07-01");

        let mut expected = input;
        expected["key_sections"][0]["contract_start"] = json!("2024-07-01");
        assert_eq!(output, expected);
    }

    #[test]
    fn test_normalizes_all_date_fields() {
        let output = normalize_analysis(sample_analysis());
        let section = &output["key_sections"][0];

        assert_eq!(section["contract_start"], "2024-07-01");
        assert_eq!(section["contract_end"], "2025-06-30");
        assert_eq!(section["notice_deadline"], "unknown");
        assert!(section["upcoming_renewal"].is_null());
        assert_eq!(section["term_length"], "12 months");
    }

    #[test]
    fn test_is_idempotent() {
        let once = normalize_analysis(sample_analysis());
        let twice = normalize_analysis(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_legacy_keys_are_normalized() {
        let output = normalize_analysis(json!({
            "key_sections": [{"Notice_Deadline": "6/1/2024", "Upcoming_Renewal": "soon"}]
        }));

        assert_eq!(output["key_sections"][0]["Notice_Deadline"], "2024-06-01");
        assert_eq!(output["key_sections"][0]["Upcoming_Renewal"], "unknown");
    }

    #[test]
    fn test_empty_values_are_untouched() {
        let output = normalize_analysis(json!({
            "key_sections": [{"contract_start": "", "contract_end": null}]
        }));

        assert_eq!(output["key_sections"][0]["contract_start"], "");
        assert!(output["key_sections"][0]["contract_end"].is_null());
    }

    #[test]
    fn test_non_string_dates_become_unknown() {
        let output = normalize_analysis(json!({
            "key_sections": [{
                "contract_start": 20240701,
                "contract_end": false,
                "notice_deadline": 0,
                "upcoming_renewal": true
            }]
        }));

        let section = &output["key_sections"][0];
        for field in ["contract_start", "contract_end", "notice_deadline", "upcoming_renewal"] {
            assert_eq!(section[field], "unknown", "{field}");
        }
    }

    #[test]
    fn test_unexpected_shapes_pass_through() {
        let not_array = json!({"key_sections": "none"});
        assert_eq!(normalize_analysis(not_array.clone()), not_array);

        let mixed = json!({"key_sections": [42, {"contract_start": "2024-1-2"}]});
        let output = normalize_analysis(mixed);
        assert_eq!(output["key_sections"][0], 42);
        assert_eq!(output["key_sections"][1]["contract_start"], "2024-01-02");

        let missing = json!({"document_type": "NDA"});
        assert_eq!(normalize_analysis(missing.clone()), missing);
    }

    #[test]
    fn test_extra_fields_are_preserved() {
        let output = normalize_analysis(json!({
            "key_sections": [{"contract_start": "2024-7-1", "confidence": "high"}],
            "model_notes": "extra"
        }));

        assert_eq!(output["key_sections"][0]["confidence"], "high");
        assert_eq!(output["model_notes"], "extra");
    }
}
