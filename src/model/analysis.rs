//! Contract analysis output schema
//!
//! These types are the validated shape returned by `POST /api/v1/analyze`.
//! Model output is mapped into them after date normalization; keys the model
//! invents on top of this schema are dropped at that point.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validated contract analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    /// Type of contract (e.g. Rental Agreement, Employment Contract)
    pub document_type: String,
    pub key_sections: Vec<KeySection>,
    pub red_flags: Vec<RedFlag>,
    pub suggested_questions: Vec<Question>,
    pub alternative_wordings: Vec<AlternativeWording>,
}

/// A notable section of the contract with its extracted terms
///
/// Date fields hold either a `YYYY-MM-DD` date or `"unknown"`; every other
/// optional field is `null` when the contract does not mention it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct KeySection {
    pub section_name: String,
    #[serde(default)]
    pub contract_start: Option<String>,
    #[serde(default)]
    pub contract_end: Option<String>,
    #[serde(default, alias = "Notice_Deadline")]
    pub notice_deadline: Option<String>,
    #[serde(default, alias = "Upcoming_Renewal")]
    pub upcoming_renewal: Option<String>,
    #[serde(default)]
    pub contract_value: Option<String>,
    #[serde(default)]
    pub term_length: Option<String>,
    #[serde(default, alias = "Payment_type")]
    pub payment_type: Option<String>,
    #[serde(default)]
    pub governing_law: Option<String>,
    /// Where in the document this section is found
    pub location: String,
}

impl KeySection {
    /// Date-valued fields paired with their JSON key
    pub fn date_fields(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("contract_start", self.contract_start.as_deref()),
            ("contract_end", self.contract_end.as_deref()),
            ("notice_deadline", self.notice_deadline.as_deref()),
            ("upcoming_renewal", self.upcoming_renewal.as_deref()),
        ]
    }
}

/// A clause that should concern the signer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RedFlag {
    pub issue: String,
    /// Expected to be High, Medium or Low; other values are passed through
    pub severity: String,
    pub location: String,
    pub explanation: String,
}

/// A question the signer should ask before signing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    pub question: String,
    pub reason: String,
    pub section: String,
}

/// A safer rewording of a problematic clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AlternativeWording {
    pub original_clause: String,
    pub location: String,
    pub issue: String,
    pub suggested_wording: String,
    pub benefit: String,
}

/// Red flag severity as requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Parse a severity label, ignoring case and surrounding whitespace
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "high" => Some(Severity::High),
            "medium" => Some(Severity::Medium),
            "low" => Some(Severity::Low),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_section_accepts_legacy_keys() {
        let section: KeySection = serde_json::from_value(json!({
            "section_name": "Term",
            "Notice_Deadline": "2024-06-01",
            "Upcoming_Renewal": null,
            "Payment_type": "bank transfer",
            "location": "Section 2"
        }))
        .unwrap();

        assert_eq!(section.notice_deadline.as_deref(), Some("2024-06-01"));
        assert_eq!(section.upcoming_renewal, None);
        assert_eq!(section.payment_type.as_deref(), Some("bank transfer"));
        assert_eq!(section.contract_start, None);
    }

    #[test]
    fn test_key_section_serializes_snake_case() {
        let section = KeySection {
            section_name: "Payment Terms".to_string(),
            contract_start: None,
            contract_end: None,
            notice_deadline: Some("unknown".to_string()),
            upcoming_renewal: None,
            contract_value: Some("$24000".to_string()),
            term_length: None,
            payment_type: None,
            governing_law: None,
            location: "Section 4".to_string(),
        };

        let value = serde_json::to_value(&section).unwrap();
        assert_eq!(value["notice_deadline"], "unknown");
        assert!(value["contract_start"].is_null());
        assert!(value.get("Notice_Deadline").is_none());
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!(Severity::parse(" HIGH "), Some(Severity::High));
        assert_eq!(Severity::parse("medium"), Some(Severity::Medium));
        assert_eq!(Severity::parse("Low"), Some(Severity::Low));
        assert_eq!(Severity::parse("Critical"), None);
    }
}
