//! Prompts for contract analysis and summarization

/// Build the contract analysis prompt
///
/// The contract text is embedded verbatim.
pub fn build_analysis_prompt(contract_text: &str) -> String {
    format!(
        r#"Analyze the following contract text and provide a comprehensive analysis in JSON format.

Contract Text:
{contract_text}

Please provide your analysis in the following JSON structure. IMPORTANT: If any field value is not found in the contract, set it to null:

{{
    "document_type": "Type of contract (e.g., Rental Agreement, Employment Contract, Service Agreement)",
    "key_sections": [
        {{
            "section_name": "Name of the section (e.g., Payment Terms, Term Duration, etc.)",
            "contract_start": "Contract start date in YYYY-MM-DD format or null",
            "contract_end": "Contract end date in YYYY-MM-DD format or null",
            "notice_deadline": "Notice deadline date in YYYY-MM-DD format or null",
            "upcoming_renewal": "Upcoming renewal date in YYYY-MM-DD format or null",
            "contract_value": "Total contract value with currency symbol (e.g., $24000) or null",
            "term_length": "Length of contract term (e.g., 12 months, 2 years) or null",
            "payment_type": "Payment method (e.g., cash, check, bank transfer) or null",
            "governing_law": "Governing law or jurisdiction or null",
            "location": "Where in document this section is found"
        }}
    ],
    "red_flags": [
        {{
            "issue": "Brief description of the concerning clause",
            "severity": "High/Medium/Low",
            "location": "Where in document",
            "explanation": "Why this is concerning and potential impact"
        }}
    ],
    "suggested_questions": [
        {{
            "question": "Question to ask before signing",
            "reason": "Why this question is important",
            "section": "Related section"
        }}
    ],
    "alternative_wordings": [
        {{
            "original_clause": "The problematic or unclear original text",
            "location": "Where in document",
            "issue": "What's wrong with the original",
            "suggested_wording": "Clearer, safer alternative wording",
            "benefit": "How this protects the signer"
        }}
    ]
}}

CRITICAL RULES:
- Extract ALL dates and convert them to YYYY-MM-DD format
- If a field is not mentioned in the contract, use null (not empty string) and never omit the key
- Create multiple key_sections if there are different important sections
- For contract_value, include currency symbol
- Identify at least 3-5 red flags if present
- Suggest at least 5 important questions
- Provide at least 3 alternative wordings
- Return ONLY valid JSON, no additional text or markdown"#
    )
}

/// Build the plain-language summary prompt
pub fn build_summary_prompt(text: &str) -> String {
    format!(
        r#"Please provide a concise summary of the following text. The summary should:
- Capture the main points and key information
- Be clear and easy to understand
- Be approximately 10-15 sentences long
- Focus on the most important aspects

Text to summarize:
{text}

Provide only the summary, no additional commentary."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_prompt_embeds_text_verbatim() {
        let contract = "This Agreement {not json} starts on 7/1/2024.\n  Indented clause.";
        let prompt = build_analysis_prompt(contract);
        assert!(prompt.contains(contract));
    }

    #[test]
    fn test_analysis_prompt_describes_schema() {
        let prompt = build_analysis_prompt("contract");

        for key in [
            "\"document_type\"",
            "\"key_sections\"",
            "\"notice_deadline\"",
            "\"upcoming_renewal\"",
            "\"payment_type\"",
            "\"red_flags\"",
            "\"suggested_questions\"",
            "\"alternative_wordings\"",
            "\"suggested_wording\"",
        ] {
            assert!(prompt.contains(key), "missing {key}");
        }
        assert!(prompt.contains("use null (not empty string)"));
        assert!(prompt.contains("at least 3-5 red flags"));
        assert!(prompt.contains("at least 5 important questions"));
        assert!(prompt.contains("at least 3 alternative wordings"));
    }

    #[test]
    fn test_analysis_prompt_schema_block_is_valid_json() {
        let prompt = build_analysis_prompt("contract");
        let start = prompt.find("{\n").unwrap();
        let end = prompt.rfind('}').unwrap();
        let schema: serde_json::Value = serde_json::from_str(&prompt[start..=end]).unwrap();
        assert!(schema["key_sections"].is_array());
    }

    #[test]
    fn test_summary_prompt_embeds_text() {
        let prompt = build_summary_prompt("The tenant shall pay rent monthly.");
        assert!(prompt.contains("Text to summarize:\nThe tenant shall pay rent monthly."));
        assert!(prompt.contains("Provide only the summary"));
    }
}
