//! Prompts for structured-model field extraction

use crate::model::ExtractedFields;

/// System prompt for FNOL field extraction
pub const EXTRACTION_SYSTEM_PROMPT: &str = r#"You are an insurance claims intake assistant. Your task is to extract structured fields from First Notice of Loss (FNOL) documents.

## Critical Rules

1. **Only report what the document states.** Never invent, infer or guess a value.
2. **Use null for anything not found.** A field that is not present in the text must be null, never an empty string or a placeholder such as "N/A" or "unknown".
3. **Return only JSON.** No commentary, no markdown formatting."#;

/// JSON Schema of the answer, generated from the field types
fn target_schema() -> String {
    serde_json::to_string_pretty(&schemars::schema_for!(ExtractedFields)).unwrap_or_default()
}

/// Build the extraction prompt for a document
pub fn build_extraction_prompt(document_text: &str) -> String {
    let target_schema = target_schema();
    format!(
        r#"Extract the following fields from this FNOL (First Notice of Loss) document and return ONLY valid JSON.

## Answer JSON Schema

{target_schema}

## Rules

- Use null for any field you cannot find in the document
- Do not invent or guess values
- Use exact field names as shown (camelCase); all four groups must always be present
- For monetary values (estimatedDamage, initialEstimate), return only the numeric value without currency symbols or thousands separators
- For thirdParties and attachments, use null if not found, or an array of strings if found
- Return only JSON, no additional text or markdown formatting

## Document text

{document_text}"#
    )
}
