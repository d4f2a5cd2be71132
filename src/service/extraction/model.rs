//! Structured-model field extraction
//!
//! Sends the document to the extraction model with a fixed JSON contract,
//! deterministic decoding and a bounded response, then parses and validates
//! the answer. Every failure is an [`ExternalExtractionFailure`]; there are
//! no retries.

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;

use crate::model::{ExtractedFields, ExtractionConfig};
use crate::service::extraction::prompts::{EXTRACTION_SYSTEM_PROMPT, build_extraction_prompt};
use crate::service::extraction::validation::validate_extracted_fields;
use crate::service::extraction::{ExternalExtractionFailure, ExtractionStrategy};
use crate::service::llm::LlmClient;

pub const STRATEGY_NAME: &str = "structured_model";

/// Extraction strategy backed by an external language model
pub struct ModelExtractor {
    llm_client: Option<LlmClient>,
    config: ExtractionConfig,
}

impl ModelExtractor {
    /// Create the extractor. Without a client every call fails with
    /// [`ExternalExtractionFailure::MissingCredential`].
    pub fn new(llm_client: Option<LlmClient>, config: ExtractionConfig) -> Self {
        tracing::info!(
            model = %config.model,
            enabled = llm_client.is_some(),
            timeout_secs = config.timeout_secs,
            "Structured-model extractor initialized"
        );
        Self { llm_client, config }
    }

    pub fn is_enabled(&self) -> bool {
        self.llm_client.is_some()
    }

    /// Send the document to the model and return its raw answer
    async fn request(
        &self,
        llm_client: &LlmClient,
        text: &str,
    ) -> Result<String, ExternalExtractionFailure> {
        let prompt = build_extraction_prompt(text);
        let prompt_length = prompt.len();

        tracing::debug!(
            model = %self.config.model,
            prompt_length = prompt_length,
            "Initiating OpenAI API call for field extraction"
        );

        let start_time = std::time::Instant::now();

        let agent = llm_client
            .openai_client()
            .agent(&self.config.model)
            .preamble(EXTRACTION_SYSTEM_PROMPT)
            .temperature(0.0)
            .max_tokens(self.config.max_output_tokens)
            .build();

        let timeout = self.config.timeout();
        let response = match tokio::time::timeout(timeout, agent.prompt(prompt.as_str())).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::warn!(
                    model = %self.config.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "OpenAI API call for field extraction failed"
                );
                return Err(ExternalExtractionFailure::Request(e.to_string()));
            }
            Err(_) => {
                tracing::warn!(
                    model = %self.config.model,
                    timeout_secs = timeout.as_secs(),
                    "OpenAI API call for field extraction timed out"
                );
                return Err(ExternalExtractionFailure::Timeout(timeout));
            }
        };

        tracing::info!(
            model = %self.config.model,
            elapsed_ms = start_time.elapsed().as_millis(),
            prompt_length = prompt_length,
            response_length = response.len(),
            "OpenAI API call for field extraction completed successfully"
        );

        Ok(response)
    }
}

#[async_trait]
impl ExtractionStrategy for ModelExtractor {
    fn name(&self) -> &'static str {
        STRATEGY_NAME
    }

    fn is_available(&self) -> bool {
        self.is_enabled()
    }

    async fn extract(&self, text: &str) -> Result<ExtractedFields, ExternalExtractionFailure> {
        let llm_client = self
            .llm_client
            .as_ref()
            .ok_or(ExternalExtractionFailure::MissingCredential)?;

        let response = self.request(llm_client, text).await?;
        parse_model_response(&response)
    }
}

/// Parse and validate a model answer into the field schema
pub fn parse_model_response(response: &str) -> Result<ExtractedFields, ExternalExtractionFailure> {
    let json = strip_code_fence(response);

    let mut fields: ExtractedFields = serde_json::from_str(json)
        .map_err(|e| ExternalExtractionFailure::MalformedResponse(e.to_string()))?;

    let validation = validate_extracted_fields(&mut fields);
    if !validation.is_valid {
        return Err(ExternalExtractionFailure::InvalidSchema(
            validation.errors.join("; "),
        ));
    }

    if !validation.warnings.is_empty() {
        tracing::warn!(
            warnings = ?validation.warnings,
            "Structured-model output normalized"
        );
    }

    Ok(fields)
}

/// Remove a surrounding markdown code fence (```` ``` ```` or ```` ```json ````), if any
fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. "json") on the opening line
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}
