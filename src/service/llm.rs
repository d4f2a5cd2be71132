//! Shared LLM client
//!
//! Wraps the OpenAI provider from rig-core used by the structured-model extractor.

use rig::providers::openai;

/// Shared LLM client wrapper
#[derive(Clone)]
pub struct LlmClient {
    client: openai::Client,
}

impl LlmClient {
    /// Create a new LLM client with the provided API key
    pub fn new(api_key: &str) -> Result<Self, String> {
        let client = openai::Client::new(api_key)
            .map_err(|e| format!("Failed to create OpenAI client: {}", e))?;

        Ok(Self { client })
    }

    /// Get a reference to the underlying OpenAI client
    pub fn openai_client(&self) -> &openai::Client {
        &self.client
    }
}
