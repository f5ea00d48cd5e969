use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while talking to the generation backend
#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
}

#[async_trait]
pub trait IntegrationClient: Send + Sync {
    /// Runs a prompt and returns the model's answer shaped by `response_json_schema`
    async fn invoke_llm(
        &self,
        prompt: &str,
        response_json_schema: &serde_json::Value,
    ) -> Result<serde_json::Value, IntegrationError>;

    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, IntegrationError>;
}
