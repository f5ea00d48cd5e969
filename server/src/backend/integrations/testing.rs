//! Scripted stand-in for the generation backend

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::client::{GeneratedImage, IntegrationClient, IntegrationError};

/// Replays queued responses and records every prompt it receives
#[derive(Default)]
pub struct ScriptedIntegrationClient {
    llm_responses: Mutex<VecDeque<Result<serde_json::Value, IntegrationError>>>,
    image_responses: Mutex<VecDeque<Result<GeneratedImage, IntegrationError>>>,
    llm_prompts: Mutex<Vec<String>>,
    image_prompts: Mutex<Vec<String>>,
}

impl ScriptedIntegrationClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_llm(&self, response: Result<serde_json::Value, IntegrationError>) {
        self.llm_responses.lock().unwrap().push_back(response);
    }

    pub fn push_image(&self, response: Result<GeneratedImage, IntegrationError>) {
        self.image_responses.lock().unwrap().push_back(response);
    }

    pub fn push_image_url(&self, url: &str) {
        self.push_image(Ok(GeneratedImage { url: url.to_string() }));
    }

    pub fn llm_prompts(&self) -> Vec<String> {
        self.llm_prompts.lock().unwrap().clone()
    }

    pub fn image_prompts(&self) -> Vec<String> {
        self.image_prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.llm_prompts.lock().unwrap().len() + self.image_prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl IntegrationClient for ScriptedIntegrationClient {
    async fn invoke_llm(
        &self,
        prompt: &str,
        _response_json_schema: &serde_json::Value,
    ) -> Result<serde_json::Value, IntegrationError> {
        self.llm_prompts.lock().unwrap().push(prompt.to_string());
        self.llm_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(IntegrationError::Network("no scripted LLM response".to_string())))
    }

    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, IntegrationError> {
        self.image_prompts.lock().unwrap().push(prompt.to_string());
        self.image_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(IntegrationError::Network("no scripted image response".to_string())))
    }
}
