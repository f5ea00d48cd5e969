use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use std::time::Duration;

use super::client::{GeneratedImage, IntegrationClient, IntegrationError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct InvokeLlmRequest<'a> {
    prompt: &'a str,
    response_json_schema: &'a serde_json::Value,
}

#[derive(Serialize)]
struct GenerateImageRequest<'a> {
    prompt: &'a str,
}

/// JSON-over-HTTP client for the integrations backend
#[derive(Clone)]
pub struct HttpIntegrationClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpIntegrationClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, IntegrationError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| IntegrationError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/integrations/{}", self.base_url, path)
    }

    fn build_headers(&self) -> Result<HeaderMap, IntegrationError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = &self.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| IntegrationError::Config(format!("Invalid API key: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, IntegrationError> {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers()?)
            .json(body)
            .send()
            .await
            .map_err(|e| IntegrationError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(IntegrationError::Api { status, message });
        }

        Ok(response)
    }
}

#[async_trait]
impl IntegrationClient for HttpIntegrationClient {
    async fn invoke_llm(
        &self,
        prompt: &str,
        response_json_schema: &serde_json::Value,
    ) -> Result<serde_json::Value, IntegrationError> {
        let request = InvokeLlmRequest {
            prompt,
            response_json_schema,
        };
        self.post("invoke-llm", &request)
            .await?
            .json()
            .await
            .map_err(|e| IntegrationError::Parse(e.to_string()))
    }

    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, IntegrationError> {
        self.post("generate-image", &GenerateImageRequest { prompt })
            .await?
            .json()
            .await
            .map_err(|e| IntegrationError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = HttpIntegrationClient::new("http://localhost:8787/api/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8787/api");
        assert_eq!(
            client.endpoint("invoke-llm"),
            "http://localhost:8787/api/integrations/invoke-llm"
        );
    }

    #[test]
    fn test_bearer_header_only_with_key() {
        let client = HttpIntegrationClient::new("http://localhost", Some("  ".to_string())).unwrap();
        assert!(client.build_headers().unwrap().get(AUTHORIZATION).is_none());

        let client = HttpIntegrationClient::new("http://localhost", Some("secret".to_string())).unwrap();
        let headers = client.build_headers().unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer secret");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_network_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let client = HttpIntegrationClient::new("http://127.0.0.1:9", None).unwrap();
        let err = client.generate_image("a dragon").await.unwrap_err();
        assert!(matches!(err, IntegrationError::Network(_)));
    }
}
