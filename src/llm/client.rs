use super::types::*;
use crate::{
    Error, Result,
    config::LlmConfig,
    error::GENERATION_FAILED,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Issues exactly one `generateContent` call for `prompt`.
    async fn generate_content(&self, prompt: &str) -> Result<Completion>;
}

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key().map(str::to_string),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate_content(&self, prompt: &str) -> Result<Completion> {
        let api_key = self.api_key.as_deref().ok_or(Error::MissingApiKey)?;

        debug!(
            "Sending generateContent request to model {} ({} prompt chars)",
            self.model,
            prompt.chars().count()
        );

        let body = GenerateContentRequest::from_prompt(prompt);
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // A non-JSON error body still keeps the provider's status.
            let bytes = response
                .bytes()
                .await
                .map_err(|e| Error::transport(e.without_url().to_string()))?;
            let body = serde_json::from_slice::<ProviderErrorBody>(&bytes).unwrap_or_default();
            let message = body
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| GENERATION_FAILED.to_string());

            warn!(
                "Provider rejected request with status {} ({}): {}",
                status,
                body.status().unwrap_or("unknown"),
                message
            );
            return Err(Error::provider(status.as_u16(), message));
        }

        let decoded: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::transport(format!("Malformed provider response: {}", e.without_url())))?;

        debug!(
            "Received generateContent response with {} candidates",
            decoded.candidates.as_ref().map_or(0, Vec::len)
        );

        Ok(decoded.into_completion())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_config() -> LlmConfig {
        LlmConfig {
            base_url: "https://generativelanguage.googleapis.com/".to_string(),
            api_key: Some("test-api-key".to_string()),
            model: "gemini-2.0-flash".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_gemini_client_creation() {
        let client = GeminiClient::new(&create_test_config()).unwrap();
        assert_eq!(client.model(), "gemini-2.0-flash");
        assert_eq!(client.api_key.as_deref(), Some("test-api-key"));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = GeminiClient::new(&create_test_config()).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_blank_key_is_treated_as_missing() {
        let mut config = create_test_config();
        config.api_key = Some("   ".to_string());
        let client = GeminiClient::new(&config).unwrap();
        assert!(client.api_key.is_none());
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_sending() {
        let mut config = create_test_config();
        config.api_key = None;
        // Unroutable base URL: reaching the network would surface a transport error instead.
        config.base_url = "http://127.0.0.1:9".to_string();
        let client = GeminiClient::new(&config).unwrap();

        let err = client.generate_content("prompt").await.unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));
    }
}
