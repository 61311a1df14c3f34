//! Native Gemini client over reqwest.

use crate::config::GeminiConfig;
use crate::error::ServiceError;
use crate::gemini::{GenerateContentRequest, GenerateContentResponse};
use crate::service::GenerativeService;
use async_trait::async_trait;

pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self, ServiceError> {
        Self::new(GeminiConfig::from_env())
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl GenerativeService for GeminiClient {
    fn is_configured(&self) -> bool {
        self.config.has_credential()
    }

    async fn complete(
        &self,
        prompt: &str,
        system_instruction: &str,
    ) -> Result<Option<String>, ServiceError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ServiceError::Unauthenticated)?;
        let url = self.config.generate_url();
        log::debug!("POST {url} (model {})", self.config.model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", key)
            .json(&GenerateContentRequest::new(prompt, system_instruction))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("generative service answered {status}");
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        Ok(body.text())
    }
}
