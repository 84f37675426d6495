//! HTTP Transport for the Gemini REST API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};

use super::GenerativeApi;
use crate::config::GeminiConfig;
use crate::error::{GenAiError, Result};
use crate::wire::{
    GenerateContentRequest, GenerateContentResponse, GenerateVideosRequest, VideoOperation,
};

/// Gemini REST transport
///
/// Builds a fresh `reqwest::Client` per request: the credential can change
/// between calls and no connection state is shared across them.
pub struct HttpGeminiApi {
    config: GeminiConfig,
}

impl HttpGeminiApi {
    pub const fn new(config: GeminiConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(GeminiConfig::from_env()?))
    }

    fn http(&self) -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()
            .map_err(GenAiError::Http)
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            401 | 403 => GenAiError::AccessDenied(body),
            code => GenAiError::Api { status: code, body },
        })
    }
}

#[async_trait]
impl GenerativeApi for HttpGeminiApi {
    async fn generate_content(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        tracing::debug!(model, "generateContent request");

        let response = self
            .http()?
            .post(format!(
                "{}/models/{}:generateContent",
                self.config.api_base, model
            ))
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn start_video_job(
        &self,
        model: &str,
        request: GenerateVideosRequest,
    ) -> Result<VideoOperation> {
        tracing::debug!(model, "video job submission");

        let response = self
            .http()?
            .post(format!(
                "{}/models/{}:predictLongRunning",
                self.config.api_base, model
            ))
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn poll_video_job(&self, operation_name: &str) -> Result<VideoOperation> {
        tracing::debug!(operation_name, "video job status check");

        let response = self
            .http()?
            .get(format!("{}/{}", self.config.api_base, operation_name))
            .header("x-goog-api-key", &self.config.api_key)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn fetch_media(&self, uri: &str) -> Result<Vec<u8>> {
        tracing::debug!(uri, "fetching generated media");

        // The result locator is unauthenticated by default; the key goes on
        // the query string for this one call.
        let response = self
            .http()?
            .get(uri)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .await?;

        let bytes = Self::check(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    fn name(&self) -> &str {
        "gemini-http"
    }
}
