//! HTTP client for OpenAI-compatible chat completion and image endpoints.

use super::conversion::{from_chat_response, from_image_response, to_chat_request, to_image_request};
use super::dto::{ChatResponse, ImageGenerationResponse};
use crate::metrics::{GenerationMetrics, classify_error};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Instant;
use storyloom_core::{ImageRequest, TextRequest};
use storyloom_error::{
    GenerationError, GenerationErrorKind, HttpError, StoryloomError, StoryloomResult,
};
use storyloom_interface::{ImageGenerator, TextGenerator};
use tracing::{debug, error, instrument};

const CHAT_COMPLETIONS_PATH: &str = "chat/completions";
const IMAGE_GENERATIONS_PATH: &str = "images/generations";

/// Client for providers speaking the OpenAI wire format.
///
/// Implements both [`TextGenerator`] and [`ImageGenerator`]. The model is
/// chosen per request, so one client serves every stage.
#[derive(Clone)]
pub struct OpenAiCompatibleClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for OpenAiCompatibleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenAiCompatibleClient {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Bearer token sent with every request
    /// * `base_url` - API root, e.g. `https://api.openai.com/v1`
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(base_url = %base_url, "Creating OpenAI-compatible client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url,
        }
    }

    /// Creates a client with the API key read from the environment variable `env_var`.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or blank.
    #[instrument(skip(base_url))]
    pub fn from_env(env_var: &str, base_url: impl Into<String>) -> StoryloomResult<Self> {
        let api_key = std::env::var(env_var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                GenerationError::new(GenerationErrorKind::MissingCredentials(format!(
                    "{} not set",
                    env_var
                )))
            })?;
        Ok(Self::new(api_key, base_url))
    }

    /// API root requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// POST `body` to `path` and decode the JSON answer.
    #[instrument(skip(self, body))]
    async fn post<B, R>(&self, path: &str, body: &B) -> StoryloomResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint(path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request");
                HttpError::new(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Provider returned error");
            return Err(GenerationError::new(GenerationErrorKind::Api {
                status: status.as_u16(),
                message: body,
            })
            .into());
        }

        response.json::<R>().await.map_err(|e| {
            error!(error = ?e, "Failed to parse provider response");
            StoryloomError::from(GenerationError::new(GenerationErrorKind::Parse(format!(
                "Failed to parse response: {}",
                e
            ))))
        })
    }

    fn record<T>(&self, model: &str, started: Instant, result: &StoryloomResult<T>) {
        let metrics = GenerationMetrics::get();
        match result {
            Ok(_) => metrics.record_request(
                TextGenerator::provider_name(self),
                model,
                started.elapsed().as_secs_f64(),
            ),
            Err(e) => metrics.record_error(TextGenerator::provider_name(self), model, classify_error(e)),
        }
    }
}

#[async_trait::async_trait]
impl TextGenerator for OpenAiCompatibleClient {
    #[instrument(skip(self, req), fields(model = %req.model(), prompt_length = req.prompt().len()))]
    async fn generate_text(&self, req: &TextRequest) -> StoryloomResult<Option<String>> {
        let body = to_chat_request(req)?;
        let started = Instant::now();

        let result = self
            .post::<_, ChatResponse>(CHAT_COMPLETIONS_PATH, &body)
            .await;
        self.record(req.model(), started, &result);
        let response = result?;

        if let Some(usage) = response.usage() {
            GenerationMetrics::get().record_tokens(req.model(), *usage.total_tokens());
        }
        let text = from_chat_response(&response);
        debug!(
            response_id = %response.id(),
            has_text = text.is_some(),
            "Received chat completion"
        );
        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "openai-compatible"
    }
}

#[async_trait::async_trait]
impl ImageGenerator for OpenAiCompatibleClient {
    #[instrument(skip(self, req), fields(model = %req.model()))]
    async fn generate_image(&self, req: &ImageRequest) -> StoryloomResult<Option<String>> {
        let body = to_image_request(req)?;
        let started = Instant::now();

        let result = self
            .post::<_, ImageGenerationResponse>(IMAGE_GENERATIONS_PATH, &body)
            .await;
        self.record(req.model(), started, &result);
        let response = result?;

        let reference = from_image_response(&response);
        if reference.is_some() {
            GenerationMetrics::get().record_image(req.model());
        }
        debug!(
            images = response.data().len(),
            has_reference = reference.is_some(),
            "Received image generation"
        );
        Ok(reference)
    }

    fn provider_name(&self) -> &'static str {
        "openai-compatible"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = OpenAiCompatibleClient::new("key", "https://api.example.com/v1/");
        assert_eq!(client.base_url(), "https://api.example.com/v1");
        assert_eq!(
            client.endpoint(CHAT_COMPLETIONS_PATH),
            "https://api.example.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_from_env_requires_key() {
        let result =
            OpenAiCompatibleClient::from_env("STORYLOOM_TEST_UNSET_KEY_9F2C", "https://x.test");
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = OpenAiCompatibleClient::new("secret-key", "https://x.test");
        assert!(!format!("{:?}", client).contains("secret-key"));
    }
}
