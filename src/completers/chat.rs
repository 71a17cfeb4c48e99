//! Completer for OpenAI-compatible chat-completions APIs.
//!
//! Supports both plain OpenAI-style endpoints (`{base}/chat/completions` with
//! bearer auth) and Azure OpenAI deployments
//! (`{base}/openai/deployments/{model}/chat/completions?api-version=...` with
//! an `api-key` header). The Azure layout is used whenever an API version is
//! configured.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::base::Completer;
use crate::types::config::CompleterConfig;
use crate::types::errors::{CompletionError, CompletionResult};
use crate::types::question::Turn;
use crate::{AgoraError, AgoraResult};

const API_BASE_ENV: &str = "OPEN_AI_API_BASE";
const API_VERSION_ENV: &str = "OPEN_AI_API_VERSION";

#[derive(Serialize)]
struct ChatRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: &'a [Turn],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Chat-completions completer.
pub struct ChatCompleter {
    name: String,
    api_base: String,
    api_version: Option<String>,
    api_key: Option<String>,
    model: String,
    temperature: Option<f32>,
    http_client: Client,
}

impl ChatCompleter {
    /// Creates a completer for an OpenAI-style endpoint.
    pub fn new(api_base: impl Into<String>, model: impl Into<String>) -> AgoraResult<Self> {
        Self::build(api_base.into(), model.into(), Duration::from_secs(120))
    }

    fn build(api_base: String, model: String, timeout: Duration) -> AgoraResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AgoraError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            name: model.clone(),
            api_base: api_base.trim_end_matches('/').to_string(),
            api_version: None,
            api_key: None,
            model,
            temperature: None,
            http_client,
        })
    }

    /// Creates a completer from configuration, filling unset values from the
    /// environment.
    pub fn from_config(config: &CompleterConfig) -> AgoraResult<Self> {
        let api_base = config
            .api_base
            .clone()
            .or_else(|| std::env::var(API_BASE_ENV).ok())
            .ok_or_else(|| {
                AgoraError::config(format!(
                    "No API base configured; set completer.api_base or {}",
                    API_BASE_ENV
                ))
            })?;

        let api_version = config
            .api_version
            .clone()
            .or_else(|| std::env::var(API_VERSION_ENV).ok());

        let api_key = std::env::var(&config.api_key_env).ok();
        if api_key.is_none() {
            tracing::warn!(
                "{} is not set, sending requests without credentials",
                config.api_key_env
            );
        }

        let mut completer = Self::build(api_base, config.model.clone(), config.timeout())?;
        completer.api_version = api_version;
        completer.api_key = api_key;
        completer.temperature = config.temperature;
        Ok(completer)
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Switches to Azure deployment URLs with the given API version.
    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Returns true when Azure deployment URLs are used.
    pub fn is_azure(&self) -> bool {
        self.api_version.is_some()
    }

    /// Full URL of the chat-completions endpoint.
    pub fn endpoint(&self) -> String {
        match &self.api_version {
            Some(version) => format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                self.api_base, self.model, version
            ),
            None => format!("{}/chat/completions", self.api_base),
        }
    }
}

#[async_trait]
impl Completer for ChatCompleter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, conversation: &[Turn]) -> CompletionResult<String> {
        let request = ChatRequest {
            // Azure selects the model through the deployment in the URL.
            model: if self.is_azure() {
                None
            } else {
                Some(self.model.as_str())
            },
            messages: conversation,
            temperature: self.temperature,
        };

        let mut http_request = self
            .http_client
            .post(self.endpoint())
            .header("Content-Type", "application/json");

        if let Some(api_key) = &self.api_key {
            http_request = if self.is_azure() {
                http_request.header("api-key", api_key)
            } else {
                http_request.header("Authorization", format!("Bearer {}", api_key))
            };
        }

        let http_response = http_request.json(&request).send().await.map_err(|e| {
            if e.is_timeout() {
                CompletionError::Timeout(self.name.clone())
            } else {
                CompletionError::RequestFailed(self.name.clone(), e.to_string())
            }
        })?;

        let status = http_response.status();

        if !status.is_success() {
            let error_text = http_response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());

            let message = serde_json::from_str::<ApiErrorResponse>(&error_text)
                .map(|r| r.error.message)
                .unwrap_or(error_text);

            if status.as_u16() == 429 {
                return Err(CompletionError::RateLimited(self.name.clone(), message));
            }

            return Err(CompletionError::Api {
                completer: self.name.clone(),
                code: status.as_u16(),
                message,
            });
        }

        let response: ChatResponse = http_response
            .json()
            .await
            .map_err(|e| CompletionError::Malformed(self.name.clone(), e.to_string()))?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            CompletionError::Malformed(self.name.clone(), "response has no choices".to_string())
        })?;

        Ok(choice.message.content.unwrap_or_default())
    }
}
