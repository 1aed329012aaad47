//! Azure OpenAI chat-completion client.
//!
//! The handler only sees the [`ChatCompletions`] trait, so tests can swap in a fake
//! without a network.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Credentials;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Invalid Azure OpenAI endpoint: {0}")]
    InvalidEndpoint(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("Chat completion response contained no choices")]
    NoChoices,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: Option<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: Some(content.into()),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(content.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
}

impl ChatCompletionResponse {
    /// Content of the first choice, passed through as the service returned it.
    pub fn first_content(self) -> Result<Option<String>, UpstreamError> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(UpstreamError::NoChoices)
    }
}

#[async_trait]
pub trait ChatCompletions: Send + Sync {
    async fn get_chat_completions(
        &self,
        credentials: &Credentials,
        deployment: &str,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, UpstreamError>;
}

#[derive(Deserialize)]
struct ServiceErrorBody {
    error: ServiceError,
}

#[derive(Deserialize)]
struct ServiceError {
    message: String,
}

#[derive(Debug, Clone, Default)]
pub struct AzureOpenAiClient {
    http: reqwest::Client,
}

impl AzureOpenAiClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatCompletions for AzureOpenAiClient {
    async fn get_chat_completions(
        &self,
        credentials: &Credentials,
        deployment: &str,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, UpstreamError> {
        let url = completions_url(credentials, deployment)?;
        debug!(%url, "Calling Azure OpenAI chat completions");

        let response = self
            .http
            .post(url)
            .header("api-key", &credentials.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Api {
                status,
                message: service_error_message(status, &body),
            });
        }

        Ok(response.json::<ChatCompletionResponse>().await?)
    }
}

pub fn completions_url(credentials: &Credentials, deployment: &str) -> Result<Url, UpstreamError> {
    let mut url = Url::parse(&credentials.endpoint)
        .map_err(|e| UpstreamError::InvalidEndpoint(e.to_string()))?;

    url.path_segments_mut()
        .map_err(|()| UpstreamError::InvalidEndpoint(credentials.endpoint.clone()))?
        .pop_if_empty()
        .extend(["openai", "deployments", deployment, "chat", "completions"]);
    url.query_pairs_mut()
        .append_pair("api-version", &credentials.api_version);

    Ok(url)
}

fn service_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ServiceErrorBody>(body)
        .map(|body| body.error.message)
        .unwrap_or_else(|_| format!("Azure OpenAI request failed with status {status}"))
}
