use std::sync::Arc;

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Settings;
use crate::openai::{ChatCompletionRequest, ChatCompletions, ChatMessage};

pub const SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant that analyzes text for sentiment, topics, and summaries.";

const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f64 = 0.7;
const TOP_P: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub analysis: Option<String>,
    pub metadata: AnalysisMetadata,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    pub model: String,
    pub text_length: usize,
    pub timestamp: String,
}

pub fn build_prompt(text: &str) -> String {
    format!(
        concat!(
            "Analyze the following text and provide:\n",
            "1. Sentiment (positive/negative/neutral)\n",
            "2. Key topics (3-5 main topics)\n",
            "3. Brief summary (2-3 sentences)\n",
            "\n",
            "Text: \"{text}\"\n",
            "\n",
            "Respond in a clear, structured format.",
        ),
        text = text
    )
}

pub fn build_request(text: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(build_prompt(text)),
        ],
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
        top_p: TOP_P,
    }
}

/// Length as a JavaScript `String.length` would report it (UTF-16 code units).
pub fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}

pub struct Analyzer {
    settings: Settings,
    client: Arc<dyn ChatCompletions>,
}

impl Analyzer {
    pub fn new(settings: Settings, client: Arc<dyn ChatCompletions>) -> Self {
        Self { settings, client }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs one analysis: credentials are checked before the single upstream call.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResponse> {
        let credentials = self.settings.credentials()?;
        let deployment = &self.settings.deployment;

        info!(deployment = %deployment, text_length = text_length(text), "Requesting chat completion");
        let response = self
            .client
            .get_chat_completions(&credentials, deployment, &build_request(text))
            .await?;
        let analysis = response.first_content()?;

        Ok(AnalysisResponse {
            success: true,
            analysis,
            metadata: AnalysisMetadata {
                model: deployment.clone(),
                text_length: text_length(text),
                timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            },
        })
    }
}
