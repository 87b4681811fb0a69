//! Groq through its OpenAI-compatible `chat/completions` endpoint.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::{
    config::LlmSettings,
    error::{ChatError, truncate_body},
};

use super::ChatClient;

#[derive(Clone)]
pub struct GroqChatClient {
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    http: Client,
}

impl std::fmt::Debug for GroqChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqChatClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: serde_json::Value,
}

impl GroqChatClient {
    pub fn from_settings(api_key: String, settings: &LlmSettings) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build Groq HTTP client")?;

        Ok(Self {
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            http,
        })
    }
}

#[async_trait]
impl ChatClient for GroqChatClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, ChatError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(%url, model = %self.model, "requesting chat completion");

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream: false,
        };

        let res = self.http.post(&url).bearer_auth(&self.api_key).json(&body).send().await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            let body = truncate_body(&text);
            return Err(ChatError::Status { status: status.as_u16(), body });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)?;
        let message = parsed.choices.into_iter().next().ok_or(ChatError::EmptyResponse)?.message;

        Ok(message_text(message))
    }
}

/// The `content` string if present, otherwise the whole message rendered as JSON.
fn message_text(message: serde_json::Value) -> String {
    match message.get("content").and_then(serde_json::Value::as_str) {
        Some(content) => content.to_string(),
        None => message.to_string(),
    }
}
