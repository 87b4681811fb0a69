//! Chat-completion client used for everything that is not a weather question.

use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

use crate::{config::Config, error::ChatError};

pub mod groq;

pub use groq::GroqChatClient;

/// Sends one system instruction plus one user message and returns the reply text.
#[async_trait]
pub trait ChatClient: Send + Sync + Debug {
    async fn complete(&self, system: &str, user: &str) -> Result<String, ChatError>;
}

pub fn chat_client_from_config(config: &Config) -> anyhow::Result<Arc<dyn ChatClient>> {
    let client =
        GroqChatClient::from_settings(config.secrets.groq_api_key.clone(), &config.settings.llm)?;
    Ok(Arc::new(client))
}
