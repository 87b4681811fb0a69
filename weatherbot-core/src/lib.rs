//! Core library for the `weatherbot` service.
//!
//! This crate defines:
//! - Configuration (secrets from the environment, optional settings file)
//! - Extraction of city and day from free-text questions
//! - The OpenWeather client and the Groq chat-completion client
//! - The query router and the axum HTTP application
//!
//! It is used by `weatherbot-cli`, but can also be embedded in other binaries or services.

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod llm;
pub mod model;
pub mod provider;
pub mod router;

pub use config::{Config, Secrets, Settings};
pub use error::{ChatError, ConfigError};
pub use extract::{Extraction, extract};
pub use llm::{ChatClient, GroqChatClient, chat_client_from_config};
pub use model::{AskRequest, AskResponse, DayOffset, ParsedRequest};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use router::{QueryRouter, Route};

/// Wire the router with the real upstream clients.
pub fn router_from_config(config: &Config) -> anyhow::Result<QueryRouter> {
    let weather = provider_from_config(config)?;
    let chat = chat_client_from_config(config)?;
    Ok(QueryRouter::new(weather, chat))
}
