//! Single keyword decision between the weather lookup and general chat.

use std::sync::Arc;
use tracing::debug;

use crate::{
    error::ChatError,
    extract::{Extraction, extract},
    llm::ChatClient,
    provider::WeatherProvider,
};

pub const PROMPT_FOR_INPUT: &str = "Please enter a question, e.g. 'weather in Mumbai tomorrow'.";

pub const CITY_GUIDANCE: &str = "Please specify a city name, e.g. 'Weather in Mumbai tomorrow'.";

pub const SYSTEM_INSTRUCTION: &str = "You are a friendly assistant. \
    If user asks about weather, ask them to phrase as 'weather in <city> <day>'.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Empty,
    Weather,
    Chat,
}

/// Classify an already-trimmed or raw query.
pub fn classify(query: &str) -> Route {
    let query = query.trim();

    if query.is_empty() {
        Route::Empty
    } else if query.to_lowercase().contains("weather") {
        Route::Weather
    } else {
        Route::Chat
    }
}

#[derive(Debug, Clone)]
pub struct QueryRouter {
    weather: Arc<dyn WeatherProvider>,
    chat: Arc<dyn ChatClient>,
}

impl QueryRouter {
    pub fn new(weather: Arc<dyn WeatherProvider>, chat: Arc<dyn ChatClient>) -> Self {
        Self { weather, chat }
    }

    /// Answer one query. Only the chat branch can fail.
    pub async fn answer(&self, query: &str) -> Result<String, ChatError> {
        let query = query.trim();
        let route = classify(query);
        debug!(?route, "routing query");

        match route {
            Route::Empty => Ok(PROMPT_FOR_INPUT.to_string()),
            Route::Weather => Ok(self.answer_weather(query).await),
            Route::Chat => self.chat.complete(SYSTEM_INSTRUCTION, query).await,
        }
    }

    async fn answer_weather(&self, query: &str) -> String {
        match extract(query) {
            Extraction::Parsed(request) => {
                debug!(city = %request.city, day = %request.day, "extracted weather request");
                self.weather.report(&request).await
            }
            Extraction::Unrecognized => CITY_GUIDANCE.to_string(),
        }
    }
}
