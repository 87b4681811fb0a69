use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    config::WeatherSettings,
    error::truncate_body,
    model::{DayOffset, ParsedRequest},
};

use super::WeatherProvider;

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider").field("base_url", &self.base_url).finish()
    }
}

/// Raw endpoint outcome before typed parsing.
enum Fetched {
    NotFound,
    Body(String),
}

impl OpenWeatherProvider {
    pub fn from_settings(api_key: String, settings: &WeatherSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build OpenWeather HTTP client")?;

        Ok(Self {
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Report for `request`, treating `today` as the current UTC date.
    pub async fn report_on(&self, request: &ParsedRequest, today: NaiveDate) -> String {
        match self.try_report(request, today).await {
            Ok(report) => report,
            Err(e) => {
                warn!(city = %request.city, error = %format!("{e:#}"), "weather lookup failed");
                format!("Error fetching weather: {e:#}")
            }
        }
    }

    async fn try_report(&self, request: &ParsedRequest, today: NaiveDate) -> Result<String> {
        let city = request.city.as_str();

        match request.day {
            DayOffset::Today => self.current_report(city).await,
            day => self.forecast_report(city, day, today).await,
        }
    }

    async fn current_report(&self, city: &str) -> Result<String> {
        let body = match self.fetch("weather", city).await? {
            Fetched::NotFound => return Ok(not_found(city)),
            Fetched::Body(body) => body,
        };

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather current JSON")?;

        let description = first_description(&parsed.weather)?;

        Ok(format!("Current weather in {city}: {}°C, {description}.", parsed.main.temp))
    }

    async fn forecast_report(
        &self,
        city: &str,
        day: DayOffset,
        today: NaiveDate,
    ) -> Result<String> {
        let body = match self.fetch("forecast", city).await? {
            Fetched::NotFound => return Ok(not_found(city)),
            Fetched::Body(body) => body,
        };

        let parsed: OwForecastResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather forecast JSON")?;

        let target = today
            .checked_add_days(Days::new(u64::from(day.as_days())))
            .ok_or_else(|| anyhow!("Target date out of range for {today} + {day}"))?;

        let entry = match pick_representative(&parsed.list, target)? {
            Some(entry) => entry,
            None => return Ok(format!("No forecast available for {city}.")),
        };

        let description = first_description(&entry.weather)?;

        Ok(format!("Weather in {city} {}: {}°C, {description}.", day.label(), entry.main.temp))
    }

    async fn fetch(&self, endpoint: &str, city: &str) -> Result<Fetched> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, city, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({endpoint})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {endpoint} response body"))?;

        // Only the provider's own `cod` marks a missing city; a bare 404 is an error.
        if reports_not_found(&body) {
            return Ok(Fetched::NotFound);
        }

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather {endpoint} request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        Ok(Fetched::Body(body))
    }
}

fn not_found(city: &str) -> String {
    format!("City '{city}' not found.")
}

/// OpenWeather sends `cod` as either a string or a number.
fn reports_not_found(body: &str) -> bool {
    let Ok(status) = serde_json::from_str::<OwStatus>(body) else {
        return false;
    };

    match status.cod {
        Some(serde_json::Value::String(s)) => s == "404",
        Some(serde_json::Value::Number(n)) => n.as_u64() == Some(404),
        _ => false,
    }
}

/// Middle sample (by index) among the entries falling on `target` in UTC.
fn pick_representative(
    entries: &[OwForecastEntry],
    target: NaiveDate,
) -> Result<Option<&OwForecastEntry>> {
    let mut matches = Vec::new();

    for entry in entries {
        let ts = unix_to_utc(entry.dt).ok_or_else(|| {
            anyhow!("OpenWeather forecast entry has invalid timestamp {}", entry.dt)
        })?;
        if ts.date_naive() == target {
            matches.push(entry);
        }
    }

    Ok(matches.get(matches.len() / 2).copied())
}

fn first_description(weather: &[OwWeather]) -> Result<&str> {
    weather
        .first()
        .map(|w| w.description.as_str())
        .ok_or_else(|| anyhow!("OpenWeather response contained no weather description"))
}

#[derive(Debug, Deserialize)]
struct OwStatus {
    #[serde(default)]
    cod: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn report(&self, request: &ParsedRequest) -> String {
        self.report_on(request, Utc::now().date_naive()).await
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}
