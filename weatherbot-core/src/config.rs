use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
};

use crate::error::ConfigError;

pub const OPENWEATHER_API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Overrides the settings file location.
pub const SETTINGS_PATH_ENV: &str = "WEATHERBOT_CONFIG";

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_LLM_MODEL: &str = "llama-3.1-8b-instant";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: DEFAULT_BIND.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self { base_url: DEFAULT_WEATHER_BASE_URL.to_string(), timeout_secs: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LLM_BASE_URL.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            temperature: 0.1,
            max_tokens: 256,
            timeout_secs: 30,
        }
    }
}

/// Non-secret settings, optionally stored on disk.
///
/// Example TOML:
/// ```toml
/// [server]
/// bind = "127.0.0.1:8000"
///
/// [llm]
/// model = "llama-3.1-8b-instant"
/// max_tokens = 256
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub weather: WeatherSettings,
    pub llm: LlmSettings,
}

impl Settings {
    /// Load settings from the configured path, or defaults if no file exists yet.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::settings_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.display().to_string(), source })?;

        toml::from_str(&contents)
            .map_err(|source| ConfigError::Parse { path: path.display().to_string(), source })
    }

    /// Save settings, creating parent directories as needed.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = Self::settings_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize settings to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;

        Ok(())
    }

    /// `$WEATHERBOT_CONFIG`, else `config.toml` in the platform config directory.
    pub fn settings_file_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = std::env::var_os(SETTINGS_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("dev", "weatherbot", "weatherbot")
            .ok_or(ConfigError::NoConfigDir)?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server.bind.parse().map_err(|e| ConfigError::InvalidSetting {
            field: "server.bind",
            message: format!("'{}' is not a socket address ({e})", self.server.bind),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;

        if self.weather.timeout_secs == 0 {
            return Err(invalid("weather.timeout_secs", "must be greater than zero"));
        }
        if self.llm.timeout_secs == 0 {
            return Err(invalid("llm.timeout_secs", "must be greater than zero"));
        }
        if self.llm.max_tokens == 0 {
            return Err(invalid("llm.max_tokens", "must be greater than zero"));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(invalid("llm.temperature", "must be between 0.0 and 2.0"));
        }
        if self.llm.model.trim().is_empty() {
            return Err(invalid("llm.model", "must not be empty"));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, message: &str) -> ConfigError {
    ConfigError::InvalidSetting { field, message: message.to_string() }
}

/// API keys for the two upstream services.
#[derive(Clone)]
pub struct Secrets {
    pub openweather_api_key: String,
    pub groq_api_key: String,
}

impl Secrets {
    /// Both keys are required; blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingSecret(name))
        };

        Ok(Self {
            groq_api_key: require(GROQ_API_KEY_ENV)?,
            openweather_api_key: require(OPENWEATHER_API_KEY_ENV)?,
        })
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("openweather_api_key", &"<redacted>")
            .field("groq_api_key", &"<redacted>")
            .finish()
    }
}

/// Everything the service needs at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub secrets: Secrets,
}

impl Config {
    pub fn new(settings: Settings, secrets: Secrets) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self { settings, secrets })
    }
}
