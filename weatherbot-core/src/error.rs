use thiserror::Error;

/// Problems found while assembling the runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set.\nHint: export {0}=<your key> before starting weatherbot.")]
    MissingSecret(&'static str),

    #[error("Invalid setting `{field}`: {message}")]
    InvalidSetting { field: &'static str, message: String },

    #[error("Could not determine platform config directory")]
    NoConfigDir,

    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Failures talking to the chat-completion service.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Chat completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Chat completion request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse chat completion JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Chat completion response contained no choices")]
    EmptyResponse,
}

/// Upstream bodies quoted in errors are capped at 200 characters.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
