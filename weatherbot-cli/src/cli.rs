use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use std::{collections::HashMap, path::Path};
use tokio::net::TcpListener;
use tracing::info;
use weatherbot_core::{Config, ConfigError, Secrets, Settings, api, router_from_config};

/// Read from the working directory at startup.
const ENV_FILE: &str = ".env";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherbot", version, about = "Weather question answering service")]
pub struct Cli {
    /// Debug-level logging (ignored when RUST_LOG is set).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `serve`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP service.
    Serve {
        /// Listen address, overrides `server.bind` from the settings file.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Answer a single question and print the reply.
    Ask {
        /// Free-text question, e.g. "weather in Mumbai tomorrow".
        query: String,
    },

    /// Interactively write the settings file (API keys stay in the environment).
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Serve { bind: None }) {
            Command::Serve { bind } => serve(bind).await,
            Command::Ask { query } => ask(&query).await,
            Command::Configure => configure(),
        }
    }
}

fn load_config(bind: Option<String>) -> anyhow::Result<Config> {
    let env_file = read_env_file(Path::new(ENV_FILE))?;
    let secrets = secrets_from(|name| std::env::var(name).ok(), &env_file)?;
    let mut settings = Settings::load()?;

    if let Some(bind) = bind {
        settings.server.bind = bind;
    }

    Ok(Config::new(settings, secrets)?)
}

/// Variables from a dotenv file; a missing file yields none.
fn read_env_file(path: &Path) -> anyhow::Result<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    dotenvy::from_path_iter(path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .map(|item| item.with_context(|| format!("Failed to parse {}", path.display())))
        .collect()
}

/// Process environment first, then the dotenv file.
fn secrets_from<F>(env: F, env_file: &HashMap<String, String>) -> Result<Secrets, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    Secrets::from_lookup(|name| env(name).or_else(|| env_file.get(name).cloned()))
}

async fn serve(bind: Option<String>) -> anyhow::Result<()> {
    let config = load_config(bind)?;
    let addr = config.settings.bind_addr()?;
    let router = router_from_config(&config)?;

    info!(model = %config.settings.llm.model, "starting weatherbot");

    let listener =
        TcpListener::bind(addr).await.with_context(|| format!("Failed to bind {addr}"))?;

    api::serve(listener, router, shutdown_signal()).await.context("HTTP server failed")?;

    info!("weatherbot stopped");
    Ok(())
}

async fn ask(query: &str) -> anyhow::Result<()> {
    let config = load_config(None)?;
    let router = router_from_config(&config)?;

    let answer = router.answer(query).await?;
    println!("{answer}");

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut settings = Settings::load()?;

    settings.server.bind = Text::new("Listen address:")
        .with_default(&settings.server.bind)
        .prompt()?;
    settings.llm.model = Text::new("Chat model:").with_default(&settings.llm.model).prompt()?;
    settings.llm.temperature = CustomType::<f32>::new("Temperature:")
        .with_default(settings.llm.temperature)
        .prompt()?;
    settings.llm.max_tokens = CustomType::<u32>::new("Max reply tokens:")
        .with_default(settings.llm.max_tokens)
        .prompt()?;

    settings.validate()?;
    let path = settings.save()?;

    println!("Settings saved to {}", path.display());
    println!("Set OPENWEATHER_API_KEY and GROQ_API_KEY in the environment or in {ENV_FILE}.");

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed.
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
