use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use loni::chat_log::ChatLog;
use loni::dispatch::Dispatcher;
use loni::providers::configs::{OpenRouterProviderConfig, ProviderConfig};
use loni::providers::openrouter::OpenRouterProvider;

mod prompt;
mod session;

use prompt::cliclack::CliclackPrompt;
use session::Session;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Chat-completions endpoint (can also be set via OPENROUTER_API)
    #[arg(long)]
    api_url: Option<String>,

    /// API key (can also be set via OPENROUTER_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Model to try, in order. Repeat to add fallbacks (can also be set via OPENROUTER_MODELS as a JSON array)
    #[arg(short, long = "model")]
    models: Vec<String>,

    /// Directory for the chat log
    #[arg(long, env = "LONI_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Don't record successful exchanges
    #[arg(long)]
    no_log: bool,

    /// Send a single prompt, print the reply and exit
    #[arg(short, long)]
    prompt: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Values from .env count as environment, real variables win
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = create_provider_config(&cli)?;
    let candidates = config.models.clone();
    let provider = OpenRouterProvider::new(config).context("Failed to create HTTP client")?;

    let chat_log = if cli.no_log {
        None
    } else {
        open_chat_log(cli.data_dir.clone())
    };

    let mut dispatcher = Dispatcher::new(Box::new(provider), candidates);
    if let Some(chat_log) = &chat_log {
        dispatcher = dispatcher.with_chat_log(chat_log.clone());
    }

    let mut session =
        Session::new(dispatcher, Box::new(CliclackPrompt::new())).with_chat_log(chat_log);

    match cli.prompt {
        Some(prompt) => session.headless_start(prompt).await,
        None => session.start().await,
    }
}

fn create_provider_config(cli: &Cli) -> Result<OpenRouterProviderConfig> {
    let mut config =
        OpenRouterProviderConfig::from_env().context("Failed to read configuration")?;

    if let Some(api_url) = cli.api_url.as_ref().filter(|u| !u.trim().is_empty()) {
        config.endpoint = api_url.trim().to_string();
    }
    if let Some(api_key) = cli.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
        config.api_key = Some(api_key.trim().to_string());
    }
    if !cli.models.is_empty() {
        config.models = cli.models.clone();
    }

    Ok(config)
}

/// A log that can't be opened only disables logging
fn open_chat_log(data_dir: Option<PathBuf>) -> Option<ChatLog> {
    let dir = match data_dir {
        Some(dir) => dir,
        None => match ChatLog::default_dir() {
            Ok(dir) => dir,
            Err(e) => {
                warn!(error = %e, "chat logging disabled");
                return None;
            }
        },
    };

    match ChatLog::open(&dir) {
        Ok(chat_log) => Some(chat_log),
        Err(e) => {
            warn!(error = %e, dir = %dir.display(), "chat logging disabled");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_repeated_models() {
        let cli = Cli::parse_from([
            "loni",
            "--model",
            "first/model",
            "-m",
            "second/model",
            "--no-log",
            "--prompt",
            "hi",
        ]);
        assert_eq!(cli.models, vec!["first/model", "second/model"]);
        assert!(cli.no_log);
        assert_eq!(cli.prompt.as_deref(), Some("hi"));
    }

    #[test]
    fn test_open_chat_log_in_given_dir() {
        let dir = tempfile::tempdir().unwrap();
        let chat_log = open_chat_log(Some(dir.path().join("logs"))).unwrap();
        assert_eq!(chat_log.dir(), dir.path().join("logs").as_path());
    }
}
