use std::{fs::OpenOptions, path::Path, sync::{Arc, Mutex}};

use aicode::{
    cli::{Cli, Command},
    config::Config,
    handlers,
    language::Language,
    llm::{GenerationOptions, LlmClient, TextGenerator},
    tui::DisplayOptions,
};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

fn env_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { "aicode=debug,warn" } else { "warn" };
    EnvFilter::try_from_env("AICODE_LOG").unwrap_or_else(|_| EnvFilter::new(level))
}

/// One-shot commands log to stderr. The panel owns the terminal, so it logs
/// only when LOG_FILE is set.
fn init_tracing(verbose: bool, panel: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = env_filter(verbose);
    match (panel, log_file) {
        (true, Some(path)) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        (true, None) => {}
        (false, _) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let cfg = Config::load();

    let command = args.command.clone().unwrap_or(Command::Edit);
    let panel = matches!(command, Command::Edit);
    init_tracing(args.verbose, panel, cfg.get_path("LOG_FILE").as_deref())?;

    if matches!(command, Command::Languages) {
        for lang in Language::ALL {
            println!("{:<12} {}", lang.id().cyan(), lang.display_name());
        }
        return Ok(());
    }

    // Resolve model: CLI overrides config; fall back to gemini-pro
    let model = args
        .model
        .clone()
        .or_else(|| cfg.get("DEFAULT_MODEL"))
        .unwrap_or_else(|| "gemini-pro".to_string());
    let language = args.language.unwrap_or_else(|| cfg.default_language());

    if cfg.api_key().is_none() {
        tracing::warn!(config = %cfg.config_path.display(), "GEMINI_API_KEY is not set; requests will fail");
    }

    let opts = GenerationOptions { model: model.clone(), temperature: args.temperature, top_p: args.top_p };
    let client: Arc<dyn TextGenerator> = Arc::new(LlmClient::from_config(&cfg, opts)?);

    match command {
        Command::Edit => handlers::edit::run(client, language, &model, DisplayOptions::from_config(&cfg)).await,
        Command::Generate { prompt, md } => {
            handlers::generate::run(client.as_ref(), &prompt.join(" "), language, md).await
        }
        Command::Run { file, input } => {
            handlers::run::run(client.as_ref(), file.as_deref(), language, input.as_deref()).await
        }
        Command::Languages => Ok(()),
    }
}
