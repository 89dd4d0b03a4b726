//! telegram-relay-bot entry point: first-run bootstrap, env loading, config,
//! tracing, and the relay-backed REPL.

use anyhow::Result;
use clap::{Parser, Subcommand};
use relay_core::init_tracing;
use relay_llm::{Completer, CompletionRelay};
use std::path::Path;
use std::sync::Arc;
use telegram_relay_bot::{
    ensure_env_file, prompt_secret, run_repl, Dispatcher, PlatformConfig, TelegramBotAdapter,
    ENV_FILE,
};

#[derive(Parser)]
#[command(name = "telegram-relay-bot")]
#[command(about = "Telegram to completion-provider relay bot", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the relay bot (config from env; token can override PLATFORM_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    ensure_env_file(Path::new(ENV_FILE), &prompt_secret)?;
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => run(token).await,
    }
}

async fn run(token: Option<String>) -> Result<()> {
    let config = PlatformConfig::load(token)?;
    init_tracing(config.log_file.as_deref())?;

    let bot = teloxide::Bot::new(config.platform_token.clone());
    let relay: Arc<dyn Completer> = Arc::new(CompletionRelay::openai());
    let adapter: Arc<dyn relay_core::Bot> = Arc::new(TelegramBotAdapter::new(bot.clone()));
    let dispatcher = Arc::new(Dispatcher::new(adapter, relay));

    run_repl(bot, dispatcher).await
}
