//! # telegram-relay-bot
//!
//! Telegram front end for the completion relay: adapters from teloxide types
//! to core types, the per-message [`Dispatcher`], the first-run `.env`
//! bootstrap wizard, and the REPL runner.

pub mod adapters;
pub mod bootstrap;
pub mod bot_adapter;
pub mod config;
pub mod dispatcher;
pub mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bootstrap::{ensure_env_file, prompt_secret, ENV_FILE};
pub use bot_adapter::TelegramBotAdapter;
pub use config::PlatformConfig;
pub use dispatcher::{split_reply, Dispatcher, MAX_MESSAGE_LEN, MSG_GENERATION_FAILED};
pub use runner::run_repl;
