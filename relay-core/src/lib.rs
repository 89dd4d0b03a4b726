//! # relay-core
//!
//! Core types and traits for the relay bot: [`Bot`], message and user types,
//! errors, and tracing initialization. Transport-agnostic; used by
//! telegram-relay-bot and relay-llm consumers.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{RelayError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Message, ToCoreMessage, ToCoreUser, User};
