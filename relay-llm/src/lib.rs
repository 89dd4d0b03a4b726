//! # relay-llm
//!
//! Completion relay: resolves [`Settings`] from the environment, holds a
//! create-once provider handle, and turns a text prompt into a text reply.
//! Transport-agnostic; the dispatcher consumes it through the [`Completer`]
//! trait.

pub mod client;
pub mod relay;
pub mod settings;

pub use client::{CompletionRequest, OpenAiProviderClient, ProviderClient};
pub use relay::{Completer, CompletionRelay, MSG_MISSING_API_KEY, MSG_NO_INPUT, MSG_NO_OUTPUT};
pub use settings::{Settings, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
