//! Completion relay: text in, text out. Holds the create-once provider
//! handle; precondition failures (empty prompt, missing credential) become
//! fixed fallback strings, provider failures propagate to the caller.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

use crate::client::{CompletionRequest, OpenAiProviderClient, ProviderClient};
use crate::settings::Settings;

// --- Fixed user-facing fallback messages ---
pub const MSG_NO_INPUT: &str = "I didn't receive any text.";
pub const MSG_MISSING_API_KEY: &str = "PROVIDER_API_KEY is missing. Create a .env file \
(or run the bot once to bootstrap) and add PROVIDER_API_KEY=...";
pub const MSG_NO_OUTPUT: &str = "(no output)";

/// Builds a provider client from resolved settings. Runs at most once per
/// relay; the result is shared by all subsequent requests.
pub type ProviderFactory = dyn Fn(&Settings) -> Arc<dyn ProviderClient> + Send + Sync;

/// Object-safe completion interface consumed by the dispatcher.
#[async_trait]
pub trait Completer: Send + Sync {
    /// Returns the reply text for the given prompt, or an error when the
    /// provider call fails.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Relay from prompt text to completion text. The provider handle is created
/// lazily on first use and reused for the life of the process; racing first
/// callers are serialized by the cell so the handle is created exactly once.
pub struct CompletionRelay {
    handle: OnceCell<Arc<dyn ProviderClient>>,
    factory: Box<ProviderFactory>,
}

impl CompletionRelay {
    /// Relay backed by the OpenAI provider client.
    pub fn openai() -> Self {
        Self::with_factory(Box::new(|settings: &Settings| {
            Arc::new(OpenAiProviderClient::new(settings.provider_api_key.clone()))
                as Arc<dyn ProviderClient>
        }))
    }

    /// Relay with a custom provider factory. Used by tests to substitute a
    /// recording client.
    pub fn with_factory(factory: Box<ProviderFactory>) -> Self {
        Self {
            handle: OnceCell::new(),
            factory,
        }
    }

    /// Completes against an explicitly resolved settings bundle. Public for
    /// tests; production goes through [`Completer::complete`], which resolves
    /// settings from the environment first.
    #[instrument(skip(self, settings, prompt))]
    pub async fn complete_with(&self, settings: &Settings, prompt: &str) -> Result<String> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Ok(MSG_NO_INPUT.to_string());
        }

        if !settings.has_provider_credential() {
            return Ok(MSG_MISSING_API_KEY.to_string());
        }

        let client = self
            .handle
            .get_or_init(|| async { (self.factory)(settings) })
            .await;

        let request = CompletionRequest {
            model: settings.model.clone(),
            prompt: prompt.to_string(),
            max_output_tokens: settings.max_output_tokens,
            temperature: settings.temperature,
        };
        debug!(model = %request.model, max_output_tokens = request.max_output_tokens, "completion request");

        let output = client.complete(&request).await?;

        match output {
            Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
            _ => Ok(MSG_NO_OUTPUT.to_string()),
        }
    }
}

#[async_trait]
impl Completer for CompletionRelay {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let settings = Settings::resolve();
        self.complete_with(&settings, prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Recording provider: captures requests, returns a preset outcome.
    struct RecordingClient {
        calls: Arc<Mutex<Vec<CompletionRequest>>>,
        reply: Result<Option<String>, String>,
    }

    #[async_trait]
    impl ProviderClient for RecordingClient {
        async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>> {
            self.calls.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(anyhow::anyhow!("{}", message)),
            }
        }
    }

    fn settings() -> Settings {
        Settings {
            provider_api_key: "sk-test".to_string(),
            model: "gpt-5.2".to_string(),
            max_output_tokens: 512,
            temperature: 0.7,
            platform_token: "platform-token".to_string(),
        }
    }

    fn relay_with(
        reply: Result<Option<String>, String>,
    ) -> (CompletionRelay, Arc<Mutex<Vec<CompletionRequest>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let calls_for_factory = calls.clone();
        let relay = CompletionRelay::with_factory(Box::new(move |_settings| {
            Arc::new(RecordingClient {
                calls: calls_for_factory.clone(),
                reply: reply.clone(),
            }) as Arc<dyn ProviderClient>
        }));
        (relay, calls)
    }

    /// **Test: one provider call with resolved model/tokens/temperature, trimmed output returned.**
    #[tokio::test]
    async fn complete_issues_one_call_and_trims_output() {
        let (relay, calls) = relay_with(Ok(Some("  hello there  ".to_string())));

        let reply = relay.complete_with(&settings(), "  hi  ").await.unwrap();

        assert_eq!(reply, "hello there");
        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "gpt-5.2");
        assert_eq!(calls[0].prompt, "hi");
        assert_eq!(calls[0].max_output_tokens, 512);
        assert_eq!(calls[0].temperature, 0.7);
    }

    /// **Test: empty and whitespace-only prompts return the no-input fallback without a provider call.**
    #[tokio::test]
    async fn complete_empty_prompt_short_circuits() {
        let (relay, calls) = relay_with(Ok(Some("unused".to_string())));

        assert_eq!(relay.complete_with(&settings(), "").await.unwrap(), MSG_NO_INPUT);
        assert_eq!(relay.complete_with(&settings(), "   ").await.unwrap(), MSG_NO_INPUT);
        assert!(calls.lock().unwrap().is_empty());
    }

    /// **Test: missing provider credential returns the fixed instruction without a provider call.**
    #[tokio::test]
    async fn complete_missing_credential_short_circuits() {
        let (relay, calls) = relay_with(Ok(Some("unused".to_string())));
        let mut settings = settings();
        settings.provider_api_key = String::new();

        let reply = relay.complete_with(&settings, "hi").await.unwrap();

        assert_eq!(reply, MSG_MISSING_API_KEY);
        assert!(calls.lock().unwrap().is_empty());
    }

    /// **Test: provider errors are not swallowed; the caller observes them.**
    #[tokio::test]
    async fn complete_propagates_provider_error() {
        let (relay, calls) = relay_with(Err("rate limited".to_string()));

        let result = relay.complete_with(&settings(), "hi").await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("rate limited"));
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    /// **Test: absent or blank provider output becomes the no-output fallback.**
    #[tokio::test]
    async fn complete_empty_output_falls_back() {
        let (relay, _) = relay_with(Ok(None));
        assert_eq!(relay.complete_with(&settings(), "hi").await.unwrap(), MSG_NO_OUTPUT);

        let (relay, _) = relay_with(Ok(Some("   ".to_string())));
        assert_eq!(relay.complete_with(&settings(), "hi").await.unwrap(), MSG_NO_OUTPUT);
    }

    /// **Test: the provider handle is created once and reused across requests.**
    #[tokio::test]
    async fn provider_handle_created_once() {
        let created = Arc::new(AtomicUsize::new(0));
        let created_for_factory = created.clone();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let calls_for_factory = calls.clone();

        let relay = CompletionRelay::with_factory(Box::new(move |_settings| {
            created_for_factory.fetch_add(1, Ordering::SeqCst);
            Arc::new(RecordingClient {
                calls: calls_for_factory.clone(),
                reply: Ok(Some("ok".to_string())),
            }) as Arc<dyn ProviderClient>
        }));

        for _ in 0..3 {
            relay.complete_with(&settings(), "hi").await.unwrap();
        }

        assert_eq!(created.load(Ordering::SeqCst), 1);
        assert_eq!(calls.lock().unwrap().len(), 3);
    }
}
