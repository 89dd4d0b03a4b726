//! Provider client abstraction: [`ProviderClient`] trait plus the OpenAI
//! implementation over async-openai chat completions.

use anyhow::Result;
use async_openai::{types::CreateChatCompletionRequestArgs, Client};
use async_trait::async_trait;
use std::sync::Arc;

use async_openai::types::ChatCompletionRequestUserMessageArgs;

/// One completion request: resolved model, trimmed prompt, output limit and
/// sampling temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

/// Provider interface: issue one completion request, return the output text.
/// `None` means the provider produced no textual output.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>>;
}

/// OpenAI-backed [`ProviderClient`].
#[derive(Clone)]
pub struct OpenAiProviderClient {
    client: Arc<Client<async_openai::config::OpenAIConfig>>,
}

impl OpenAiProviderClient {
    pub fn new(api_key: String) -> Self {
        let config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Arc::new(Client::with_config(config)),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let config = async_openai::config::OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
        }
    }
}

#[async_trait]
impl ProviderClient for OpenAiProviderClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>> {
        let user_message = ChatCompletionRequestUserMessageArgs::default()
            .content(request.prompt.clone())
            .build()?;

        let api_request = CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .messages(vec![user_message.into()])
            .max_tokens(request.max_output_tokens)
            .temperature(request.temperature)
            .build()?;

        let response = self.client.chat().create(api_request).await?;

        match response.choices.first() {
            Some(choice) => Ok(choice.message.content.clone()),
            None => Ok(None),
        }
    }
}
