//! Chat client for Groq's OpenAI-compatible API

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CompletionUsage, CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse,
    },
    Client,
};
use serde::Serialize;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::{ApiKey, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::error::{ProviderError, Result};

/// Configuration for a chat client
#[derive(Debug, Clone)]
pub struct ChatGroqConfig {
    pub base_url: String,
    pub api_key: ApiKey,
    pub model_name: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub system_prompt: Option<String>,
}

impl ChatGroqConfig {
    /// Create a config bound to `model_name`
    pub fn new(model_name: impl Into<String>, api_key: ApiKey) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model_name: model_name.into(),
            temperature: None,
            max_tokens: None,
            system_prompt: None,
        }
    }

    /// Create a config for the default model
    pub fn with_default_model(api_key: ApiKey) -> Self {
        Self::new(DEFAULT_MODEL, api_key)
    }

    /// Set the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the completion token limit
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set a system prompt sent ahead of every user prompt
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }
}

/// Token accounting reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl From<CompletionUsage> for TokenUsage {
    fn from(usage: CompletionUsage) -> Self {
        Self {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

/// Response from the model
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub content: String,
    /// Model identifier echoed back by the service
    pub model: String,
    pub finish_reason: Option<String>,
    pub usage: Option<TokenUsage>,
    /// Wall-clock request time (milliseconds)
    pub elapsed_ms: u64,
}

impl ChatResponse {
    fn from_completion(response: CreateChatCompletionResponse, elapsed_ms: u64) -> Result<Self> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResponse)?;

        let finish_reason = choice
            .finish_reason
            .and_then(|reason| serde_json::to_value(reason).ok())
            .and_then(|value| value.as_str().map(str::to_string));

        Ok(Self {
            content: choice.message.content.unwrap_or_default(),
            model: response.model,
            finish_reason,
            usage: response.usage.map(TokenUsage::from),
            elapsed_ms,
        })
    }
}

/// Client bound to a single hosted chat model
///
/// Construction performs no network I/O. Requests go out only from
/// [`invoke`](ChatGroq::invoke) and [`test_connection`](ChatGroq::test_connection).
pub struct ChatGroq {
    config: ChatGroqConfig,
    client: Client<OpenAIConfig>,
}

impl ChatGroq {
    /// Create a new ChatGroq client
    pub fn new(config: ChatGroqConfig) -> Result<Self> {
        if config.model_name.is_empty() {
            return Err(ProviderError::ModelNotDefined);
        }

        let openai_config = OpenAIConfig::new()
            .with_api_base(&config.base_url)
            .with_api_key(config.api_key.expose());

        let client = Client::with_config(openai_config);

        debug!(
            target: "llm",
            model = %config.model_name,
            base_url = %config.base_url,
            "Created chat client"
        );

        Ok(Self { config, client })
    }

    /// Model this client is bound to
    pub fn model_name(&self) -> &str {
        &self.config.model_name
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn config(&self) -> &ChatGroqConfig {
        &self.config
    }

    /// Send a prompt and wait for the completion
    pub async fn invoke(&self, prompt: &str) -> Result<ChatResponse> {
        let messages = self.build_messages(prompt)?;

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.config.model_name).messages(messages);
        if let Some(temperature) = self.config.temperature {
            args.temperature(temperature);
        }
        if let Some(max_tokens) = self.config.max_tokens {
            args.max_tokens(max_tokens);
        }
        let request = args.build()?;

        let start = Instant::now();
        info!(
            target: "llm",
            model = %self.config.model_name,
            prompt_chars = prompt.len(),
            "Starting LLM call"
        );

        let response = self.client.chat().create(request).await?;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        let response = ChatResponse::from_completion(response, elapsed_ms)?;

        info!(
            target: "llm",
            model = %response.model,
            elapsed_ms = elapsed_ms,
            input_tokens = response.usage.map(|u| u.prompt_tokens),
            output_tokens = response.usage.map(|u| u.completion_tokens),
            "LLM call completed"
        );

        Ok(response)
    }

    /// Test connection to the model API by sending a minimal request
    pub async fn test_connection(&self) -> Result<()> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.config.model_name)
            .max_tokens(5_u32)
            .temperature(0.0_f32)
            .messages(vec![ChatCompletionRequestUserMessageArgs::default()
                .content("Hi")
                .build()?
                .into()])
            .build()?;

        let response = self.client.chat().create(request).await?;

        if response.choices.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(())
    }

    fn build_messages(&self, prompt: &str) -> Result<Vec<ChatCompletionRequestMessage>> {
        let mut messages = Vec::with_capacity(2);

        if let Some(system) = &self.config.system_prompt {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system.as_str())
                    .build()?
                    .into(),
            );
        }

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into(),
        );

        Ok(messages)
    }
}

impl fmt::Debug for ChatGroq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatGroq")
            .field("model_name", &self.config.model_name)
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}
