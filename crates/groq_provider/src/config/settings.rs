//! Provider settings sourced from the environment

use std::env;

use super::credentials::{ApiKey, API_KEY_ENV};
use crate::error::Result;

/// Model used when none is given
pub const DEFAULT_MODEL: &str = "llama3-70b";

/// Groq's OpenAI-compatible endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Optional override for the model name
pub const MODEL_ENV: &str = "GROQ_MODEL";

/// Optional override for the API base URL
pub const BASE_URL_ENV: &str = "GROQ_BASE_URL";

/// Everything needed to build an [`LlmModel`](crate::LlmModel)
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// `None` or empty is rejected at construction
    pub model_name: Option<String>,
    pub api_key: ApiKey,
    pub base_url: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub system_prompt: Option<String>,
}

impl ProviderConfig {
    /// Create a config for the default model
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            model_name: Some(DEFAULT_MODEL.to_string()),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: None,
            max_tokens: None,
            system_prompt: None,
        }
    }

    /// Build from `GROQ_API_KEY`, `GROQ_MODEL` and `GROQ_BASE_URL`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = ApiKey::parse(lookup(API_KEY_ENV).unwrap_or_default(), API_KEY_ENV)?;
        let mut config = Self::new(api_key);

        if let Some(model) = lookup(MODEL_ENV).filter(|m| !m.is_empty()) {
            config.model_name = Some(model);
        }
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            config.base_url = base_url;
        }

        Ok(config)
    }

    /// Set the model name; `None` leaves the config unusable
    pub fn with_model(mut self, model_name: Option<&str>) -> Self {
        self.model_name = model_name.map(str::to_string);
        self
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

    /// Cap the completion length
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Prepend a system message to every prompt
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }
}
