//! Model provider owning a shared chat client handle

use std::env;
use std::sync::Arc;
use tracing::debug;

use crate::config::{ApiKey, ProviderConfig, DEFAULT_MODEL};
use crate::error::{ProviderError, Result};
use crate::model::{ChatGroq, ChatGroqConfig};

/// Holds a chat client bound to one hosted model
///
/// The credential is handed to the client directly; nothing is written to
/// the process environment.
#[derive(Debug, Clone)]
pub struct LlmModel {
    model_name: String,
    model: Arc<ChatGroq>,
}

impl LlmModel {
    /// Create a provider for the default model (`llama3-70b`)
    pub fn new(api_key: ApiKey) -> Result<Self> {
        Self::with_model(Some(DEFAULT_MODEL), api_key)
    }

    /// Create a provider for a specific model
    ///
    /// Fails with [`ProviderError::ModelNotDefined`] when `model_name` is
    /// `None` or empty; no client is built in that case.
    pub fn with_model(model_name: Option<&str>, api_key: ApiKey) -> Result<Self> {
        Self::from_config(ProviderConfig::new(api_key).with_model(model_name))
    }

    /// Create a provider from `GROQ_API_KEY` and friends
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Create a provider from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_config(ProviderConfig::from_lookup(lookup)?)
    }

    pub fn from_config(config: ProviderConfig) -> Result<Self> {
        let model_name = match config.model_name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(ProviderError::ModelNotDefined),
        };

        let mut chat_config =
            ChatGroqConfig::new(model_name.clone(), config.api_key).with_base_url(config.base_url);
        if let Some(temperature) = config.temperature {
            chat_config = chat_config.with_temperature(temperature);
        }
        if let Some(max_tokens) = config.max_tokens {
            chat_config = chat_config.with_max_tokens(max_tokens);
        }
        if let Some(prompt) = config.system_prompt {
            chat_config = chat_config.with_system_prompt(prompt);
        }

        let model = Arc::new(ChatGroq::new(chat_config)?);
        debug!(model = %model_name, "Model provider ready");

        Ok(Self { model_name, model })
    }

    /// Get the chat client handle
    ///
    /// Every call returns the same underlying client.
    pub fn get_model(&self) -> Arc<ChatGroq> {
        Arc::clone(&self.model)
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> ApiKey {
        ApiKey::new("gsk_test").unwrap()
    }

    #[test]
    fn test_default_model() {
        let provider = LlmModel::new(test_key()).unwrap();
        assert_eq!(provider.model_name(), "llama3-70b");
        assert_eq!(provider.get_model().model_name(), "llama3-70b");
    }

    #[test]
    fn test_custom_model() {
        let provider = LlmModel::with_model(Some("mixtral-8x7b"), test_key()).unwrap();
        assert_eq!(provider.model_name(), "mixtral-8x7b");
        assert_eq!(provider.get_model().model_name(), "mixtral-8x7b");
    }

    #[test]
    fn test_any_non_empty_name_binds() {
        for name in ["gemma-7b-it", "llama-3.1-8b-instant", "x"] {
            let provider = LlmModel::with_model(Some(name), test_key()).unwrap();
            assert_eq!(provider.get_model().model_name(), name);
        }
    }

    #[test]
    fn test_empty_model_name() {
        let err = LlmModel::with_model(Some(""), test_key()).unwrap_err();
        assert!(matches!(err, ProviderError::ModelNotDefined));
        assert!(err.to_string().contains("not defined"));
    }

    #[test]
    fn test_whitespace_model_name_is_kept() {
        let provider = LlmModel::with_model(Some(" "), test_key()).unwrap();
        assert_eq!(provider.model_name(), " ");
        assert_eq!(provider.get_model().model_name(), " ");
    }

    #[test]
    fn test_missing_model_name() {
        let err = LlmModel::with_model(None, test_key()).unwrap_err();
        assert!(matches!(err, ProviderError::ModelNotDefined));
    }

    #[test]
    fn test_get_model_returns_same_handle() {
        let provider = LlmModel::new(test_key()).unwrap();
        let first = provider.get_model();
        let second = provider.get_model();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_from_lookup_reads_environment_names() {
        let provider = LlmModel::from_lookup(|name| match name {
            "GROQ_API_KEY" => Some("gsk_env".to_string()),
            "GROQ_MODEL" => Some("gemma-7b-it".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(provider.model_name(), "gemma-7b-it");
        assert_eq!(provider.get_model().config().api_key.expose(), "gsk_env");
        assert_eq!(provider.get_model().base_url(), crate::config::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_from_lookup_without_key() {
        let err = LlmModel::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, ProviderError::MissingApiKey(ref var) if var == "GROQ_API_KEY"));
    }

    #[test]
    fn test_from_config_passes_settings() {
        let config = ProviderConfig::new(test_key())
            .with_base_url("http://localhost:9000/v1")
            .with_temperature(0.3)
            .with_max_tokens(128)
            .with_system_prompt("Answer in French.");
        let provider = LlmModel::from_config(config).unwrap();

        let model = provider.get_model();
        assert_eq!(model.base_url(), "http://localhost:9000/v1");
        assert_eq!(model.config().temperature, Some(0.3));
        assert_eq!(model.config().max_tokens, Some(128));
        assert_eq!(
            model.config().system_prompt.as_deref(),
            Some("Answer in French.")
        );
    }
}
