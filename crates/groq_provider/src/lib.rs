//! groq_provider: chat model provider for Groq hosted models
//!
//! This library provides:
//! - Configuration loading (`.env` files, `GROQ_API_KEY`)
//! - A chat client bound to one model over Groq's OpenAI-compatible API
//! - `LlmModel`, a provider that validates the model name and owns the client
//!
//! # Example
//!
//! ```no_run
//! use groq_provider::{load_dotenv, ApiKey, LlmModel};
//!
//! #[tokio::main]
//! async fn main() -> groq_provider::Result<()> {
//!     load_dotenv()?;
//!
//!     let provider = LlmModel::new(ApiKey::from_env()?)?;
//!     let response = provider.get_model().invoke("hi").await?;
//!     println!("{}", response.content);
//!     Ok(())
//! }
//! ```

// Core modules
pub mod error;

// Configuration module
pub mod config;

// Core functionality
pub mod model;
pub mod provider;

// Re-export commonly used types and functions
pub use error::{ProviderError, Result};

// Config re-exports
pub use config::{
    load_dotenv, load_dotenv_from, ApiKey, ProviderConfig, API_KEY_ENV, BASE_URL_ENV,
    DEFAULT_BASE_URL, DEFAULT_MODEL, MODEL_ENV,
};

// Model re-exports
pub use model::{ChatGroq, ChatGroqConfig, ChatResponse, TokenUsage};

// Provider re-exports
pub use provider::LlmModel;
