//! Configuration module for groq_provider
//!
//! This module contains:
//! - `credentials`: API key handling
//! - `dotenv`: `.env` file loading at process entry
//! - `settings`: Provider settings sourced from the environment

mod credentials;
mod dotenv;
mod settings;

pub use credentials::{ApiKey, API_KEY_ENV};
pub use dotenv::{load_dotenv, load_dotenv_from};
pub use settings::{ProviderConfig, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, MODEL_ENV};
