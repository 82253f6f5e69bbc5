/// Error types for the Groq provider
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Model is not defined.")]
    ModelNotDefined,

    #[error("API key is not defined: set {0}")]
    MissingApiKey(String),

    #[error("API key in {0} is not valid UTF-8")]
    InvalidApiKey(String),

    #[error("Failed to load env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    #[error("Received empty response from API")]
    EmptyResponse,

    /// Failures raised by the underlying OpenAI-compatible client, passed through as-is
    #[error(transparent)]
    Api(#[from] async_openai::error::OpenAIError),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
