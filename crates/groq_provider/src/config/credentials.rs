//! API key handling

use std::env::{self, VarError};
use std::fmt;

use crate::error::{ProviderError, Result};

/// Environment variable holding the Groq API key
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Secret API key for the hosted model service
///
/// Stored exactly as given; only blank values are rejected.
/// `Debug` and `Display` never print the key itself.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key value, rejecting blank input
    pub fn new(key: impl Into<String>) -> Result<Self> {
        Self::parse(key.into(), API_KEY_ENV)
    }

    /// Read the key from `GROQ_API_KEY`
    pub fn from_env() -> Result<Self> {
        Self::from_env_var(API_KEY_ENV)
    }

    /// Read the key from an arbitrary environment variable
    pub fn from_env_var(var: &str) -> Result<Self> {
        match env::var(var) {
            Ok(value) => Self::parse(value, var),
            Err(VarError::NotPresent) => Err(ProviderError::MissingApiKey(var.to_string())),
            Err(VarError::NotUnicode(_)) => Err(ProviderError::InvalidApiKey(var.to_string())),
        }
    }

    pub(crate) fn parse(value: String, var: &str) -> Result<Self> {
        if value.trim().is_empty() {
            return Err(ProviderError::MissingApiKey(var.to_string()));
        }
        Ok(Self(value))
    }

    /// Access the raw key value
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_kept_as_given() {
        let key = ApiKey::new(" gsk_test ").unwrap();
        assert_eq!(key.expose(), " gsk_test ");
    }

    #[test]
    fn test_blank_api_key_rejected() {
        let err = ApiKey::new("   ").unwrap_err();
        assert!(matches!(err, ProviderError::MissingApiKey(ref var) if var == API_KEY_ENV));
    }

    #[test]
    fn test_api_key_is_redacted() {
        let key = ApiKey::new("gsk_secret").unwrap();
        assert_eq!(format!("{:?}", key), "ApiKey(****)");
        assert_eq!(key.to_string(), "****");
    }

    #[test]
    fn test_missing_env_var() {
        let err = ApiKey::from_env_var("GROQ_PROVIDER_TEST_UNSET_KEY").unwrap_err();
        assert_eq!(
            err.to_string(),
            "API key is not defined: set GROQ_PROVIDER_TEST_UNSET_KEY"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_env_var() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        env::set_var(
            "GROQ_PROVIDER_TEST_BAD_KEY",
            OsString::from_vec(vec![b'g', b's', b'k', 0xff]),
        );
        let err = ApiKey::from_env_var("GROQ_PROVIDER_TEST_BAD_KEY").unwrap_err();
        assert!(matches!(err, ProviderError::InvalidApiKey(ref var) if var == "GROQ_PROVIDER_TEST_BAD_KEY"));
        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[test]
    fn test_env_var_present() {
        env::set_var("GROQ_PROVIDER_TEST_SET_KEY", "gsk_from_env");
        let key = ApiKey::from_env_var("GROQ_PROVIDER_TEST_SET_KEY").unwrap();
        assert_eq!(key.expose(), "gsk_from_env");
    }
}
