//! Credential providers
//!
//! The API key is resolved once, when the provider is built, and is then held
//! immutably for the lifetime of the process.

use crate::error::{CanvaError, Result};
use std::fmt;

/// Supplies the bearer token attached to every outgoing request
pub trait CredentialProvider: Send + Sync {
    /// Token for the `Authorization: Bearer` header
    fn bearer_token(&self) -> Result<String>;
}

/// API key credential
#[derive(Clone)]
pub struct ApiKeyCredentials {
    name: String,
    key: String,
}

impl ApiKeyCredentials {
    /// Create from an already known key
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }

    /// Read the key from an environment variable
    ///
    /// # Errors
    ///
    /// Returns [`CanvaError::Credential`] when the variable is unset or empty.
    pub fn from_env(var: &str) -> Result<Self> {
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(var, key)),
            Ok(_) => Err(CanvaError::Credential(format!(
                "environment variable {} is empty",
                var
            ))),
            Err(_) => Err(CanvaError::Credential(format!(
                "environment variable {} is not set",
                var
            ))),
        }
    }

    /// Name this credential was registered under
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl CredentialProvider for ApiKeyCredentials {
    fn bearer_token(&self) -> Result<String> {
        Ok(self.key.clone())
    }
}

impl fmt::Debug for ApiKeyCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyCredentials")
            .field("name", &self.name)
            .field("key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_credentials() {
        let creds = ApiKeyCredentials::new("CANVA_API_KEY", "secret-token");
        assert_eq!(creds.name(), "CANVA_API_KEY");
        assert_eq!(creds.bearer_token().unwrap(), "secret-token");
    }

    #[test]
    fn test_debug_redacts_key() {
        let creds = ApiKeyCredentials::new("CANVA_API_KEY", "secret-token");
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("CANVA_API_KEY"));
        assert!(!debug_str.contains("secret-token"));
    }

    #[test]
    fn test_from_env_missing_variable() {
        let err = ApiKeyCredentials::from_env("CANVA_CLIENT_TEST_UNSET_VARIABLE").unwrap_err();
        assert!(matches!(err, CanvaError::Credential(_)));
        assert!(err.to_string().contains("CANVA_CLIENT_TEST_UNSET_VARIABLE"));
    }

    #[test]
    fn test_from_env_reads_variable() {
        std::env::set_var("CANVA_CLIENT_TEST_SET_VARIABLE", "env-token");
        let creds = ApiKeyCredentials::from_env("CANVA_CLIENT_TEST_SET_VARIABLE").unwrap();
        assert_eq!(creds.bearer_token().unwrap(), "env-token");
    }

    #[test]
    fn test_from_env_empty_variable() {
        std::env::set_var("CANVA_CLIENT_TEST_EMPTY_VARIABLE", "  ");
        assert!(ApiKeyCredentials::from_env("CANVA_CLIENT_TEST_EMPTY_VARIABLE").is_err());
    }
}
