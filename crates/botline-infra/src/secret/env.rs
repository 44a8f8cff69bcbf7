//! Environment variable secret lookup.
//!
//! Read-only: the variable names come from config (`api_key_env`,
//! `access_token_env`, `app_secret_env`) and values are never written back.

use secrecy::SecretString;

use botline_types::error::SecretError;

/// Reads secrets from environment variables.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecrets;

impl EnvSecrets {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a required secret. Missing, non-Unicode and blank values are errors.
    pub fn require(&self, var: &str) -> Result<SecretString, SecretError> {
        match std::env::var(var) {
            Ok(val) if val.trim().is_empty() => Err(SecretError::Empty(var.to_string())),
            Ok(val) => Ok(SecretString::from(val)),
            Err(_) => Err(SecretError::NotFound(var.to_string())),
        }
    }

    /// Resolve an optional secret; `None` when unset or blank.
    pub fn optional(&self, var: &str) -> Option<SecretString> {
        self.require(var).ok()
    }

    /// Whether the variable is set to a non-blank value.
    pub fn is_set(&self, var: &str) -> bool {
        self.require(var).is_ok()
    }
}
