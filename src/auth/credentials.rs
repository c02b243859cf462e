//! Credential management for Kraken API authentication.

use std::sync::Arc;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use secrecy::{ExposeSecret, SecretBox};

use crate::error::KrakenError;

/// API credentials containing the key and the decoded secret.
///
/// The secret is decoded from base64 when the credentials are built, so a malformed
/// secret is reported here rather than on the first private request.
pub struct Credentials {
    /// The API key (public identifier)
    pub api_key: String,
    /// The decoded API secret, used as the HMAC key
    api_secret: SecretBox<Vec<u8>>,
}

impl Credentials {
    /// Create new credentials from an API key and a base64-encoded secret.
    ///
    /// The key may be empty. Fails with [`KrakenError::InvalidSecret`] if the secret
    /// is not valid base64.
    pub fn new(api_key: impl Into<String>, api_secret: impl AsRef<str>) -> Result<Self, KrakenError> {
        let decoded = BASE64
            .decode(api_secret.as_ref())
            .map_err(KrakenError::InvalidSecret)?;

        Ok(Self {
            api_key: api_key.into(),
            api_secret: SecretBox::new(Box::new(decoded)),
        })
    }

    /// Get the decoded API secret for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &[u8] {
        self.api_secret.expose_secret().as_slice()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing API credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Static credentials provider that holds credentials directly.
#[derive(Debug)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(api_key: impl Into<String>, api_secret: impl AsRef<str>) -> Result<Self, KrakenError> {
        Ok(Self {
            credentials: Credentials::new(api_key, api_secret)?,
        })
    }
}

impl From<Credentials> for StaticCredentials {
    fn from(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl CredentialsProvider for Arc<StaticCredentials> {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads from `KRAKEN_API_KEY` and `KRAKEN_API_SECRET`.
#[derive(Debug)]
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    pub const DEFAULT_KEY_VAR: &'static str = "KRAKEN_API_KEY";
    pub const DEFAULT_SECRET_VAR: &'static str = "KRAKEN_API_SECRET";

    /// Create credentials from the default environment variables.
    pub fn from_env() -> Result<Self, KrakenError> {
        Self::from_env_vars(Self::DEFAULT_KEY_VAR, Self::DEFAULT_SECRET_VAR)
    }

    /// Create credentials from custom environment variable names.
    ///
    /// Fails with [`KrakenError::MissingEnvVar`] if either variable is unset and with
    /// [`KrakenError::InvalidSecret`] if the secret is not valid base64.
    pub fn from_env_vars(key_var: &str, secret_var: &str) -> Result<Self, KrakenError> {
        let api_key =
            std::env::var(key_var).map_err(|_| KrakenError::MissingEnvVar(key_var.to_string()))?;
        let api_secret = std::env::var(secret_var)
            .map_err(|_| KrakenError::MissingEnvVar(secret_var.to_string()))?;

        Ok(Self {
            credentials: Credentials::new(api_key, api_secret)?,
        })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}
