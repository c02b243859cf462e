//! Error types for the Kraken signed-request client.

use thiserror::Error;

/// The main error type for all client operations.
#[derive(Error, Debug)]
pub enum KrakenError {
    /// The API secret is not valid base64.
    ///
    /// Raised when credentials are built, before any request is attempted.
    #[error("Invalid API secret, expected a base64-encoded secret: {0}")]
    InvalidSecret(#[source] base64::DecodeError),

    /// The transport failed to complete the request or returned a non-success status.
    #[error("Kraken API request failed: {0}")]
    Request(#[from] reqwest_middleware::Error),

    /// A private endpoint was called on a client without credentials.
    #[error("Missing credentials: API key and secret required for private endpoints")]
    MissingCredentials,

    /// A required environment variable is not set.
    #[error("Environment variable {0} not set")]
    MissingEnvVar(String),

    /// The payload handed to the signer has no `nonce` field.
    #[error("Payload has no nonce field to sign")]
    MissingNonce,

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The payload could not be form-encoded.
    #[error("Failed to encode payload: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Kraken returned an error inside the response envelope.
    #[error("Kraken API error: {0}")]
    Api(ApiError),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for KrakenError {
    fn from(err: reqwest::Error) -> Self {
        KrakenError::Request(reqwest_middleware::Error::Reqwest(err))
    }
}

impl KrakenError {
    /// Whether this error came from the transport (connection failure or HTTP status).
    pub fn is_request_failure(&self) -> bool {
        matches!(self, KrakenError::Request(_))
    }

    /// The HTTP status that caused a [`KrakenError::Request`], when there was one.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            KrakenError::Request(reqwest_middleware::Error::Reqwest(err)) => err.status(),
            _ => None,
        }
    }
}

/// Kraken API error codes and messages.
///
/// These are errors returned by the Kraken API itself in the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The error category from Kraken (e.g., "EGeneral")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl ApiError {
    /// Create a new API error from code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Parse API error from Kraken's error array format.
    ///
    /// Kraken returns errors as an array like `["EGeneral:Invalid arguments"]`
    pub fn from_error_array(errors: &[String]) -> Option<Self> {
        errors.first().map(|e| match e.split_once(':') {
            Some((code, message)) => Self::new(code, message),
            None => Self::new("Unknown", e.clone()),
        })
    }

    /// Get the full error string in Kraken's format (code:message).
    pub fn full_code(&self) -> String {
        format!("{}:{}", self.code, self.message)
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limit(&self) -> bool {
        (self.code == "EAPI" || self.code == "EOrder") && self.message.contains("Rate limit")
    }

    /// Check if this is an invalid nonce error.
    pub fn is_invalid_nonce(&self) -> bool {
        self.code == "EAPI" && self.message.contains("Invalid nonce")
    }

    /// Check if this is an invalid key error.
    pub fn is_invalid_key(&self) -> bool {
        self.code == "EAPI" && self.message.contains("Invalid key")
    }

    /// Check if this is an invalid signature error.
    pub fn is_invalid_signature(&self) -> bool {
        self.code == "EAPI" && self.message.contains("Invalid signature")
    }

    /// Check if this is a permission denied error.
    pub fn is_permission_denied(&self) -> bool {
        self.code == "EGeneral" && self.message.contains("Permission denied")
    }
}

/// Known Kraken error codes relevant to request authentication.
pub mod error_codes {
    pub const INVALID_ARGUMENTS: &str = "EGeneral:Invalid arguments";
    pub const PERMISSION_DENIED: &str = "EGeneral:Permission denied";
    pub const UNKNOWN_METHOD: &str = "EGeneral:Unknown method";

    pub const INVALID_KEY: &str = "EAPI:Invalid key";
    pub const INVALID_SIGNATURE: &str = "EAPI:Invalid signature";
    pub const INVALID_NONCE: &str = "EAPI:Invalid nonce";
    pub const RATE_LIMIT_EXCEEDED: &str = "EAPI:Rate limit exceeded";
}
