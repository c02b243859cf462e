//! Kraken REST request dispatcher.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{
    CredentialsProvider, IncreasingNonce, NonceProvider, StaticCredentials, sign_encoded,
};
use crate::error::KrakenError;
use crate::rest::endpoints::{EndpointKind, KRAKEN_BASE_URL};
use crate::types::Payload;

/// The Kraken REST API client.
///
/// Resolves the endpoint path, signs private requests, and reports transport
/// failures. Response bodies are returned untouched; see
/// [`read_envelope`](crate::types::read_envelope) for unwrapping them.
///
/// # Example
///
/// ```rust,no_run
/// use kraken_signed_client::KrakenRestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Create a client for public endpoints only
///     let client = KrakenRestClient::public_only()?;
///
///     let response = client.public("Time", None).await?;
///     println!("Server time: {}", response.text().await?);
///
///     Ok(())
/// }
/// ```
///
/// For private endpoints, provide credentials:
///
/// ```rust,no_run
/// use kraken_signed_client::{KrakenRestClient, Payload};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = KrakenRestClient::new("api_key", "YXBpX3NlY3JldA==", None)?;
///
///     let params = Payload::new().with("asset", "ZUSD");
///     let response = client.private("TradeBalance", Some(&params)).await?;
///     println!("Trade balance: {}", response.text().await?);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct KrakenRestClient {
    http_client: ClientWithMiddleware,
    // Same connection pool as `http_client`, plus retries. Public calls only.
    public_client: ClientWithMiddleware,
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    otp: Option<String>,
    nonce_provider: Arc<dyn NonceProvider>,
}

impl KrakenRestClient {
    /// Create a client for public and private endpoints.
    ///
    /// The secret is decoded here; an invalid secret fails with
    /// [`KrakenError::InvalidSecret`] before any request is made.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl AsRef<str>,
        otp: Option<String>,
    ) -> Result<Self, KrakenError> {
        let credentials = StaticCredentials::new(api_key, api_secret)?;
        let mut builder = Self::builder().credentials(Arc::new(credentials));
        if let Some(otp) = otp {
            builder = builder.otp(otp);
        }
        builder.build()
    }

    /// Create a client that can only access public endpoints.
    pub fn public_only() -> Result<Self, KrakenError> {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> KrakenRestClientBuilder {
        KrakenRestClientBuilder::new()
    }

    /// Call a public endpoint with a GET request.
    ///
    /// `params` are sent as the query string. No credentials, nonce or signature
    /// are involved.
    pub async fn public(
        &self,
        method_name: &str,
        params: Option<&Payload>,
    ) -> Result<reqwest::Response, KrakenError> {
        self.request(EndpointKind::Public, method_name, params).await
    }

    /// Call a private endpoint with a signed POST request.
    ///
    /// A copy of `params` gains a fresh `nonce` (replacing any the caller supplied)
    /// and the configured `otp`, and is sent as the form body.
    pub async fn private(
        &self,
        method_name: &str,
        params: Option<&Payload>,
    ) -> Result<reqwest::Response, KrakenError> {
        self.request(EndpointKind::Private, method_name, params).await
    }

    /// Dispatch a request to `method_name` on the given kind of endpoint.
    pub async fn request(
        &self,
        kind: EndpointKind,
        method_name: &str,
        params: Option<&Payload>,
    ) -> Result<reqwest::Response, KrakenError> {
        let url_path = kind.path(method_name);
        debug_assert_eq!(EndpointKind::classify(&url_path), Some(kind));
        let url = format!("{}{}", self.base_url, url_path);
        let mut payload = params.cloned().unwrap_or_default();

        let request = match kind {
            EndpointKind::Public => {
                let query = payload.encode()?;
                let url = if query.is_empty() {
                    url
                } else {
                    format!("{}?{}", url, query)
                };
                self.public_client.request(kind.http_method(), url)
            }
            EndpointKind::Private => {
                let credentials = self
                    .credentials
                    .as_ref()
                    .ok_or(KrakenError::MissingCredentials)?
                    .get_credentials();

                let nonce = self.nonce_provider.next_nonce().to_string();
                payload.set("nonce", nonce.as_str());
                if let Some(otp) = self.otp.as_deref().filter(|otp| !otp.is_empty()) {
                    payload.set("otp", otp);
                }

                // The encoded body is signed and sent as-is.
                let post_data = payload.encode()?;
                let signature = sign_encoded(credentials, &url_path, &nonce, &post_data)?;

                self.http_client
                    .request(kind.http_method(), url)
                    .header("API-Key", credentials.api_key.as_str())
                    .header("API-Sign", signature)
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(post_data)
            }
        };

        debug!(%kind, path = %url_path, fields = payload.len(), "dispatching Kraken request");

        let response = request.send().await.inspect_err(|e| {
            warn!(path = %url_path, error = %e, "Kraken request failed to complete");
        })?;

        response.error_for_status().map_err(|e| {
            warn!(path = %url_path, error = %e, "Kraken request returned failure status");
            KrakenError::from(e)
        })
    }

    /// Draw the next nonce from the client's nonce source.
    pub fn next_nonce(&self) -> u64 {
        self.nonce_provider.next_nonce()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }
}

impl std::fmt::Debug for KrakenRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KrakenRestClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .field("has_otp", &self.otp.is_some())
            .finish()
    }
}

/// Builder for [`KrakenRestClient`].
pub struct KrakenRestClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    otp: Option<String>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    max_retries: u32,
}

impl KrakenRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: KRAKEN_BASE_URL.to_string(),
            credentials: None,
            otp: None,
            nonce_provider: None,
            user_agent: None,
            timeout: None,
            max_retries: 0,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a one-time password sent as `otp` with every private request.
    pub fn otp(mut self, otp: impl Into<String>) -> Self {
        self.otp = Some(otp.into());
        self
    }

    /// Set a custom nonce provider.
    ///
    /// Clients sharing one API key should share one provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a timeout applied to each HTTP request. None by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of retries for transient failures of public calls.
    ///
    /// Defaults to 0. Private calls are always sent once: a resent request would
    /// repeat its nonce.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<KrakenRestClient, KrakenError> {
        Url::parse(&self.base_url)?;

        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("kraken-signed-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("kraken-signed-client"));
        headers.insert(USER_AGENT, header_value);

        let mut reqwest_builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            reqwest_builder = reqwest_builder.timeout(timeout);
        }
        let reqwest_client = reqwest_builder.build()?;

        let http_client = ClientBuilder::new(reqwest_client.clone())
            .with(TracingMiddleware::default())
            .build();

        let mut public_client =
            ClientBuilder::new(reqwest_client).with(TracingMiddleware::default());
        if self.max_retries > 0 {
            let retry_policy =
                ExponentialBackoff::builder().build_with_max_retries(self.max_retries);
            public_client =
                public_client.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }

        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(IncreasingNonce::new()));

        Ok(KrakenRestClient {
            http_client,
            public_client: public_client.build(),
            base_url: self.base_url.trim_end_matches('/').to_string(),
            credentials: self.credentials,
            otp: self.otp,
            nonce_provider,
        })
    }
}

impl Default for KrakenRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

    #[test]
    fn test_invalid_secret_fails_construction() {
        let result = KrakenRestClient::new(BASE64.encode("key"), "key", None);
        assert!(matches!(result, Err(KrakenError::InvalidSecret(_))));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = KrakenRestClient::builder().base_url("not a url").build();
        assert!(matches!(result, Err(KrakenError::Url(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = KrakenRestClient::builder()
            .base_url("http://localhost:8080/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert!(!client.has_credentials());
    }

    #[test]
    fn test_private_without_credentials() {
        let client = KrakenRestClient::public_only().unwrap();
        let result = tokio_test::block_on(client.private("Balance", None));
        assert!(matches!(result, Err(KrakenError::MissingCredentials)));
    }

    #[test]
    fn test_debug_hides_otp() {
        let client =
            KrakenRestClient::new("key", BASE64.encode("secret"), Some("918273".to_string()))
                .unwrap();
        let debug_str = format!("{:?}", client);
        assert!(debug_str.contains("has_otp: true"));
        assert!(!debug_str.contains("918273"));
    }

    #[test]
    fn test_client_nonce_increasing() {
        let client = KrakenRestClient::public_only().unwrap();
        let first = client.next_nonce();
        let second = client.next_nonce();
        assert!(second > first);
    }
}
