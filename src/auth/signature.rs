//! HMAC-SHA512 signature generation for Kraken API authentication.
//!
//! Kraken private endpoints require a signature computed as:
//! ```text
//! HMAC-SHA512(path + SHA256(nonce + POST_data), base64_decode(api_secret))
//! ```
//!
//! The signature is then base64-encoded and sent in the `API-Sign` header.
//! `POST_data` must be byte-for-byte the body that is transmitted.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};

use crate::auth::Credentials;
use crate::error::KrakenError;
use crate::types::Payload;

type HmacSha512 = Hmac<Sha512>;

/// Sign a payload for Kraken's private API.
///
/// The payload must already carry its `nonce` field; it is encoded with
/// [`Payload::encode`], the same encoder the client uses for request bodies.
///
/// # Example
///
/// ```rust
/// use kraken_signed_client::Payload;
/// use kraken_signed_client::auth::{Credentials, sign_request};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("api_key", "YXBpX3NlY3JldA==")?; // base64 of "api_secret"
/// let payload = Payload::new().with("nonce", "1616492376594");
/// let signature = sign_request(&credentials, "/0/private/Balance", &payload)?;
/// assert_eq!(signature.len(), 88);
/// # Ok(())
/// # }
/// ```
pub fn sign_request(
    credentials: &Credentials,
    url_path: &str,
    payload: &Payload,
) -> Result<String, KrakenError> {
    let nonce = payload.get("nonce").ok_or(KrakenError::MissingNonce)?;
    let post_data = payload.encode()?;
    sign_encoded(credentials, url_path, nonce, &post_data)
}

/// Sign an already-encoded POST body.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the decoded secret
/// * `url_path` - The API endpoint path (e.g., "/0/private/Balance")
/// * `nonce` - The nonce value carried in `post_data`
/// * `post_data` - The URL-encoded POST body
pub fn sign_encoded(
    credentials: &Credentials,
    url_path: &str,
    nonce: &str,
    post_data: &str,
) -> Result<String, KrakenError> {
    // SHA256(nonce + POST_data).
    let mut sha256_hasher = Sha256::new();
    sha256_hasher.update(nonce.as_bytes());
    sha256_hasher.update(post_data.as_bytes());
    let sha256_hash = sha256_hasher.finalize();

    // HMAC-SHA512(path + sha256_hash, decoded_secret).
    let mut hmac = HmacSha512::new_from_slice(credentials.expose_secret())
        .map_err(|e| KrakenError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(url_path.as_bytes());
    hmac.update(&sha256_hash);
    let hmac_result = hmac.finalize().into_bytes();

    Ok(BASE64.encode(hmac_result))
}
