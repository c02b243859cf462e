//! # Kraken Signed Client
//!
//! An async Rust client for the Kraken exchange REST API that takes care of
//! request authentication.
//!
//! ## Features
//!
//! - Public calls as plain GET requests
//! - Private calls signed with HMAC-SHA512 over the path and a SHA-256 digest of
//!   the nonce and body
//! - API secret validated when the client is built
//! - Strictly increasing millisecond nonces, safe to share across tasks
//! - Optional one-time password for accounts with 2FA on API keys
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kraken_signed_client::{KrakenRestClient, Payload};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = KrakenRestClient::public_only()?;
//!     let params = Payload::new().with("pair", "XBTUSD");
//!     let ticker = client.public("Ticker", Some(&params)).await?;
//!     println!("Ticker: {}", ticker.text().await?);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ApiError, KrakenError};
pub use rest::{EndpointKind, KrakenRestClient, KrakenRestClientBuilder};
pub use types::Payload;

/// Result type alias using KrakenError
pub type Result<T> = std::result::Result<T, KrakenError>;
