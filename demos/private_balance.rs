//! Example: Signed private requests.
//!
//! Requires `KRAKEN_API_KEY` and `KRAKEN_API_SECRET` (a `.env` file works).
//! Set `KRAKEN_API_OTP` if the key is protected by a one-time password.
//!
//! Run with: cargo run --example private_balance

use std::collections::HashMap;
use std::sync::Arc;

use kraken_signed_client::auth::{
    Credentials, EnvCredentials, IncreasingNonce, NonceProvider, sign_request,
};
use kraken_signed_client::rest::private;
use kraken_signed_client::types::read_envelope;
use kraken_signed_client::{KrakenError, KrakenRestClient, Payload};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Offline: sign a payload by hand.
    let credentials = Credentials::new("api_key", "YXBpX3NlY3JldA==")?;
    let nonce = IncreasingNonce::new().next_nonce();
    let payload = Payload::new().with("nonce", nonce.to_string());
    let signature = sign_request(&credentials, "/0/private/Balance", &payload)?;
    println!("API-Sign for nonce {}: {}", nonce, signature);

    // A malformed secret is caught before any request.
    if let Err(err) = Credentials::new("api_key", "key") {
        println!("Rejected secret: {}", err);
    }

    let credentials = match EnvCredentials::from_env() {
        Ok(creds) => creds,
        Err(err) => {
            println!("Skipping live call: {}", err);
            return Ok(());
        }
    };

    let mut builder = KrakenRestClient::builder().credentials(Arc::new(credentials));
    if let Ok(otp) = std::env::var("KRAKEN_API_OTP") {
        builder = builder.otp(otp);
    }
    let client = builder.build()?;

    let response = client.private(private::BALANCE, None).await?;
    match read_envelope::<HashMap<String, String>>(response).await {
        Ok(balances) => {
            for (asset, amount) in balances {
                println!("{}: {}", asset, amount);
            }
        }
        Err(KrakenError::Api(err)) if err.is_invalid_nonce() => {
            println!("Nonce rejected; another client may share this key: {}", err);
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
