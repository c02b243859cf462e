//! Example: Call a public endpoint.
//!
//! Run with: cargo run --example public_time

use kraken_signed_client::rest::public;
use kraken_signed_client::types::read_envelope;
use kraken_signed_client::{KrakenRestClient, Payload};
use tracing_subscriber::EnvFilter;

#[derive(Debug, serde::Deserialize)]
struct ServerTime {
    unixtime: i64,
    rfc1123: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = KrakenRestClient::public_only()?;

    let response = client.public(public::TIME, None).await?;
    let time: ServerTime = read_envelope(response).await?;
    println!("Server time: {} ({})", time.unixtime, time.rfc1123);

    // Public params travel as the query string.
    let params = Payload::new().with("pair", "XBTUSD");
    let response = client.public(public::TICKER, Some(&params)).await?;
    println!("Ticker: {}", response.text().await?);

    Ok(())
}
