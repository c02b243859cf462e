use std::sync::Arc;

use kraken_signed_client::auth::EnvCredentials;
use kraken_signed_client::rest::{private, public};
use kraken_signed_client::types::read_envelope;
use kraken_signed_client::KrakenRestClient;

fn live_tests_enabled() -> bool {
    std::env::var("KRAKEN_LIVE_TESTS").ok().as_deref() == Some("1")
}

#[derive(Debug, serde::Deserialize)]
struct ServerTime {
    unixtime: i64,
}

#[tokio::test]
#[ignore]
async fn live_public_time_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let client = KrakenRestClient::public_only()?;
    let response = client.public(public::TIME, None).await?;
    assert_eq!(response.status(), 200);

    let time: ServerTime = read_envelope(response).await?;
    assert!(time.unixtime > 1_600_000_000);

    Ok(())
}

#[tokio::test]
#[ignore]
async fn live_private_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let credentials = match EnvCredentials::from_env() {
        Ok(creds) => creds,
        Err(_) => return Ok(()),
    };
    let mut builder = KrakenRestClient::builder().credentials(Arc::new(credentials));
    if let Ok(otp) = std::env::var("KRAKEN_API_OTP") {
        builder = builder.otp(otp);
    }
    let client = builder.build()?;

    let response = client.private(private::BALANCE, None).await?;
    let _balances: serde_json::Value = read_envelope(response).await?;

    Ok(())
}
