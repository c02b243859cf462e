use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kraken_signed_client::error::KrakenError;
use kraken_signed_client::rest::public;
use kraken_signed_client::types::read_envelope;
use kraken_signed_client::{KrakenRestClient, Payload};

fn build_public_client(server: &MockServer) -> KrakenRestClient {
    KrakenRestClient::builder()
        .base_url(server.uri())
        .build()
        .unwrap()
}

#[derive(Debug, serde::Deserialize)]
struct ServerTime {
    unixtime: i64,
    rfc1123: String,
}

#[tokio::test]
async fn test_public_call_shape() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "unixtime": 1_700_000_000,
            "rfc1123": "Tue, 14 Nov 2023 22:13:20 +0000"
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Time"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let response = client.public(public::TIME, None).await.unwrap();
    assert_eq!(response.status(), 200);

    let time: ServerTime = read_envelope(response).await.unwrap();
    assert_eq!(time.unixtime, 1_700_000_000);
    assert_eq!(time.rfc1123, "Tue, 14 Nov 2023 22:13:20 +0000");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method.as_str(), "GET");
    assert_eq!(request.url.path(), "/0/public/Time");
    assert!(request.url.query().is_none());
    assert!(request.headers.get("api-key").is_none());
    assert!(request.headers.get("api-sign").is_none());
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn test_public_params_sent_as_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/0/public/Ticker"))
        .and(query_param("pair", "XBTUSD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": [],
            "result": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let params = Payload::new().with("pair", "XBTUSD");
    client.public(public::TICKER, Some(&params)).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap();
    assert_eq!(query, "pair=XBTUSD");
    assert!(!query.contains("nonce"));
}

#[tokio::test]
async fn test_public_call_ignores_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/0/public/SystemStatus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": [],
            "result": { "status": "online" }
        })))
        .mount(&server)
        .await;

    let client = KrakenRestClient::builder()
        .base_url(server.uri())
        .credentials(std::sync::Arc::new(
            kraken_signed_client::auth::StaticCredentials::new("key", "c2VjcmV0").unwrap(),
        ))
        .otp("123456")
        .build()
        .unwrap();

    client.public(public::SYSTEM_STATUS, None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    assert!(request.headers.get("api-key").is_none());
    assert!(request.headers.get("api-sign").is_none());
    assert!(request.url.query().is_none());
}

#[tokio::test]
async fn test_public_not_found_is_request_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/0/public/Nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let err = client.public("Nope", None).await.unwrap_err();

    assert!(matches!(err, KrakenError::Request(_)));
    assert!(err.to_string().contains("404"));
}
