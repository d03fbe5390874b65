//! Client tests against the in-memory `MockTransport`.

use std::sync::Arc;

use serde_json::json;

use pretium_client::domain::{
    ExchangeRateRequest, OnrampRequest, PayRequest, StatusRequest, ValidationRequest,
};
use pretium_client::test_utils::{MockResponse, MockTransport};
use pretium_client::{AppError, CallContext, PretiumClient, PretiumConfig, TransportError};

fn client_with(transport: Arc<MockTransport>) -> PretiumClient {
    let config = PretiumConfig::new(
        "0xSettlementAddress",
        "mock-key",
        Some("https://merchant.example.com/hook".to_string()),
    );
    PretiumClient::with_transport(config, transport)
}

fn submission(transaction_code: &str, status: &str) -> serde_json::Value {
    json!({
        "code": 200,
        "message": "ok",
        "data": { "status": status, "transaction_code": transaction_code, "message": "" }
    })
}

/// Transport that answers every endpoint, echoing request fields back so
/// each caller can check it received its own result.
fn echo_transport() -> MockTransport {
    MockTransport::new()
        .respond_with("/v1/exchange-rate", |req| {
            let currency = req.body.as_ref().unwrap()["currency_code"].clone();
            MockResponse::json(
                200,
                json!({
                    "code": 200,
                    "message": "ok",
                    "data": { "buying_rate": currency.clone(), "selling_rate": currency }
                }),
            )
        })
        .respond_with("/v1/validation", |req| {
            let shortcode = req.body.as_ref().unwrap()["shortcode"].clone();
            MockResponse::json(
                200,
                json!({
                    "code": 200,
                    "message": "ok",
                    "data": { "status": "COMPLETE", "shortcode": shortcode, "public_name": "X", "mobile_network": "Safaricom" }
                }),
            )
        })
        .respond_with("/v1/pay", |req| {
            let hash = req.body.as_ref().unwrap()["transaction_hash"].as_str().unwrap().to_string();
            MockResponse::json(200, submission(&format!("PAY-{}", hash), "PENDING"))
        })
        .respond_with("/v1/status", |req| {
            let code = req.body.as_ref().unwrap()["transaction_code"].clone();
            MockResponse::json(
                200,
                json!({
                    "code": 200,
                    "message": "ok",
                    "data": { "transaction_code": code, "status": "COMPLETE" }
                }),
            )
        })
        .respond_with("/v1/onramp/UGX", |req| {
            let address = req.body.as_ref().unwrap()["address"].as_str().unwrap().to_string();
            MockResponse::json(200, submission(&format!("ONR-{}", address), "PENDING"))
        })
}

#[tokio::test]
async fn test_concurrent_operations_do_not_cross_talk() {
    let transport = Arc::new(echo_transport());
    let client = client_with(Arc::clone(&transport));
    let ctx = CallContext::background();

    let validation = ValidationRequest {
        kind: "MOBILE".to_string(),
        shortcode: "0700000001".to_string(),
        mobile_network: "Safaricom".to_string(),
    };
    let pay = PayRequest {
        transaction_hash: "0xaaa".to_string(),
        amount: "100".to_string(),
        shortcode: "0700000002".to_string(),
        kind: "MOBILE".to_string(),
        chain: "BASE".to_string(),
    };
    let onramp = OnrampRequest {
        shortcode: "0700000003".to_string(),
        amount: 40.0,
        mobile_network: "MTN".to_string(),
        chain: "CELO".to_string(),
        asset: "USDT".to_string(),
        address: "0xbbb".to_string(),
    };

    let rate_req = ExchangeRateRequest::new("KES");
    let status_req = StatusRequest::new("TX-42");

    let (rate, valid, paid, status, onramped) = tokio::join!(
        client.exchange_rate(&ctx, &rate_req),
        client.validation(&ctx, &validation),
        client.pay(&ctx, &pay),
        client.status(&ctx, &status_req),
        client.onramp(&ctx, "UGX", &onramp),
    );

    assert_eq!(rate.unwrap().data.buying_rate, "KES");
    assert_eq!(valid.unwrap().data.shortcode, "0700000001");
    assert_eq!(paid.unwrap().data.transaction_code, "PAY-0xaaa");
    assert_eq!(status.unwrap().data.transaction_code, "TX-42");
    assert_eq!(onramped.unwrap().data.transaction_code, "ONR-0xbbb");

    assert_eq!(transport.requests().len(), 5);
}

#[tokio::test]
async fn test_concurrent_calls_across_tasks() {
    let client = client_with(Arc::new(echo_transport()));

    let handles: Vec<_> = (0..5)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                let code = format!("TX-{}", i);
                let response = client
                    .status(&CallContext::background(), &StatusRequest::new(code.clone()))
                    .await
                    .unwrap();
                (code, response.data.transaction_code)
            })
        })
        .collect();

    for handle in handles {
        let (sent, received) = handle.await.unwrap();
        assert_eq!(sent, received);
    }
}

#[tokio::test]
async fn test_headers_and_callback_on_the_wire() {
    let transport = Arc::new(echo_transport());
    let client = client_with(Arc::clone(&transport));

    let onramp = OnrampRequest {
        shortcode: "0700000003".to_string(),
        amount: 40.0,
        mobile_network: "MTN".to_string(),
        chain: "CELO".to_string(),
        asset: "USDT".to_string(),
        address: "0xbbb".to_string(),
    };
    client
        .onramp(&CallContext::background(), "UGX", &onramp)
        .await
        .unwrap();

    let requests = transport.requests();
    let sent = &requests[0];
    assert_eq!(sent.method, "POST");
    assert_eq!(sent.path, "/v1/onramp/UGX");
    assert_eq!(sent.headers.get("x-api-key").map(String::as_str), Some("mock-key"));
    assert_eq!(
        sent.headers.get("content-type").map(String::as_str),
        Some("application/json")
    );
    assert_eq!(
        sent.body.as_ref().unwrap()["callback_url"],
        "https://merchant.example.com/hook"
    );
}

#[tokio::test]
async fn test_transport_failure_is_surfaced_verbatim() {
    let transport = Arc::new(MockTransport::failing("connection reset by peer"));
    let client = client_with(transport);

    let err = client
        .status(&CallContext::background(), &StatusRequest::new("TX-1"))
        .await
        .unwrap_err();

    match err {
        AppError::Transport(TransportError::Connection(message)) => {
            assert_eq!(message, "connection reset by peer");
        }
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_set_transport_replaces_transport() {
    let first = Arc::new(MockTransport::failing("first transport"));
    let second = Arc::new(echo_transport());

    let mut client = client_with(Arc::clone(&first));
    client.set_transport(Arc::clone(&second) as _);

    let response = client
        .status(&CallContext::background(), &StatusRequest::new("TX-9"))
        .await
        .unwrap();

    assert_eq!(response.data.transaction_code, "TX-9");
    assert!(first.requests().is_empty());
    assert_eq!(second.requests().len(), 1);
}

#[tokio::test]
async fn test_empty_fields_are_left_to_the_provider() {
    let transport = Arc::new(echo_transport());
    let client = client_with(Arc::clone(&transport));

    let response = client
        .status(&CallContext::background(), &StatusRequest::new(""))
        .await
        .unwrap();

    assert_eq!(response.data.transaction_code, "");
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/v1/status");
}

#[tokio::test]
async fn test_unrouted_path_yields_api_error() {
    let client = client_with(Arc::new(MockTransport::new()));

    let err = client
        .exchange_rate(&CallContext::background(), &ExchangeRateRequest::new("KES"))
        .await
        .unwrap_err();

    let api_err = err.as_api_error().unwrap();
    assert_eq!(api_err.code, 404);
    assert_eq!(api_err.message, "Route not found");
}
