//! Drives `HttpGateway` against a stub analytics service served by axum on localhost.

use api_client::error::GatewayError;
use api_client::{AnalyticsGateway, AnalyzeRequest, BacktestRequest, HttpGateway, PredictRequest};
use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::IntoResponse;
use configuration::GatewayConfig;
use core_types::{PredictionMode, Scenario, Subject, TargetParameters};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Answers every request with the same status and body, recording the path and JSON
/// body of each request it receives.
#[derive(Clone)]
struct StubService {
    status: StatusCode,
    body: &'static str,
    received: Arc<Mutex<Vec<(String, Value)>>>,
}

impl StubService {
    fn received(&self) -> Vec<(String, Value)> {
        self.received.lock().unwrap().clone()
    }
}

async fn record(
    State(stub): State<StubService>,
    uri: Uri,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    stub.received
        .lock()
        .unwrap()
        .push((uri.path().to_string(), body));
    (
        stub.status,
        [(header::CONTENT_TYPE, "application/json")],
        stub.body,
    )
}

/// Starts the stub and returns its `/api` base URL.
async fn serve(status: StatusCode, body: &'static str) -> (String, StubService) {
    let stub = StubService {
        status,
        body,
        received: Arc::default(),
    };
    let app = Router::new().fallback(record).with_state(stub.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/api", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (base_url, stub)
}

fn gateway(base_url: String) -> HttpGateway {
    HttpGateway::new(&GatewayConfig {
        base_url,
        timeout_secs: 0,
    })
    .unwrap()
}

#[tokio::test]
async fn analyze_posts_targets_and_decodes_the_payload() {
    let (base_url, stub) = serve(
        StatusCode::OK,
        r#"{"metrics":{"current_price":95.1,"technical_metrics":{"rsi":55}},"scenario":"high","investment_recommendation":{"recommended_units":10}}"#,
    )
    .await;

    let request = AnalyzeRequest::new(&Subject::ad_hoc("VAS.AX"), TargetParameters::new(2000, 10000));
    let payload = gateway(base_url).analyze(&request).await.unwrap();
    assert_eq!(payload.scenario, Scenario::High);
    assert_eq!(payload.investment_recommendation.recommended_units, Some(10));

    let received = stub.received();
    assert_eq!(received.len(), 1);
    let (path, body) = &received[0];
    assert_eq!(path, "/api/analyze");
    assert_eq!(body["ticker"], "VAS.AX");
    assert_eq!(body["monthly_target"], 2000);
    assert_eq!(body["total_target"], 10000);
}

#[tokio::test]
async fn advanced_prediction_uses_its_own_endpoint() {
    let (base_url, stub) = serve(
        StatusCode::OK,
        r#"{"forecast":[{"ds":"2024-06-01","yhat":100.0,"yhat_lower":95.0,"yhat_upper":105.0}]}"#,
    )
    .await;

    let payload = gateway(base_url)
        .predict(PredictionMode::Advanced, &PredictRequest::new(&Subject::ad_hoc("NDQ.AX")))
        .await
        .unwrap();
    assert_eq!(payload.forecast.len(), 1);

    let received = stub.received();
    assert_eq!(received[0].0, "/api/predict-advanced");
    assert_eq!(received[0].1["ticker"], "NDQ.AX");
}

#[tokio::test]
async fn service_error_message_is_surfaced() {
    let (base_url, stub) = serve(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"error":"Insufficient history"}"#,
    )
    .await;

    let request = BacktestRequest::new(&Subject::ad_hoc("VAS.AX"), Some("5y".into()), Some(30));
    let result = gateway(base_url).backtest(&request).await;
    assert_eq!(
        result.unwrap_err(),
        GatewayError::Service("Insufficient history".to_string())
    );

    let received = stub.received();
    assert_eq!(received[0].0, "/api/backtest");
    assert_eq!(received[0].1["train_period"], "5y");
    assert_eq!(received[0].1["test_days"], 30);
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    // Bind then drop, so the port is very likely closed.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = gateway(format!("http://{}/api", addr))
        .predict(PredictionMode::Standard, &PredictRequest::new(&Subject::ad_hoc("VAS.AX")))
        .await;
    assert!(matches!(result, Err(GatewayError::Network(_))));
}
