//! # Quantdash API Client
//!
//! The boundary to the remote analytics service. All computation (indicators,
//! forecasting, backtesting) happens behind this boundary; this crate only ships
//! requests out and turns replies into payloads or normalized failures.
//!
//! ## Public API
//!
//! - `AnalyticsGateway`: the abstract contract the coordinator depends on.
//! - `HttpGateway`: the HTTP + JSON implementation built on `reqwest`.
//! - `AnalyzeRequest`, `PredictRequest`, `BacktestRequest`: wire request bodies.
//! - `Operation`: each remote operation's path and fallback failure message.
//! - `interpret_response`: the status/body normalization shared by every operation.
//! - `GatewayError`: `Network`, `Service(message)` or `Decode`.

use crate::error::GatewayError;
use async_trait::async_trait;
use configuration::GatewayConfig;
use core_types::{AnalysisPayload, BacktestPayload, PredictionMode, PredictionPayload};
use serde::{Serialize, de::DeserializeOwned};

pub mod error;
pub mod requests;
pub mod responses;
// --- Public API ---
pub use requests::{AnalyzeRequest, BacktestRequest, PredictRequest};
pub use responses::interpret_response;

/// The generic, abstract interface for the remote analytics service.
/// This trait is the contract the coordinator uses, allowing the underlying
/// implementation (HTTP or scripted test double) to be swapped out.
///
/// Implementations are stateless per call and never retry.
#[async_trait]
pub trait AnalyticsGateway: Send + Sync {
    /// Runs the market analysis and the investment recommendation for the targets.
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisPayload, GatewayError>;

    /// Forecasts the coming days with the model selected by `mode`.
    async fn predict(
        &self,
        mode: PredictionMode,
        request: &PredictRequest,
    ) -> Result<PredictionPayload, GatewayError>;

    /// Replays the forecasting model against recent actual prices.
    async fn backtest(&self, request: &BacktestRequest) -> Result<BacktestPayload, GatewayError>;
}

/// The remote operations the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Analyze,
    Predict(PredictionMode),
    Backtest,
}

impl Operation {
    /// The path segment appended to the base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Operation::Analyze => "analyze",
            Operation::Predict(mode) => mode.endpoint(),
            Operation::Backtest => "backtest",
        }
    }

    /// The message used when the service fails without saying why.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Operation::Analyze => "Failed to fetch market data",
            Operation::Predict(PredictionMode::Standard) => "Failed to fetch AI prediction",
            Operation::Predict(PredictionMode::Advanced) => {
                "Failed to fetch advanced AI prediction"
            }
            Operation::Backtest => "Failed to fetch backtest results",
        }
    }
}

/// A concrete implementation of the `AnalyticsGateway` over HTTP + JSON.
#[derive(Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("quantdash/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, T>(&self, operation: Operation, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, operation.path());
        tracing::debug!(%url, "Calling analytics service");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        let result = interpret_response(status, &text, operation.fallback_message());
        if let Err(e) = &result {
            tracing::debug!(%url, %status, error = %e, "Analytics service call failed");
        }
        result
    }
}

#[async_trait]
impl AnalyticsGateway for HttpGateway {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisPayload, GatewayError> {
        self.post(Operation::Analyze, request).await
    }

    async fn predict(
        &self,
        mode: PredictionMode,
        request: &PredictRequest,
    ) -> Result<PredictionPayload, GatewayError> {
        self.post(Operation::Predict(mode), request).await
    }

    async fn backtest(&self, request: &BacktestRequest) -> Result<BacktestPayload, GatewayError> {
        self.post(Operation::Backtest, request).await
    }
}
