//! Records returned by the remote analytics service.
//!
//! The service speaks snake_case JSON; camelCase spellings are accepted as aliases.
//! Fields the dashboard reads are typed, and everything else is kept verbatim in the
//! flattened `extra` maps so nothing the service sends is lost on the way through.

use crate::enums::Scenario;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ==============================================================================
// analyze
// ==============================================================================

/// The result of a market analysis run for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPayload {
    #[serde(default)]
    pub metrics: MarketMetrics,
    pub scenario: Scenario,
    #[serde(default, alias = "investmentRecommendation")]
    pub investment_recommendation: InvestmentRecommendation,
    #[serde(default, alias = "movingAveragesData")]
    pub moving_averages_data: Vec<MovingAveragePoint>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketMetrics {
    #[serde(alias = "currentPrice")]
    pub current_price: Option<f64>,
    #[serde(alias = "technicalMetrics")]
    pub technical_metrics: TechnicalMetrics,
    pub momentum: Option<Momentum>,
    #[serde(alias = "performanceMetrics")]
    pub performance_metrics: PerformanceMetrics,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalMetrics {
    pub rsi: Option<f64>,
    #[serde(alias = "stochRsi")]
    pub stoch_rsi: Option<f64>,
    pub roc: Option<f64>,
    #[serde(alias = "sma20")]
    pub sma_20: Option<f64>,
    #[serde(alias = "sma50")]
    pub sma_50: Option<f64>,
    #[serde(alias = "sma200")]
    pub sma_200: Option<f64>,
    #[serde(alias = "ema100")]
    pub ema_100: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Momentum {
    #[serde(alias = "priceMomentum")]
    pub price_momentum: Option<f64>,
    #[serde(alias = "volumeMomentum")]
    pub volume_momentum: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceMetrics {
    /// Annualised volatility as a fraction (0.2 == 20%).
    pub volatility: Option<f64>,
    #[serde(alias = "sharpeRatio")]
    pub sharpe_ratio: Option<f64>,
    /// Trend regime in [-1, 1]; positive is bullish.
    #[serde(alias = "marketRegime")]
    pub market_regime: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The value-cost-averaging recommendation computed by the service for the targets sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestmentRecommendation {
    #[serde(alias = "recommendedAmount")]
    pub recommended_amount: Option<Decimal>,
    #[serde(alias = "recommendedUnits")]
    pub recommended_units: Option<u64>,
    #[serde(alias = "remainingTarget")]
    pub remaining_target: Option<Decimal>,
    #[serde(alias = "allocationMultiplier")]
    pub allocation_multiplier: Option<f64>,
    #[serde(alias = "totalInvested")]
    pub total_invested: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One day of the price / moving-average chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovingAveragePoint {
    pub date: String,
    pub price: Option<f64>,
    #[serde(rename = "SMA20")]
    pub sma20: Option<f64>,
    #[serde(rename = "SMA50")]
    pub sma50: Option<f64>,
    #[serde(rename = "SMA200")]
    pub sma200: Option<f64>,
    #[serde(rename = "EMA100")]
    pub ema100: Option<f64>,
}

// ==============================================================================
// predict / predict-advanced
// ==============================================================================

/// A price forecast for the coming days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionPayload {
    pub forecast: Vec<ForecastPoint>,
    /// Service-side narrative summary, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PredictionPayload {
    /// The forecast for the furthest date, if any.
    pub fn final_point(&self) -> Option<&ForecastPoint> {
        self.forecast.last()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub ds: String,
    pub yhat: f64,
    #[serde(alias = "yhatLower")]
    pub yhat_lower: f64,
    #[serde(alias = "yhatUpper")]
    pub yhat_upper: f64,
}

// ==============================================================================
// backtest
// ==============================================================================

/// How the forecasting model fared against recent actual prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestPayload {
    pub metrics: BacktestMetrics,
    #[serde(default, alias = "comparison_df")]
    pub comparison: Vec<ComparisonPoint>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestMetrics {
    #[serde(rename = "RMSE")]
    pub rmse: f64,
    #[serde(rename = "MAE")]
    pub mae: f64,
    /// Mean absolute percentage error, already in percent.
    #[serde(rename = "MAPE")]
    pub mape: f64,
    #[serde(rename = "MSE", default, skip_serializing_if = "Option::is_none")]
    pub mse: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPoint {
    pub date: String,
    #[serde(alias = "actualPrice")]
    pub actual_price: f64,
    #[serde(alias = "predictedPrice")]
    pub predicted_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn analysis_accepts_camel_case_and_missing_sections() {
        let payload: AnalysisPayload = serde_json::from_value(json!({
            "metrics": { "currentPrice": 95.10, "technicalMetrics": { "rsi": 55 } },
            "scenario": "high",
            "investmentRecommendation": { "recommendedUnits": 10, "recommendedAmount": 951 }
        }))
        .unwrap();

        assert_eq!(payload.scenario, Scenario::High);
        assert_eq!(payload.metrics.current_price, Some(95.10));
        assert_eq!(payload.metrics.technical_metrics.rsi, Some(55.0));
        assert_eq!(payload.investment_recommendation.recommended_units, Some(10));
        assert_eq!(payload.investment_recommendation.recommended_amount, Some(dec!(951)));
        assert!(payload.moving_averages_data.is_empty());
    }

    #[test]
    fn analysis_keeps_unknown_fields() {
        let payload: AnalysisPayload = serde_json::from_value(json!({
            "scenario": "low",
            "report_id": "abc",
            "metrics": { "current_price": 10.0, "beta": 1.3 }
        }))
        .unwrap();

        assert_eq!(payload.extra.get("report_id"), Some(&json!("abc")));
        assert_eq!(payload.metrics.extra.get("beta"), Some(&json!(1.3)));
    }

    #[test]
    fn analysis_without_scenario_is_rejected() {
        let result = serde_json::from_value::<AnalysisPayload>(json!({ "metrics": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn moving_average_rows_use_upper_case_keys() {
        let row: MovingAveragePoint = serde_json::from_value(json!({
            "date": "2024-05-01", "price": 98.2, "SMA20": 97.0, "SMA50": 95.5, "SMA200": 90.1
        }))
        .unwrap();
        assert_eq!(row.sma50, Some(95.5));
        assert_eq!(row.ema100, None);
    }

    #[test]
    fn backtest_accepts_legacy_comparison_key() {
        let payload: BacktestPayload = serde_json::from_value(json!({
            "metrics": { "RMSE": 1.2, "MAE": 0.9, "MAPE": 1.1, "MSE": 1.44 },
            "comparison_df": [
                { "date": "2024-05-01", "actual_price": 98.0, "predicted_price": 97.4 }
            ]
        }))
        .unwrap();
        assert_eq!(payload.comparison.len(), 1);
        assert_eq!(payload.metrics.mse, Some(1.44));
    }

    #[test]
    fn forecast_final_point_is_the_last_day() {
        let payload: PredictionPayload = serde_json::from_value(json!({
            "forecast": [
                { "ds": "2024-06-01", "yhat": 100.0, "yhat_lower": 95.0, "yhat_upper": 105.0 },
                { "ds": "2024-06-02", "yhat": 101.5, "yhatLower": 96.0, "yhatUpper": 107.0 }
            ]
        }))
        .unwrap();
        assert_eq!(payload.final_point().map(|p| p.yhat), Some(101.5));
        assert!(payload.summary.is_none());
    }
}
