//! The combined trading summary shown once analysis and prediction have both succeeded.
//!
//! Every input number comes from the service; the rules below only bucket them.

use crate::classify::RsiZone;
use core_types::{AnalysisPayload, BacktestMetrics, BacktestPayload, PredictionPayload};
use events::SessionState;
use serde::Serialize;
use std::fmt;

/// Expected move (in percent) beyond which a BUY or SELL is signalled.
pub const SIGNAL_THRESHOLD_PCT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Bullish,
    Bearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Strength {
    Strong,
    Moderate,
    Weak,
}

/// A three-step scale used for risk and confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Level {
    High,
    Moderate,
    Low,
}

macro_rules! display_as_debug {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        })*
    };
}

display_as_debug!(Direction, Strength, Level);

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradingSummary {
    pub current_price: f64,
    pub predicted_price: f64,
    pub price_change_percent: f64,
    pub forecast_confidence: Level,
    pub trend: Direction,
    pub trend_strength: Strength,
    pub rsi: f64,
    pub rsi_zone: RsiZone,
    /// In percent.
    pub volatility: f64,
    pub market_regime: f64,
    pub risk_level: Level,
    pub signal: Signal,
    pub confidence: Level,
    pub position_sizing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_performance: Option<BacktestMetrics>,
}

impl TradingSummary {
    /// Combines the three payloads. Returns `None` when a number the rules need is
    /// missing, the forecast is empty, or the current price is zero.
    pub fn generate(
        analysis: &AnalysisPayload,
        prediction: &PredictionPayload,
        backtest: Option<&BacktestPayload>,
    ) -> Option<Self> {
        let metrics = &analysis.metrics;
        let current_price = metrics.current_price.filter(|p| *p != 0.0)?;
        let rsi = metrics.technical_metrics.rsi?;
        let volatility = metrics.performance_metrics.volatility?;
        let market_regime = metrics.performance_metrics.market_regime?;
        let predicted_price = prediction.final_point()?.yhat;

        let price_change_percent = (predicted_price - current_price) / current_price * 100.0;
        let rsi_zone = RsiZone::classify(rsi);

        let signal = if price_change_percent > SIGNAL_THRESHOLD_PCT
            && rsi_zone != RsiZone::Overbought
        {
            Signal::Buy
        } else if price_change_percent < -SIGNAL_THRESHOLD_PCT && rsi_zone != RsiZone::Oversold {
            Signal::Sell
        } else {
            Signal::Hold
        };

        let trend_strength = match market_regime.abs() {
            r if r > 0.7 => Strength::Strong,
            r if r > 0.3 => Strength::Moderate,
            _ => Strength::Weak,
        };

        let risk_level = match volatility {
            v if v > 0.25 => Level::High,
            v if v > 0.15 => Level::Moderate,
            _ => Level::Low,
        };

        let forecast_confidence = match volatility {
            v if v < 0.2 => Level::High,
            v if v < 0.3 => Level::Moderate,
            _ => Level::Low,
        };

        let confidence = if price_change_percent.abs() > 10.0 && market_regime.abs() > 0.5 {
            Level::High
        } else {
            Level::Moderate
        };

        Some(Self {
            current_price,
            predicted_price,
            price_change_percent,
            forecast_confidence,
            trend: if market_regime > 0.0 {
                Direction::Bullish
            } else {
                Direction::Bearish
            },
            trend_strength,
            rsi,
            rsi_zone,
            volatility: volatility * 100.0,
            market_regime,
            risk_level,
            signal,
            confidence,
            position_sizing: analysis.investment_recommendation.allocation_multiplier,
            model_performance: backtest.map(|b| b.metrics.clone()),
        })
    }

    /// The summary for a snapshot, if analysis and prediction have both succeeded.
    pub fn from_state(state: &SessionState) -> Option<Self> {
        Self::generate(
            state.analysis.success()?,
            state.prediction.success()?,
            state.backtest.success(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn analysis(rsi: f64, volatility: f64, regime: f64) -> AnalysisPayload {
        serde_json::from_value(json!({
            "metrics": {
                "current_price": 100.0,
                "technical_metrics": { "rsi": rsi },
                "performance_metrics": { "volatility": volatility, "market_regime": regime }
            },
            "scenario": "high",
            "investment_recommendation": { "allocation_multiplier": 1.2 }
        }))
        .unwrap()
    }

    fn prediction(final_price: f64) -> PredictionPayload {
        serde_json::from_value(json!({
            "forecast": [
                { "ds": "2024-06-01", "yhat": 100.0, "yhat_lower": 98.0, "yhat_upper": 102.0 },
                { "ds": "2024-06-30", "yhat": final_price, "yhat_lower": final_price - 4.0, "yhat_upper": final_price + 4.0 }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn strong_upside_is_a_buy() {
        let summary = TradingSummary::generate(&analysis(55.0, 0.1, 0.8), &prediction(112.0), None)
            .unwrap();
        assert_eq!(summary.signal, Signal::Buy);
        assert_eq!(summary.trend, Direction::Bullish);
        assert_eq!(summary.trend_strength, Strength::Strong);
        assert_eq!(summary.risk_level, Level::Low);
        assert_eq!(summary.forecast_confidence, Level::High);
        assert_eq!(summary.confidence, Level::High);
        assert_eq!(summary.position_sizing, Some(1.2));
        assert!(summary.model_performance.is_none());
    }

    #[test]
    fn overbought_blocks_a_buy() {
        let summary =
            TradingSummary::generate(&analysis(75.0, 0.1, 0.4), &prediction(110.0), None).unwrap();
        assert_eq!(summary.rsi_zone, RsiZone::Overbought);
        assert_eq!(summary.signal, Signal::Hold);
        assert_eq!(summary.trend_strength, Strength::Moderate);
    }

    #[test]
    fn downside_is_a_sell_unless_oversold() {
        let sell =
            TradingSummary::generate(&analysis(45.0, 0.3, -0.2), &prediction(90.0), None).unwrap();
        assert_eq!(sell.signal, Signal::Sell);
        assert_eq!(sell.trend, Direction::Bearish);
        assert_eq!(sell.trend_strength, Strength::Weak);
        assert_eq!(sell.risk_level, Level::High);
        assert_eq!(sell.forecast_confidence, Level::Low);
        assert_eq!(sell.confidence, Level::Moderate);

        let oversold =
            TradingSummary::generate(&analysis(25.0, 0.2, -0.2), &prediction(90.0), None).unwrap();
        assert_eq!(oversold.signal, Signal::Hold);
        assert_eq!(oversold.risk_level, Level::Moderate);
        assert_eq!(oversold.forecast_confidence, Level::Moderate);
    }

    #[test]
    fn backtest_metrics_are_attached_when_present() {
        let backtest: BacktestPayload = serde_json::from_value(json!({
            "metrics": { "RMSE": 1.42, "MAE": 1.05, "MAPE": 1.11 }
        }))
        .unwrap();
        let summary = TradingSummary::generate(
            &analysis(50.0, 0.1, 0.1),
            &prediction(101.0),
            Some(&backtest),
        )
        .unwrap();
        assert_eq!(summary.model_performance.map(|m| m.rmse), Some(1.42));
        assert_eq!(summary.signal, Signal::Hold);
    }

    #[test]
    fn incomplete_inputs_give_no_summary() {
        let bare: AnalysisPayload = serde_json::from_value(json!({ "scenario": "low" })).unwrap();
        assert!(TradingSummary::generate(&bare, &prediction(110.0), None).is_none());

        let empty: PredictionPayload = serde_json::from_value(json!({ "forecast": [] })).unwrap();
        assert!(TradingSummary::generate(&analysis(50.0, 0.1, 0.1), &empty, None).is_none());
    }
}
