//! # Quantdash Dashboard
//!
//! The presentation layer: turns a `SessionState` snapshot into metric tiles, chart
//! series, a status panel and a trading summary, and renders them as terminal tables.
//!
//! ## Architectural Principles
//!
//! - **Layer 3, read-only:** takes snapshots by shared reference and never calls the
//!   gateway or mutates the session. There is nothing here that can fail.
//! - **No computation:** every number comes from the service. This crate formats,
//!   classifies into buckets, and lays out.
//!
//! ## Public API
//!
//! - `metric_tiles`, `MetricTile`: the eight headline numbers.
//! - `RsiZone`, `Tone`: threshold classifications and their colors.
//! - `price_chart`, `forecast_chart`, `backtest_chart`: series for the three charts.
//! - `status_panel`: per-stage progress and errors.
//! - `TradingSummary`: the combined signal once analysis and prediction have succeeded.
//! - `DashboardView`: all of the above for one snapshot, serializable.
//! - `render_*`: `comfy-table` rendering.

// Declare the modules that constitute this crate.
pub mod charts;
pub mod classify;
pub mod format;
pub mod render;
pub mod status;
pub mod summary;
pub mod tiles;

// Re-export the key components to create a clean, public-facing API.
pub use charts::{ChartData, Series, backtest_chart, forecast_chart, price_chart};
pub use classify::{RsiZone, Tone};
pub use format::{PLACEHOLDER, format_currency};
pub use render::{render_catalog, render_chart, render_dashboard, render_status, render_summary, render_tiles};
pub use status::{StageState, StatusPanel, status_panel};
pub use summary::{Signal, TradingSummary};
pub use tiles::{MetricTile, metric_tiles};

use events::SessionState;
use serde::Serialize;

/// Everything derived from one snapshot, for machine-readable output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub status: StatusPanel,
    pub tiles: Vec<MetricTile>,
    pub charts: Vec<ChartData>,
    pub summary: Option<TradingSummary>,
}

impl DashboardView {
    pub fn from_state(state: &SessionState) -> Self {
        let mut charts = Vec::new();
        let tiles = match state.analysis.success() {
            Some(analysis) => {
                charts.push(price_chart(&analysis.moving_averages_data));
                metric_tiles(analysis)
            }
            None => Vec::new(),
        };
        if let Some(prediction) = state.prediction.success() {
            charts.push(forecast_chart(prediction, state.prediction_mode));
        }
        if let Some(backtest) = state.backtest.success() {
            charts.push(backtest_chart(backtest));
        }

        Self {
            status: status_panel(state),
            tiles,
            charts,
            summary: TradingSummary::from_state(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{Subject, TargetParameters};
    use events::OperationResult;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn rsi_65_high_scenario_is_not_overbought() {
        let mut state =
            SessionState::new(Subject::ad_hoc("VAS.AX"), TargetParameters::new(2000, 10000));
        state.analysis = OperationResult::Success(Arc::new(
            serde_json::from_value(json!({
                "metrics": { "technical_metrics": { "rsi": 65 } },
                "scenario": "high"
            }))
            .unwrap(),
        ));

        let view = DashboardView::from_state(&state);
        let rsi = view.tiles.iter().find(|t| t.title == "RSI (14)").unwrap();
        assert_eq!(rsi.tone, Tone::Neutral);
        assert_eq!(RsiZone::classify(65.0), RsiZone::Neutral);
        assert_eq!(
            state.analysis.success().unwrap().scenario,
            core_types::Scenario::High
        );
        assert!(view.summary.is_none());
    }
}
