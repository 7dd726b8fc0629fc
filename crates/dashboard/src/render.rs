//! Terminal rendering with `comfy-table`. Everything here is a pure function of its input.

use crate::charts::{ChartData, backtest_chart, forecast_chart, price_chart};
use crate::classify::{Tone, trend_tone};
use crate::format::{format_change, format_fixed};
use crate::status::{StageState, StatusPanel, status_panel};
use crate::summary::{Signal, TradingSummary};
use crate::tiles::{MetricTile, metric_tiles};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use core_types::Subject;
use events::{SessionState, Slot};

/// Chart tables show at most this many of the most recent rows.
pub const CHART_TAIL_ROWS: usize = 10;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Positive => Color::Green,
        Tone::Negative => Color::Red,
        Tone::Neutral => Color::Reset,
    }
}

fn header(titles: &[&str]) -> Vec<Cell> {
    titles
        .iter()
        .map(|title| Cell::new(title).add_attribute(Attribute::Bold))
        .collect()
}

pub fn render_catalog(subjects: &[Subject]) -> Table {
    let mut table = new_table();
    table.set_header(header(&["Symbol", "Name", "Description"]));
    for subject in subjects {
        table.add_row(vec![
            Cell::new(&subject.symbol).add_attribute(Attribute::Bold),
            Cell::new(&subject.label),
            Cell::new(&subject.description),
        ]);
    }
    table
}

pub fn render_tiles(tiles: &[MetricTile]) -> Table {
    let mut table = new_table();
    table.set_header(header(&["Metric", "Value", "Trend"]));
    for tile in tiles {
        let trend = match tile.trend {
            Some(change) => {
                Cell::new(format_change(change)).fg(tone_color(trend_tone(change)))
            }
            None => Cell::new(""),
        };
        table.add_row(vec![
            Cell::new(tile.title),
            Cell::new(tile.display_value()).fg(tone_color(tile.tone)),
            trend,
        ]);
    }
    table
}

pub fn render_status(panel: &StatusPanel) -> Table {
    let mut table = new_table();
    table.set_header(header(&["Stage", panel.subject.as_str()]));
    for stage in &panel.stages {
        let color = match stage.state {
            StageState::Complete => Color::Green,
            StageState::Loading => Color::Yellow,
            StageState::Failed(_) => Color::Red,
            StageState::NotStarted => Color::Reset,
        };
        let label = match (stage.slot, panel.model) {
            (Slot::Prediction, Some(model)) => format!("{} ({})", stage.state.label(), model),
            _ => stage.state.label(),
        };
        table.add_row(vec![Cell::new(stage.title), Cell::new(label).fg(color)]);
    }
    table
}

pub fn render_summary(summary: &TradingSummary) -> Table {
    let signal_color = match summary.signal {
        Signal::Buy => Color::Green,
        Signal::Sell => Color::Red,
        Signal::Hold => Color::Yellow,
    };

    let mut table = new_table();
    table.set_header(header(&["Trading Summary", ""]));
    table.add_row(vec![
        Cell::new("Signal"),
        Cell::new(format!("{} ({} confidence)", summary.signal, summary.confidence))
            .fg(signal_color)
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Current / Predicted"),
        Cell::new(format!(
            "{:.2} / {:.2} ({})",
            summary.current_price,
            summary.predicted_price,
            format_change(summary.price_change_percent)
        )),
    ]);
    table.add_row(vec![
        Cell::new("Forecast Confidence"),
        Cell::new(summary.forecast_confidence.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Trend"),
        Cell::new(format!("{} ({})", summary.trend, summary.trend_strength)),
    ]);
    table.add_row(vec![
        Cell::new("RSI"),
        Cell::new(format!("{:.1} ({})", summary.rsi, summary.rsi_zone.as_str()))
            .fg(tone_color(summary.rsi_zone.tone())),
    ]);
    table.add_row(vec![
        Cell::new("Risk"),
        Cell::new(format!(
            "{} (volatility {:.2}%)",
            summary.risk_level, summary.volatility
        )),
    ]);
    table.add_row(vec![
        Cell::new("Position Sizing"),
        Cell::new(format!("{}x", format_fixed(summary.position_sizing, 2))),
    ]);
    if let Some(metrics) = &summary.model_performance {
        table.add_row(vec![
            Cell::new("Model Error"),
            Cell::new(format!(
                "RMSE {:.3} / MAE {:.3} / MAPE {:.2}%",
                metrics.rmse, metrics.mae, metrics.mape
            )),
        ]);
    }
    table
}

/// The last `max_rows` rows of a chart as a table.
pub fn render_chart(chart: &ChartData, max_rows: usize) -> Table {
    let mut titles = vec!["Date"];
    titles.extend(chart.series.iter().map(|s| s.name));

    let mut table = new_table();
    table.set_header(header(&titles));
    let start = chart.labels.len().saturating_sub(max_rows);
    for (index, label) in chart.labels.iter().enumerate().skip(start) {
        let mut row = vec![Cell::new(label)];
        row.extend(
            chart
                .row(index)
                .into_iter()
                .map(|value| Cell::new(format_fixed(value, 2))),
        );
        table.add_row(row);
    }
    table
}

fn section(out: &mut String, title: &str, body: impl std::fmt::Display) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&body.to_string());
    out.push_str("\n\n");
}

/// Every panel the snapshot has data for, top to bottom.
pub fn render_dashboard(state: &SessionState) -> String {
    let mut out = String::new();
    section(&mut out, "Status", render_status(&status_panel(state)));

    if let Some(analysis) = state.analysis.success() {
        section(&mut out, "Market Metrics", render_tiles(&metric_tiles(analysis)));
        let chart = price_chart(&analysis.moving_averages_data);
        if !chart.is_empty() {
            section(&mut out, &chart.title, render_chart(&chart, CHART_TAIL_ROWS));
        }
    }

    if let Some(prediction) = state.prediction.success() {
        let chart = forecast_chart(prediction, state.prediction_mode);
        if !chart.is_empty() {
            section(&mut out, &chart.title, render_chart(&chart, CHART_TAIL_ROWS));
        }
    }

    if let Some(backtest) = state.backtest.success() {
        let chart = backtest_chart(backtest);
        if !chart.is_empty() {
            section(&mut out, &chart.title, render_chart(&chart, CHART_TAIL_ROWS));
        }
    }

    if let Some(summary) = TradingSummary::from_state(state) {
        section(&mut out, "Summary", render_summary(&summary));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::TargetParameters;
    use events::OperationResult;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn catalog_table_lists_every_subject() {
        let subjects = vec![
            Subject::new("VAS.AX", "VAS - Vanguard Australian Shares", "ASX 300"),
            Subject::new("NDQ.AX", "NDQ - BetaShares NASDAQ 100", "NASDAQ 100"),
        ];
        let rendered = render_catalog(&subjects).to_string();
        assert!(rendered.contains("VAS.AX"));
        assert!(rendered.contains("NDQ - BetaShares NASDAQ 100"));
    }

    #[test]
    fn chart_table_keeps_only_the_tail() {
        let chart = ChartData {
            title: "t".to_string(),
            labels: (1..=12).map(|d| format!("2024-06-{:02}", d)).collect(),
            series: vec![crate::charts::Series {
                name: "Prediction",
                values: (1..=12).map(|d| Some(d as f64)).collect(),
            }],
        };
        let rendered = render_chart(&chart, 3).to_string();
        assert!(rendered.contains("2024-06-12"));
        assert!(rendered.contains("2024-06-10"));
        assert!(!rendered.contains("2024-06-09"));
    }

    #[test]
    fn dashboard_shows_only_available_panels() {
        let mut state =
            SessionState::new(Subject::ad_hoc("VAS.AX"), TargetParameters::new(2000, 10000));
        let idle = render_dashboard(&state);
        assert!(idle.contains("Not started"));
        assert!(!idle.contains("Market Metrics"));

        state.analysis = OperationResult::Success(Arc::new(
            serde_json::from_value(json!({
                "metrics": { "current_price": 95.1, "technical_metrics": { "rsi": 65 } },
                "scenario": "high"
            }))
            .unwrap(),
        ));
        let rendered = render_dashboard(&state);
        assert!(rendered.contains("Market Metrics"));
        assert!(rendered.contains("HIGH"));
        assert!(!rendered.contains("Summary"));
    }
}
