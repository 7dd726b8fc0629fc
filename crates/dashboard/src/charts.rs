use core_types::{BacktestPayload, MovingAveragePoint, PredictionMode, PredictionPayload};
use serde::Serialize;

/// One named line on a chart. `values` lines up with the chart's `labels`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: &'static str,
    pub values: Vec<Option<f64>>,
}

/// A date-labelled line chart, ready for any renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Row `index` across every series.
    pub fn row(&self, index: usize) -> Vec<Option<f64>> {
        self.series
            .iter()
            .map(|s| s.values.get(index).copied().flatten())
            .collect()
    }
}

/// Price with its 20, 50 and 200 day simple moving averages.
pub fn price_chart(points: &[MovingAveragePoint]) -> ChartData {
    ChartData {
        title: "Price and Moving Averages".to_string(),
        labels: points.iter().map(|p| p.date.clone()).collect(),
        series: vec![
            Series {
                name: "Price",
                values: points.iter().map(|p| p.price).collect(),
            },
            Series {
                name: "SMA20",
                values: points.iter().map(|p| p.sma20).collect(),
            },
            Series {
                name: "SMA50",
                values: points.iter().map(|p| p.sma50).collect(),
            },
            Series {
                name: "SMA200",
                values: points.iter().map(|p| p.sma200).collect(),
            },
        ],
    }
}

/// The forecast and its confidence band, titled with the model that produced it.
pub fn forecast_chart(prediction: &PredictionPayload, mode: Option<PredictionMode>) -> ChartData {
    let forecast = &prediction.forecast;
    let title = match mode {
        Some(mode) => format!("AI Price Prediction ({})", mode.model_label()),
        None => "AI Price Prediction".to_string(),
    };
    ChartData {
        title,
        labels: forecast.iter().map(|p| p.ds.clone()).collect(),
        series: vec![
            Series {
                name: "Prediction",
                values: forecast.iter().map(|p| Some(p.yhat)).collect(),
            },
            Series {
                name: "Lower Bound",
                values: forecast.iter().map(|p| Some(p.yhat_lower)).collect(),
            },
            Series {
                name: "Upper Bound",
                values: forecast.iter().map(|p| Some(p.yhat_upper)).collect(),
            },
        ],
    }
}

/// Actual prices against what the model predicted for the same days.
pub fn backtest_chart(backtest: &BacktestPayload) -> ChartData {
    let comparison = &backtest.comparison;
    ChartData {
        title: "Backtest: Actual vs Predicted".to_string(),
        labels: comparison.iter().map(|p| p.date.clone()).collect(),
        series: vec![
            Series {
                name: "Actual",
                values: comparison.iter().map(|p| Some(p.actual_price)).collect(),
            },
            Series {
                name: "Predicted",
                values: comparison.iter().map(|p| Some(p.predicted_price)).collect(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn price_chart_keeps_gaps_in_moving_averages() {
        let points: Vec<MovingAveragePoint> = serde_json::from_value(json!([
            { "date": "2024-05-01", "price": 98.2, "SMA20": 97.0 },
            { "date": "2024-05-02", "price": 98.9, "SMA20": 97.2, "SMA50": 95.5 }
        ]))
        .unwrap();

        let chart = price_chart(&points);
        assert_eq!(chart.labels, vec!["2024-05-01", "2024-05-02"]);
        assert_eq!(chart.row(0), vec![Some(98.2), Some(97.0), None, None]);
        assert_eq!(chart.row(1)[2], Some(95.5));
    }

    #[test]
    fn forecast_title_names_the_model() {
        let prediction: PredictionPayload = serde_json::from_value(json!({
            "forecast": [{ "ds": "2024-06-01", "yhat": 100.0, "yhat_lower": 95.0, "yhat_upper": 105.0 }]
        }))
        .unwrap();

        let chart = forecast_chart(&prediction, Some(PredictionMode::Advanced));
        assert_eq!(chart.title, "AI Price Prediction (Advanced LSTM)");
        assert_eq!(chart.row(0), vec![Some(100.0), Some(95.0), Some(105.0)]);
    }

    #[test]
    fn empty_comparison_gives_an_empty_chart() {
        let backtest: BacktestPayload = serde_json::from_value(json!({
            "metrics": { "RMSE": 1.0, "MAE": 1.0, "MAPE": 1.0 }
        }))
        .unwrap();
        assert!(backtest_chart(&backtest).is_empty());
    }
}
