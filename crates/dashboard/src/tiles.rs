use crate::classify::{RsiZone, Tone, scenario_tone, volatility_tone};
use crate::format::{PLACEHOLDER, format_currency, format_fixed};
use core_types::AnalysisPayload;
use rust_decimal::Decimal;
use serde::Serialize;

/// One headline number on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTile {
    pub title: &'static str,
    pub value: String,
    pub suffix: &'static str,
    pub tone: Tone,
    /// Percentage movement shown next to the value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<f64>,
}

impl MetricTile {
    fn new(title: &'static str, value: String, tone: Tone) -> Self {
        Self {
            title,
            value,
            suffix: "",
            tone,
            trend: None,
        }
    }

    /// Value and suffix as displayed. The suffix is dropped when the value is missing.
    pub fn display_value(&self) -> String {
        if self.value == PLACEHOLDER {
            self.value.clone()
        } else {
            format!("{}{}", self.value, self.suffix)
        }
    }
}

fn currency_or_placeholder(amount: Option<Decimal>) -> String {
    amount
        .map(format_currency)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// The eight analysis tiles, in display order.
pub fn metric_tiles(analysis: &AnalysisPayload) -> Vec<MetricTile> {
    let metrics = &analysis.metrics;
    let technical = &metrics.technical_metrics;
    let performance = &metrics.performance_metrics;
    let recommendation = &analysis.investment_recommendation;

    let mut price = MetricTile::new(
        "Current Price",
        format_fixed(metrics.current_price, 2),
        Tone::Neutral,
    );
    price.trend = metrics
        .momentum
        .as_ref()
        .and_then(|m| m.price_momentum)
        .map(|momentum| momentum * 100.0);

    let rsi_tone = technical
        .rsi
        .map(|rsi| RsiZone::classify(rsi).tone())
        .unwrap_or(Tone::Neutral);

    let units = recommendation
        .recommended_units
        .map(|units| units.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    let mut volatility = MetricTile::new(
        "Volatility",
        format_fixed(performance.volatility.map(|v| v * 100.0), 2),
        performance
            .volatility
            .map(volatility_tone)
            .unwrap_or(Tone::Neutral),
    );
    volatility.suffix = "%";

    let mut multiplier = MetricTile::new(
        "Position Multiplier",
        format_fixed(recommendation.allocation_multiplier, 2),
        Tone::Neutral,
    );
    multiplier.suffix = "x";

    vec![
        price,
        MetricTile::new("RSI (14)", format_fixed(technical.rsi, 1), rsi_tone),
        MetricTile::new("Recommended Units", units, Tone::Positive),
        MetricTile::new(
            "Recommended Amount",
            currency_or_placeholder(recommendation.recommended_amount),
            Tone::Neutral,
        ),
        MetricTile::new(
            "Market Scenario",
            analysis.scenario.as_str().to_uppercase(),
            scenario_tone(analysis.scenario),
        ),
        volatility,
        MetricTile::new(
            "Remaining Target",
            currency_or_placeholder(recommendation.remaining_target),
            Tone::Neutral,
        ),
        multiplier,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tile<'a>(tiles: &'a [MetricTile], title: &str) -> &'a MetricTile {
        tiles.iter().find(|t| t.title == title).unwrap()
    }

    #[test]
    fn tiles_for_a_complete_analysis() {
        let analysis: AnalysisPayload = serde_json::from_value(json!({
            "metrics": {
                "current_price": 95.1,
                "technical_metrics": { "rsi": 72.34 },
                "momentum": { "price_momentum": 0.5 },
                "performance_metrics": { "volatility": 0.1834 }
            },
            "scenario": "low",
            "investment_recommendation": {
                "recommended_units": 10, "recommended_amount": 951,
                "remaining_target": 9049, "allocation_multiplier": 1.5
            }
        }))
        .unwrap();

        let tiles = metric_tiles(&analysis);
        assert_eq!(tiles.len(), 8);
        assert_eq!(tile(&tiles, "Current Price").value, "95.10");
        assert_eq!(tile(&tiles, "Current Price").trend, Some(50.0));
        assert_eq!(tile(&tiles, "RSI (14)").value, "72.3");
        assert_eq!(tile(&tiles, "RSI (14)").tone, Tone::Negative);
        assert_eq!(tile(&tiles, "Recommended Amount").value, "$951");
        assert_eq!(tile(&tiles, "Market Scenario").value, "LOW");
        assert_eq!(tile(&tiles, "Volatility").display_value(), "18.34%");
        assert_eq!(tile(&tiles, "Volatility").tone, Tone::Positive);
        assert_eq!(tile(&tiles, "Remaining Target").value, "$9,049");
        assert_eq!(tile(&tiles, "Position Multiplier").display_value(), "1.50x");
    }

    #[test]
    fn missing_fields_render_as_placeholders() {
        let analysis: AnalysisPayload =
            serde_json::from_value(json!({ "scenario": "high" })).unwrap();
        let tiles = metric_tiles(&analysis);

        assert_eq!(tile(&tiles, "Current Price").value, PLACEHOLDER);
        assert_eq!(tile(&tiles, "Current Price").trend, None);
        assert_eq!(tile(&tiles, "Volatility").display_value(), PLACEHOLDER);
        assert_eq!(tile(&tiles, "Recommended Units").value, PLACEHOLDER);
        assert_eq!(tile(&tiles, "Market Scenario").tone, Tone::Positive);
    }
}
