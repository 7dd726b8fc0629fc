use core_types::Scenario;
use serde::Serialize;

/// RSI above this is overbought.
pub const RSI_OVERBOUGHT: f64 = 70.0;
/// RSI below this is oversold.
pub const RSI_OVERSOLD: f64 = 30.0;
/// Annualised volatility above this is flagged.
pub const HIGH_VOLATILITY: f64 = 0.2;

/// How a value should be colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RsiZone {
    Overbought,
    Oversold,
    Neutral,
}

impl RsiZone {
    /// Both thresholds are exclusive: 70 and 30 themselves are neutral.
    pub fn classify(rsi: f64) -> Self {
        if rsi > RSI_OVERBOUGHT {
            RsiZone::Overbought
        } else if rsi < RSI_OVERSOLD {
            RsiZone::Oversold
        } else {
            RsiZone::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RsiZone::Overbought => "Overbought",
            RsiZone::Oversold => "Oversold",
            RsiZone::Neutral => "Normal",
        }
    }

    /// Overbought reads as a warning, oversold as an opportunity.
    pub fn tone(&self) -> Tone {
        match self {
            RsiZone::Overbought => Tone::Negative,
            RsiZone::Oversold => Tone::Positive,
            RsiZone::Neutral => Tone::Neutral,
        }
    }
}

pub fn scenario_tone(scenario: Scenario) -> Tone {
    match scenario {
        Scenario::High => Tone::Positive,
        Scenario::Low => Tone::Negative,
    }
}

pub fn volatility_tone(volatility: f64) -> Tone {
    if volatility > HIGH_VOLATILITY {
        Tone::Negative
    } else {
        Tone::Positive
    }
}

/// Green for non-negative movement, red otherwise.
pub fn trend_tone(change: f64) -> Tone {
    if change >= 0.0 {
        Tone::Positive
    } else {
        Tone::Negative
    }
}
