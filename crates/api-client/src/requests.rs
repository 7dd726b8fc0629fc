use core_types::{Subject, TargetParameters};
use serde::Serialize;

// The service names the subject `ticker` and speaks snake_case.

/// Body of `POST {base}/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzeRequest {
    pub ticker: String,
    pub monthly_target: u64,
    pub total_target: u64,
}

impl AnalyzeRequest {
    pub fn new(subject: &Subject, targets: TargetParameters) -> Self {
        Self {
            ticker: subject.symbol.clone(),
            monthly_target: targets.monthly_target,
            total_target: targets.total_target,
        }
    }
}

/// Body of `POST {base}/predict` and `POST {base}/predict-advanced`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictRequest {
    pub ticker: String,
}

impl PredictRequest {
    pub fn new(subject: &Subject) -> Self {
        Self {
            ticker: subject.symbol.clone(),
        }
    }
}

/// Body of `POST {base}/backtest`. Absent parameters are left to the service defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BacktestRequest {
    pub ticker: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_days: Option<u32>,
}

impl BacktestRequest {
    pub fn new(subject: &Subject, train_period: Option<String>, test_days: Option<u32>) -> Self {
        Self {
            ticker: subject.symbol.clone(),
            train_period,
            test_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn analyze_body_uses_ticker_and_snake_case() {
        let request = AnalyzeRequest::new(
            &Subject::ad_hoc("VAS.AX"),
            TargetParameters::new(2000, 10000),
        );
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "ticker": "VAS.AX", "monthly_target": 2000, "total_target": 10000 })
        );
    }

    #[test]
    fn backtest_body_omits_unset_parameters() {
        let request = BacktestRequest::new(&Subject::ad_hoc("NDQ.AX"), None, Some(30));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "ticker": "NDQ.AX", "test_days": 30 })
        );
    }
}
