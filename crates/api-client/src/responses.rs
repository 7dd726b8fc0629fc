use crate::error::GatewayError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Turns a raw service reply into a payload or a normalized failure.
///
/// A non-empty `error` string in the body always wins, whatever the status. Otherwise a
/// non-success status fails with `fallback`, and a success status must decode into `T`.
pub fn interpret_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
    fallback: &str,
) -> Result<T, GatewayError> {
    let value = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(_) if !status.is_success() => return Err(GatewayError::Service(fallback.to_string())),
        Err(e) => return Err(GatewayError::Decode(e.to_string())),
    };

    if let Some(message) = service_error(&value) {
        return Err(GatewayError::Service(message.to_string()));
    }
    if !status.is_success() {
        return Err(GatewayError::Service(fallback.to_string()));
    }

    serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))
}

fn service_error(value: &Value) -> Option<&str> {
    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{BacktestPayload, PredictionPayload};

    const FALLBACK: &str = "Failed to fetch backtest results";

    #[test]
    fn error_field_wins_even_on_success_status() {
        let result = interpret_response::<BacktestPayload>(
            StatusCode::OK,
            r#"{"error": "No data found for ticker"}"#,
            FALLBACK,
        );
        assert_eq!(
            result,
            Err(GatewayError::Service("No data found for ticker".to_string()))
        );
    }

    #[test]
    fn error_status_without_message_uses_fallback() {
        let result = interpret_response::<BacktestPayload>(
            StatusCode::INTERNAL_SERVER_ERROR,
            "<html>Internal Server Error</html>",
            FALLBACK,
        );
        assert_eq!(result, Err(GatewayError::Service(FALLBACK.to_string())));

        let empty = interpret_response::<BacktestPayload>(
            StatusCode::BAD_GATEWAY,
            r#"{"error": ""}"#,
            FALLBACK,
        );
        assert_eq!(empty, Err(GatewayError::Service(FALLBACK.to_string())));
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let missing_forecast =
            interpret_response::<PredictionPayload>(StatusCode::OK, r#"{"summary": {}}"#, "x");
        assert!(matches!(missing_forecast, Err(GatewayError::Decode(_))));

        let not_json = interpret_response::<PredictionPayload>(StatusCode::OK, "ok", "x");
        assert!(matches!(not_json, Err(GatewayError::Decode(_))));
    }

    #[test]
    fn success_body_decodes() {
        let payload = interpret_response::<BacktestPayload>(
            StatusCode::OK,
            r#"{"metrics": {"RMSE": 1.5, "MAE": 1.1, "MAPE": 1.3}, "comparison": []}"#,
            FALLBACK,
        )
        .unwrap();
        assert_eq!(payload.metrics.rmse, 1.5);
    }
}
