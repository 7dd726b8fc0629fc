use thiserror::Error;

/// A normalized failure from one remote operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The request never got a usable answer: connection refused, reset, timed out.
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered but reported a failure of its own.
    #[error("{0}")]
    Service(String),

    /// The service answered successfully but the body did not have the expected shape.
    #[error("Failed to decode the service response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}
