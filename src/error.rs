use std::time::Duration;

use thiserror::Error;

/// Error type shared by the WebSocket and REST surfaces.
///
/// Within one subscription, `Connection` and `ReadTimeout` are terminal
/// (the stream ends after yielding them) while `Decode` is per-message:
/// the read loop drops the offending message and keeps going.
#[derive(Error, Debug)]
pub enum ConnectorError {
    #[error("websocket connection error: {0}")]
    Connection(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("no frame received for {0:?}, closing connection")]
    ReadTimeout(Duration),

    #[error("message decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid subscription: {0}")]
    InvalidSubscription(String),

    #[error("HTTP request error: {0}")]
    Rest(#[from] reqwest::Error),

    #[error("exchange API error (code {code}): {message}")]
    Api { code: i64, message: String },
}

impl ConnectorError {
    /// True for errors that terminate the subscription they occurred on.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ConnectorError::Connection(_) | ConnectorError::ReadTimeout(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ConnectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_are_not_terminal() {
        let err = ConnectorError::Decode(serde_json::from_str::<i64>("x").unwrap_err());
        assert!(!err.is_terminal());
    }

    #[test]
    fn read_timeout_is_terminal() {
        let err = ConnectorError::ReadTimeout(Duration::from_secs(180));
        assert!(err.is_terminal());
        assert!(err.to_string().contains("180"));
    }
}
