use thiserror::Error;

/// Failure taxonomy at the feed and delivery boundaries. Parse and price
/// errors are per-message and never fatal; transport errors end the
/// current connection and hand control back to the supervisor.
#[derive(Debug, Error)]
pub enum PricewatchError {
    #[error("malformed tick payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid price in tick payload: {0}")]
    Price(#[from] std::num::ParseFloatError),

    #[error("invalid feed url: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("websocket transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("notification delivery failed: {0}")]
    Delivery(#[from] reqwest::Error),
}
