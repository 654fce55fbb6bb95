use serde::Deserialize;

use crate::error::PricewatchError;

pub mod supervisor;

/// One trade event from the stream. Only the price is required; the
/// remaining fields are carried for diagnostics when present.
#[derive(Debug, Deserialize)]
pub struct TradeTick {
    #[serde(rename = "p")]
    pub price: String,
    #[serde(rename = "s", default)]
    pub symbol: Option<String>,
    #[serde(rename = "T", default)]
    pub trade_time_ms: Option<u64>,
}

/// Extract the price from a raw feed message.
pub fn parse_tick(raw: &str) -> Result<f64, PricewatchError> {
    let tick: TradeTick = serde_json::from_str(raw)?;
    Ok(tick.price.parse::<f64>()?)
}
