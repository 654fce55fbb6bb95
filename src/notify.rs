use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, error, warn};

use crate::error::PricewatchError;

/// Outbound message sink. Implementations never retry; a transport
/// failure surfaces as an error for the caller to log and forget.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), PricewatchError>;
}

/// Telegram Bot API sender. One POST per message; non-2xx responses are
/// logged with their body and dropped.
pub struct TelegramNotifier {
    client: Client,
    base: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(token: String, chat_id: String, base: String) -> Self {
        Self {
            client: Client::new(),
            base,
            token,
            chat_id,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), PricewatchError> {
        let url = format!("{}/bot{}/sendMessage", self.base, self.token);
        let payload = json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        let resp = self.client.post(&url).json(&payload).send().await?;
        if resp.status().is_success() {
            debug!("Telegram message sent successfully");
        } else {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            error!("Failed to send Telegram message. Status code: {}", status);
            error!("Response content: {}", body);
        }
        Ok(())
    }
}

/// Fallback sink when Telegram credentials are absent: messages land in
/// the log instead of going out.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, text: &str) -> Result<(), PricewatchError> {
        warn!("notification (telegram disabled): {}", text);
        Ok(())
    }
}

pub fn startup_message(price: f64) -> String {
    format!("🚀 Bitcoin Price Tracker started. Current price: ${:.2}", price)
}

pub fn alert_message(previous: f64, current: f64, change_pct: f64) -> String {
    format!(
        "🚨 BTC {:.2}% 1s change\nPrevious: ${:.2}\nCurrent: ${:.2}",
        change_pct, previous, current
    )
}

pub fn periodic_message(previous: f64, current: f64, change_pct: f64) -> String {
    format!(
        "🔊 BTC {:.2}% 10min change\nPrevious: ${:.2}\nCurrent: ${:.2}",
        change_pct, previous, current
    )
}
