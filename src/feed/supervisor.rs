use futures_util::{SinkExt, StreamExt};
use tokio::time::{sleep, Duration};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{error, info, warn};
use url::Url;

use crate::config::now_ms;
use crate::error::PricewatchError;
use crate::processor::TickProcessor;

/// Owns the stream lifecycle: dial, pump messages into the processor,
/// and reconnect forever with a fixed pause between attempts. The
/// processor survives reconnects, so its state machine does not reset.
pub struct ConnectionSupervisor {
    url: Url,
    backoff: Duration,
    processor: TickProcessor,
}

impl ConnectionSupervisor {
    pub fn new(url: &str, backoff_secs: u64, processor: TickProcessor) -> Result<Self, PricewatchError> {
        Ok(Self {
            url: Url::parse(url)?,
            backoff: Duration::from_secs(backoff_secs),
            processor,
        })
    }

    /// One connection lifetime: returns when the stream closes cleanly,
    /// ends, or fails.
    pub async fn run(&mut self) -> Result<(), PricewatchError> {
        info!("Connecting to {}...", self.url);
        let (ws, _) = connect_async(self.url.as_str()).await?;
        info!("WebSocket connection opened");
        let (mut write, mut read) = ws.split();

        while let Some(msg) = read.next().await {
            match msg {
                Ok(Message::Text(text)) => self.processor.on_message(&text, now_ms()).await,
                Ok(Message::Ping(payload)) => {
                    // The feed drops clients that never answer pings.
                    if let Err(e) = write.send(Message::Pong(payload)).await {
                        error!("WebSocket error: {}", e);
                        return Err(e.into());
                    }
                }
                Ok(Message::Close(frame)) => {
                    match frame {
                        Some(f) => warn!(
                            "WebSocket connection closed. Status code: {}, Message: {}",
                            f.code, f.reason
                        ),
                        None => warn!("WebSocket connection closed."),
                    }
                    return Ok(());
                }
                Ok(_) => {}
                Err(e) => {
                    error!("WebSocket error: {}", e);
                    return Err(e.into());
                }
            }
        }

        warn!("WebSocket stream ended");
        Ok(())
    }

    /// Reconnect-forever loop. Errors and clean closes both wait the
    /// fixed backoff before the next attempt; there is no retry cap.
    pub async fn supervise(&mut self) {
        loop {
            if let Err(e) = self.run().await {
                error!("An error occurred in the main loop: {}", e);
            }
            info!("Attempting to reconnect in {} seconds...", self.backoff.as_secs());
            sleep(self.backoff).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::notify::LogNotifier;

    fn test_config() -> Config {
        Config {
            feed_url: "wss://example.invalid/ws".to_string(),
            price_change_threshold: 0.001,
            sample_interval_secs: 1,
            periodic_interval_secs: 600,
            reconnect_backoff_secs: 60,
            telegram_bot_token: None,
            telegram_chat_id: None,
            telegram_api_base: "https://api.telegram.org".to_string(),
        }
    }

    #[test]
    fn test_rejects_invalid_url() {
        let cfg = test_config();
        let processor = TickProcessor::new(cfg, Box::new(LogNotifier), 0);
        let result = ConnectionSupervisor::new("not a url", 60, processor);
        assert!(matches!(result, Err(PricewatchError::Endpoint(_))));
    }

    #[test]
    fn test_accepts_ws_url() {
        let cfg = test_config();
        let processor = TickProcessor::new(cfg, Box::new(LogNotifier), 0);
        assert!(ConnectionSupervisor::new("wss://stream.binance.com:9443/ws/btcusdt@trade", 60, processor).is_ok());
    }
}
