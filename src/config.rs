#[derive(Clone)]
pub struct Config {
    pub feed_url: String,
    /// Alert threshold as a fraction (0.001 = 0.1%).
    pub price_change_threshold: f64,
    pub sample_interval_secs: u64,
    pub periodic_interval_secs: u64,
    pub reconnect_backoff_secs: u64,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub telegram_api_base: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            feed_url: std::env::var("PRICE_FEED_URL").unwrap_or_else(|_| "wss://stream.binance.com:9443/ws/btcusdt@trade".to_string()),
            price_change_threshold: std::env::var("PRICE_CHANGE_THRESHOLD").ok().and_then(|v| v.parse().ok()).unwrap_or(0.001),
            sample_interval_secs: std::env::var("SAMPLE_INTERVAL_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(1),
            periodic_interval_secs: std::env::var("PERIODIC_UPDATE_INTERVAL_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(600),
            reconnect_backoff_secs: std::env::var("RECONNECT_BACKOFF_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(60),
            telegram_bot_token: std::env::var("TELEGRAM_BOT_TOKEN").ok(),
            telegram_chat_id: std::env::var("TELEGRAM_CHAT_ID").ok(),
            telegram_api_base: std::env::var("TELEGRAM_API_BASE").unwrap_or_else(|_| "https://api.telegram.org".to_string()),
        }
    }

    /// Window capacity sized so that one sample per second spans the
    /// periodic interval.
    pub fn window_capacity(&self) -> usize {
        self.periodic_interval_secs.max(1) as usize
    }
}

pub fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}
