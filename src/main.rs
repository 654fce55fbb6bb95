use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pricewatch::config::{now_ms, Config};
use pricewatch::feed::supervisor::ConnectionSupervisor;
use pricewatch::notify::{LogNotifier, Notifier, TelegramNotifier};
use pricewatch::processor::TickProcessor;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = Config::from_env();
    info!("Price tracker starting");

    // Deliver through Telegram when both credentials are present,
    // otherwise fall back to the log-only sink.
    let notifier: Box<dyn Notifier> = match (&cfg.telegram_bot_token, &cfg.telegram_chat_id) {
        (Some(token), Some(chat_id)) => Box::new(TelegramNotifier::new(
            token.clone(),
            chat_id.clone(),
            cfg.telegram_api_base.clone(),
        )),
        _ => {
            warn!("TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID not set, logging notifications instead");
            Box::new(LogNotifier)
        }
    };

    let processor = TickProcessor::new(cfg.clone(), notifier, now_ms());
    let mut supervisor = ConnectionSupervisor::new(&cfg.feed_url, cfg.reconnect_backoff_secs, processor)?;
    supervisor.supervise().await;

    Ok(())
}
