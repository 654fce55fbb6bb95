use tracing::{error, info};

use crate::config::Config;
use crate::feed::parse_tick;
use crate::metrics::NotificationRateTracker;
use crate::notify::{alert_message, periodic_message, startup_message, Notifier};
use crate::window::{PriceSample, PriceWindow};

/// Notification categories, as they appear in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    PriceAlert,
    PeriodicUpdate,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::PriceAlert => "PRICE_ALERT",
            NotificationKind::PeriodicUpdate => "PERIODIC_UPDATE",
        }
    }
}

/// The tick-handling state machine. Owns the rolling window, both
/// wall-clock gates and the notification rate counter; the supervisor
/// feeds it one raw message at a time, timestamps supplied by the caller.
pub struct TickProcessor {
    cfg: Config,
    window: PriceWindow,
    rate: NotificationRateTracker,
    notifier: Box<dyn Notifier>,
    started: bool,
    last_price_update_ms: u64,
    last_periodic_update_ms: u64,
}

impl TickProcessor {
    /// Both gate timers start at `now_ms`, so neither gate can fire
    /// before its full interval has elapsed from construction.
    pub fn new(cfg: Config, notifier: Box<dyn Notifier>, now_ms: u64) -> Self {
        let window = PriceWindow::new(cfg.window_capacity());
        Self {
            cfg,
            window,
            rate: NotificationRateTracker::new(),
            notifier,
            started: false,
            last_price_update_ms: now_ms,
            last_periodic_update_ms: now_ms,
        }
    }

    /// Handle one raw feed message. Malformed payloads are logged and
    /// dropped; nothing escapes to the caller.
    pub async fn on_message(&mut self, raw: &str, now_ms: u64) {
        match parse_tick(raw) {
            Ok(price) => self.on_price(price, now_ms).await,
            Err(e) => error!("Error processing message: {}", e),
        }
    }

    async fn on_price(&mut self, price: f64, now_ms: u64) {
        // One-way transition; the startup notification fires exactly once
        // per process and is not counted by the rate tracker.
        if !self.started {
            self.started = true;
            self.deliver(&startup_message(price)).await;
        }

        let sample_gate_ms = self.cfg.sample_interval_secs.saturating_mul(1000);
        if now_ms.saturating_sub(self.last_price_update_ms) >= sample_gate_ms {
            self.window.push(PriceSample { ts_ms: now_ms, price });
            if let Some(change) = self.window.latest_delta() {
                info!("Price: ${:.2} | Change: {:+.4}%", price, change);
                if change.abs() >= self.cfg.price_change_threshold * 100.0 {
                    let previous = self.window.previous().map(|s| s.price).unwrap_or(price);
                    self.deliver(&alert_message(previous, price, change)).await;
                    self.record(NotificationKind::PriceAlert, now_ms);
                }
            }
            self.last_price_update_ms = now_ms;
        }

        let periodic_gate_ms = self.cfg.periodic_interval_secs.saturating_mul(1000);
        if now_ms.saturating_sub(self.last_periodic_update_ms) >= periodic_gate_ms {
            // Empty only while the sampling gate has never passed; skip
            // the summary and leave the timer armed.
            if let (Some(oldest), Some(latest), Some(change)) =
                (self.window.oldest(), self.window.latest(), self.window.span_delta())
            {
                self.deliver(&periodic_message(oldest.price, latest.price, change)).await;
                self.record(NotificationKind::PeriodicUpdate, now_ms);
                self.last_periodic_update_ms = now_ms;
            }
        }
    }

    async fn deliver(&self, text: &str) {
        if let Err(e) = self.notifier.send(text).await {
            error!("Error sending Telegram message: {}", e);
        }
    }

    fn record(&mut self, kind: NotificationKind, now_ms: u64) {
        self.rate.record_event(now_ms);
        info!(
            "NOTIFICATION: {} | Total: {} | Past minute: {}",
            kind.as_str(),
            self.rate.total(),
            self.rate.count_last_minute()
        );
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn window(&self) -> &PriceWindow {
        &self.window
    }

    pub fn rate(&self) -> &NotificationRateTracker {
        &self.rate
    }
}
