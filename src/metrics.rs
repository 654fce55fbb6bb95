use std::collections::VecDeque;

/// Trailing window for the per-minute count.
const RATE_WINDOW_MS: u64 = 60_000;
/// Hard cap on retained event timestamps.
const RATE_CAP: usize = 60;

/// Counts delivered notifications: a lifetime total plus a trailing
/// one-minute window. Diagnostic only, never gates sending.
#[derive(Debug, Default)]
pub struct NotificationRateTracker {
    total: u64,
    recent: VecDeque<u64>,
}

impl NotificationRateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one notification at `now_ms`, then drop entries strictly
    /// older than the trailing window.
    pub fn record_event(&mut self, now_ms: u64) {
        self.total += 1;
        if self.recent.len() >= RATE_CAP {
            self.recent.pop_front();
        }
        self.recent.push_back(now_ms);

        while let Some(&oldest) = self.recent.front() {
            if now_ms.saturating_sub(oldest) > RATE_WINDOW_MS {
                self.recent.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Events recorded within the last minute, as of the last record.
    pub fn count_last_minute(&self) -> usize {
        self.recent.len()
    }
}
