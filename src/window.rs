use std::collections::VecDeque;

/// One accepted price observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSample {
    pub ts_ms: u64,
    pub price: f64,
}

/// Bounded FIFO of accepted samples. One buffer backs both deltas: the
/// short-interval delta reads the last two entries, the span delta reads
/// the two ends.
#[derive(Debug, Clone)]
pub struct PriceWindow {
    capacity: usize,
    samples: VecDeque<PriceSample>,
}

impl PriceWindow {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "window capacity must be positive");
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a sample, evicting the oldest once the window is full.
    pub fn push(&mut self, sample: PriceSample) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    pub fn latest(&self) -> Option<PriceSample> {
        self.samples.back().copied()
    }

    pub fn oldest(&self) -> Option<PriceSample> {
        self.samples.front().copied()
    }

    /// Second newest sample, if the window holds at least two.
    pub fn previous(&self) -> Option<PriceSample> {
        if self.samples.len() < 2 {
            return None;
        }
        self.samples.get(self.samples.len() - 2).copied()
    }

    /// Percent change between the two newest samples. None with fewer
    /// than two samples.
    pub fn latest_delta(&self) -> Option<f64> {
        let prev = self.previous()?;
        let last = self.latest()?;
        Some(pct_change(prev.price, last.price))
    }

    /// Percent change between the two ends of the window. None when
    /// empty; 0.0 with a single sample.
    pub fn span_delta(&self) -> Option<f64> {
        let first = self.oldest()?;
        let last = self.latest()?;
        Some(pct_change(first.price, last.price))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceSample> {
        self.samples.iter()
    }
}

fn pct_change(from: f64, to: f64) -> f64 {
    if from > 0.0 {
        (to - from) / from * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(ts_ms: u64, price: f64) -> PriceSample {
        PriceSample { ts_ms, price }
    }

    #[test]
    fn test_push_respects_capacity_and_order() {
        let mut window = PriceWindow::new(3);
        for i in 0..5u64 {
            window.push(s(i * 1000, 100.0 + i as f64));
        }

        assert_eq!(window.len(), 3);
        assert!(window.is_full());
        let prices: Vec<f64> = window.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![102.0, 103.0, 104.0]);
    }

    #[test]
    fn test_contents_are_last_n_in_chronological_order() {
        let mut window = PriceWindow::new(10);
        for i in 0..1000u64 {
            window.push(s(i, i as f64));
        }

        assert_eq!(window.len(), 10);
        let ts: Vec<u64> = window.iter().map(|p| p.ts_ms).collect();
        let expected: Vec<u64> = (990..1000).collect();
        assert_eq!(ts, expected);
    }

    #[test]
    fn test_latest_delta_two_samples() {
        let mut window = PriceWindow::new(10);
        window.push(s(0, 100.0));
        window.push(s(1000, 101.0));

        let delta = window.latest_delta().unwrap();
        assert!((delta - 1.0).abs() < 1e-9, "expected +1.0%, got {}", delta);
    }

    #[test]
    fn test_latest_delta_requires_two_samples() {
        let mut window = PriceWindow::new(10);
        assert!(window.latest_delta().is_none());
        window.push(s(0, 100.0));
        assert!(window.latest_delta().is_none());
    }

    #[test]
    fn test_span_delta_oldest_vs_newest() {
        let mut window = PriceWindow::new(10);
        window.push(s(0, 100.0));
        window.push(s(1000, 101.0));
        window.push(s(2000, 99.0));

        let delta = window.span_delta().unwrap();
        assert!((delta + 1.0).abs() < 1e-9, "expected -1.0%, got {}", delta);
    }

    #[test]
    fn test_span_delta_single_sample_is_zero() {
        let mut window = PriceWindow::new(10);
        assert!(window.span_delta().is_none());
        window.push(s(0, 100.0));
        assert_eq!(window.span_delta(), Some(0.0));
    }

    #[test]
    fn test_span_delta_follows_eviction() {
        let mut window = PriceWindow::new(2);
        window.push(s(0, 100.0));
        window.push(s(1000, 200.0));
        window.push(s(2000, 300.0));

        // Oldest is now the 200.0 sample
        let delta = window.span_delta().unwrap();
        assert!((delta - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_previous_and_latest_accessors() {
        let mut window = PriceWindow::new(5);
        assert!(window.latest().is_none());
        assert!(window.previous().is_none());

        window.push(s(0, 100.0));
        assert_eq!(window.latest().unwrap().price, 100.0);
        assert!(window.previous().is_none());

        window.push(s(1000, 101.0));
        assert_eq!(window.latest().unwrap().price, 101.0);
        assert_eq!(window.previous().unwrap().price, 100.0);
        assert_eq!(window.oldest().unwrap().price, 100.0);
    }

    #[test]
    fn test_pct_change_guards_zero_base() {
        assert_eq!(pct_change(0.0, 100.0), 0.0);
        assert!((pct_change(100.0, 100.1) - 0.1).abs() < 1e-9);
    }
}
