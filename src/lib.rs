//! Always-on BTC price monitor: follows a live trade stream, tracks
//! short- and long-interval moves over a bounded rolling window, and
//! pushes threshold alerts plus periodic summaries to Telegram.

pub mod config;
pub mod error;
pub mod feed;
pub mod metrics;
pub mod notify;
pub mod processor;
pub mod window;
