//! Polls a P2P marketplace for the top sell price and pings a Telegram chat
//! when it reaches a threshold.

pub mod alert;
pub mod api;
pub mod core;
pub mod monitor;

pub use monitor::{CheckOutcome, PriceMonitor};
