pub mod p2p;
pub mod telegram;
pub mod types;

pub use p2p::{P2pClient, PriceSource};
pub use telegram::{Notifier, TelegramClient};
pub use types::*;
