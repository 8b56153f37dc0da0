pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod shutdown;

pub use clock::{Clock, SystemClock};
pub use config::{Config, MarketplaceConfig, MonitorConfig, TelegramConfig};
pub use error::PriceAlertError;
pub use shutdown::{Shutdown, ShutdownTrigger};
