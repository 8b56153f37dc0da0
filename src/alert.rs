use chrono::{DateTime, Local};

use crate::core::MarketplaceConfig;

/// Renders the Telegram alert text for a price observed at `at`.
pub fn format_alert(config: &MarketplaceConfig, price: f64, at: DateTime<Local>) -> String {
    format!(
        "🚨 High Sell Price Alert!\n\
         Top {} sell price via {}: {} {}\n\
         Time: {}\n\
         \n\
         Check it fast!",
        config.asset,
        config.pay_type,
        display_price(price),
        config.fiat,
        at.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Whole prices keep one decimal place (`13300.0`), everything else prints as-is.
pub fn display_price(price: f64) -> String {
    if price.is_finite() && price.fract() == 0.0 && price.abs() < 1e16 {
        format!("{:.1}", price)
    } else {
        price.to_string()
    }
}
