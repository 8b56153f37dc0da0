use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

/// Source of wall-clock time and delays for the polling loop.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
