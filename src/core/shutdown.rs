use anyhow::Result;
use tokio::sync::watch;

/// Receiving half of the stop signal handed to long-running loops.
#[derive(Clone)]
pub struct Shutdown {
    stopped: watch::Receiver<bool>,
}

/// Sending half. Firing it more than once is harmless.
#[derive(Clone)]
pub struct ShutdownTrigger {
    stop: watch::Sender<bool>,
}

pub fn channel() -> (ShutdownTrigger, Shutdown) {
    let (stop, stopped) = watch::channel(false);
    (ShutdownTrigger { stop }, Shutdown { stopped })
}

impl Shutdown {
    pub fn is_triggered(&self) -> bool {
        *self.stopped.borrow()
    }

    /// Resolves once the trigger fires. A dropped trigger never fires.
    pub async fn wait(&self) {
        let mut stopped = self.stopped.clone();
        let closed = stopped.wait_for(|stop| *stop).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}

impl ShutdownTrigger {
    pub fn trigger(&self) {
        self.stop.send_replace(true);
    }
}

/// Waits for Ctrl-C (or SIGTERM on unix) and returns the signal's name.
async fn next_signal() -> Result<&'static str> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut term = signal(SignalKind::terminate())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                res?;
                Ok("SIGINT")
            }
            _ = term.recv() => Ok("SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        Ok("Ctrl-C")
    }
}

pub async fn listen_for_shutdown(trigger: ShutdownTrigger) {
    match next_signal().await {
        Ok(name) => {
            tracing::info!("🛑 {} received, shutting down", name);
            trigger.trigger();
        }
        Err(e) => {
            // Without signal handlers the process can still be killed.
            tracing::warn!("Signal handling unavailable: {}", e);
        }
    }
}
