use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Owner side of the scheduler's shutdown channel.
pub struct ShutdownSignal {
    tx: watch::Sender<bool>,
}

impl ShutdownSignal {
    pub fn new() -> (Self, watch::Receiver<bool>) {
        let (tx, rx) = watch::channel(false);
        (Self { tx }, rx)
    }

    pub fn trigger(&self) {
        info!("Initiating graceful shutdown...");
        // Receivers may already be gone if the scheduler stopped on its own.
        let _ = self.tx.send(true);
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Triggers the signal on Ctrl+C.
    pub fn listen_for_ctrl_c(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Shutdown signal received.");
                    self.trigger();
                }
                Err(err) => {
                    error!("Unable to listen for shutdown signal: {}", err);
                    // Keep the sender alive so the scheduler keeps running.
                    std::future::pending::<()>().await;
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_flips_receivers() {
        let (signal, rx) = ShutdownSignal::new();
        let late = signal.subscribe();
        assert!(!*rx.borrow());

        signal.trigger();
        assert!(*rx.borrow());
        assert!(*late.borrow());
    }
}
