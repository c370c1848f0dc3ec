use std::sync::Arc;

use tokio::sync::watch;

/// Match-wide cancellation signal.
///
/// Cloning gives another handle to the same signal. Once raised it stays
/// raised; every pending and future [`Shutdown::cancelled`] resolves.
#[derive(Clone, Debug)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Raise the signal.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once the signal is raised.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // the sender lives in `self`, so the channel cannot close under us
        let _ = rx.wait_for(|raised| *raised).await;
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn cancel_wakes_every_waiter() {
        let shutdown = Shutdown::new();
        let a = tokio::spawn({
            let s = shutdown.clone();
            async move { s.cancelled().await }
        });
        let b = tokio::spawn({
            let s = shutdown.clone();
            async move { s.cancelled().await }
        });
        tokio::task::yield_now().await;
        shutdown.cancel();
        timeout(Duration::from_secs(1), a).await.unwrap().unwrap();
        timeout(Duration::from_secs(1), b).await.unwrap().unwrap();
        assert!(shutdown.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_resolves_immediately_after_cancel() {
        let shutdown = Shutdown::new();
        shutdown.cancel();
        timeout(Duration::from_millis(10), shutdown.cancelled())
            .await
            .unwrap();
    }
}
