//! Shutdown coordination.

use std::future::Future;
use tokio::sync::broadcast;

/// Broadcast-based trigger for stopping running servers.
///
/// Each server being shut down takes a future from [`Shutdown::signal`];
/// [`Shutdown::trigger`] resolves all of them.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Future that resolves once `trigger` is called.
    ///
    /// Also resolves if every `Shutdown` handle has been dropped.
    pub fn signal(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            let _ = rx.recv().await;
        }
    }

    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of pending `signal` futures.
    pub fn waiting(&self) -> usize {
        self.tx.receiver_count()
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
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_resolves_all_signals() {
        let shutdown = Shutdown::new();
        let a = tokio::spawn(shutdown.signal());
        let b = tokio::spawn(shutdown.signal());
        assert_eq!(shutdown.waiting(), 2);

        shutdown.trigger();

        tokio::time::timeout(Duration::from_secs(1), a).await.unwrap().unwrap();
        tokio::time::timeout(Duration::from_secs(1), b).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_dropping_last_handle_resolves_signal() {
        let shutdown = Shutdown::new();
        let signal = shutdown.signal();
        drop(shutdown);
        tokio::time::timeout(Duration::from_secs(1), signal).await.unwrap();
    }
}
