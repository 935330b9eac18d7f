use std::sync::Arc;
use tokio::sync::watch;

/// One-way flag raised when a store has finished rehydrating.
///
/// Clones observe the same flag. Once ready, a store stays ready.
#[derive(Clone)]
pub struct Readiness {
    tx: Arc<watch::Sender<bool>>,
}

impl Readiness {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn is_ready(&self) -> bool {
        *self.tx.borrow()
    }

    pub(crate) fn mark_ready(&self) {
        self.tx.send_replace(true);
    }

    /// Wait until the flag is raised. Returns immediately if it already is.
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close under us.
        let _ = rx.wait_for(|ready| *ready).await;
    }
}

impl Default for Readiness {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Readiness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Readiness")
            .field("ready", &self.is_ready())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn wait_resolves_after_mark() {
        let readiness = Readiness::new();
        assert!(!readiness.is_ready());

        let waiter = readiness.clone();
        let handle = tokio::spawn(async move { waiter.wait().await });

        tokio::time::sleep(Duration::from_millis(5)).await;
        readiness.mark_ready();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("wait should resolve")
            .unwrap();
        assert!(readiness.is_ready());
    }

    #[tokio::test]
    async fn wait_on_ready_flag_returns_immediately() {
        let readiness = Readiness::new();
        readiness.mark_ready();
        readiness.wait().await;
    }
}
