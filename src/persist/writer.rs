use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use crate::storage::StorageAdapter;

enum Command {
    Set { key: String, value: String },
    Remove { key: String },
    Flush(oneshot::Sender<()>),
}

/// Fire-and-forget writer for a storage adapter.
///
/// Commands are applied one at a time in the order they were issued, so two
/// writes to the same key always land in call order. The background task
/// exits once every handle has been dropped and the queue is drained.
#[derive(Clone)]
pub struct Persister {
    tx: mpsc::UnboundedSender<Command>,
}

impl Persister {
    /// Spawn the writer task on the current Tokio runtime.
    pub fn spawn(storage: Arc<dyn StorageAdapter>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(storage, rx));
        Self { tx }
    }

    /// Queue `value` to be stored under `key`.
    pub fn set(&self, key: String, value: String) {
        self.send(Command::Set { key, value });
    }

    /// Queue removal of `key`.
    pub fn remove(&self, key: String) {
        self.send(Command::Remove { key });
    }

    /// Resolve once every previously queued command has been attempted.
    ///
    /// Returns immediately if the writer task is gone.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(Command::Flush(done_tx)).is_err() {
            return;
        }
        let _ = done_rx.await;
    }

    fn send(&self, command: Command) {
        if self.tx.send(command).is_err() {
            tracing::warn!("Persistence writer has stopped, write dropped");
        }
    }
}

async fn run(storage: Arc<dyn StorageAdapter>, mut rx: mpsc::UnboundedReceiver<Command>) {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Set { key, value } => match storage.set(&key, &value).await {
                Ok(()) => tracing::debug!(key = %key, bytes = value.len(), "Persisted state"),
                Err(e) => tracing::warn!(key = %key, error = %e, "Failed to persist state"),
            },
            Command::Remove { key } => match storage.remove(&key).await {
                Ok(()) => tracing::debug!(key = %key, "Removed persisted state"),
                Err(e) => tracing::warn!(key = %key, error = %e, "Failed to remove persisted state"),
            },
            Command::Flush(done) => {
                if done.send(()).is_err() {
                    tracing::trace!("Flush acknowledgement dropped (waiter gone)");
                }
            }
        }
    }
}
