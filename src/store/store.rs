use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Subscribers<T> {
    next_id: AtomicU64,
    entries: Mutex<Vec<(u64, Subscriber<T>)>>,
}

impl<T> Subscribers<T> {
    fn remove(&self, id: u64) {
        self.entries.lock().retain(|(entry_id, _)| *entry_id != id);
    }
}

/// A thread-safe, observable state container.
///
/// Every mutation replaces the state synchronously and notifies all
/// subscribers with a snapshot of the new state before returning.
pub struct Store<T> {
    state: Arc<RwLock<T>>,
    subscribers: Arc<Subscribers<T>>,
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    /// Create a new store with the given initial state.
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
            subscribers: Arc::new(Subscribers {
                next_id: AtomicU64::new(0),
                entries: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Get a clone of the current state.
    pub fn get(&self) -> T {
        self.state.read().clone()
    }

    /// Read state without cloning it.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let state = self.state.read();
        f(&*state)
    }

    /// Update the state in place and notify subscribers.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let snapshot = {
            let mut state = self.state.write();
            f(&mut *state);
            state.clone()
        };
        self.notify(&snapshot);
    }

    /// Update the state only if `f` reports a change.
    ///
    /// Returns whatever `f` returned; subscribers are notified only on `true`.
    pub fn update_if<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut T) -> bool,
    {
        let snapshot = {
            let mut state = self.state.write();
            if !f(&mut *state) {
                return false;
            }
            state.clone()
        };
        self.notify(&snapshot);
        true
    }

    /// Set a new state value.
    pub fn set(&self, new_state: T) {
        let snapshot = new_state.clone();
        *self.state.write() = new_state;
        self.notify(&snapshot);
    }

    /// Subscribe to state changes.
    ///
    /// The callback runs after every mutation until the returned guard is
    /// dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.subscribers.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers
            .entries
            .lock()
            .push((id, Arc::new(callback)));

        let weak: Weak<Subscribers<T>> = Arc::downgrade(&self.subscribers);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(subscribers) = weak.upgrade() {
                    subscribers.remove(id);
                }
            })),
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.entries.lock().len()
    }

    /// Notify all subscribers of a state change.
    ///
    /// No lock is held while callbacks run.
    fn notify(&self, state: &T) {
        let subscribers: Vec<Subscriber<T>> = self
            .subscribers
            .entries
            .lock()
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();
        for subscriber in subscribers {
            subscriber(state);
        }
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

/// RAII guard for a store subscription.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Keep the subscriber alive for as long as the store lives.
    pub fn detach(mut self) {
        self.unsubscribe = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}
