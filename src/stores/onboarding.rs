//! First-run onboarding flag.
//!
//! Routing must wait for `is_ready` before deciding whether to show
//! onboarding; until then `has_completed_onboarding` is just the default.

use async_trait::async_trait;

use crate::persist::{Persisted, Readiness, Slot};
use crate::store::{Store, Subscription};

const COMPLETED: &str = "true";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OnboardingState {
    pub has_completed_onboarding: bool,
    pub is_ready: bool,
}

#[derive(Clone)]
pub struct OnboardingStore {
    store: Store<OnboardingState>,
    slot: Slot,
    readiness: Readiness,
}

impl OnboardingStore {
    pub fn new(slot: Slot) -> Self {
        Self {
            store: Store::new(OnboardingState::default()),
            slot,
            readiness: Readiness::new(),
        }
    }

    pub fn state(&self) -> OnboardingState {
        self.store.get()
    }

    pub fn has_completed_onboarding(&self) -> bool {
        self.store.read(|state| state.has_completed_onboarding)
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&OnboardingState) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    /// Load the persisted flag. Always ends with `is_ready = true`.
    pub async fn initialize(&self) {
        let completed = match self.slot.load_raw().await {
            Some(raw) if raw == COMPLETED => true,
            Some(raw) => {
                tracing::debug!(value = %raw, "Unrecognized onboarding flag, treating as not completed");
                false
            }
            None => false,
        };

        self.store.update(|state| {
            state.has_completed_onboarding = completed;
            state.is_ready = true;
        });
        self.readiness.mark_ready();
    }

    pub fn complete_onboarding(&self) {
        self.store
            .update(|state| state.has_completed_onboarding = true);
        self.slot.save_raw(COMPLETED);
    }

    pub fn reset_onboarding(&self) {
        self.store
            .update(|state| state.has_completed_onboarding = false);
        self.slot.clear();
    }
}

#[async_trait]
impl Persisted for OnboardingStore {
    async fn hydrate(&self) {
        self.initialize().await;
    }

    fn readiness(&self) -> &Readiness {
        &self.readiness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::Persistence;
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    fn onboarding_store(storage: &MemoryStorage) -> OnboardingStore {
        OnboardingStore::new(Persistence::new(Arc::new(storage.clone())).slot("hasCompletedOnboarding"))
    }

    #[tokio::test]
    async fn not_ready_until_initialized() {
        let store = onboarding_store(&MemoryStorage::new());
        assert_eq!(store.state(), OnboardingState::default());
        assert!(!store.is_ready());

        store.initialize().await;

        assert_eq!(
            store.state(),
            OnboardingState {
                has_completed_onboarding: false,
                is_ready: true
            }
        );
    }

    #[tokio::test]
    async fn persisted_completion_is_loaded() {
        let storage = MemoryStorage::with_entries([("hasCompletedOnboarding", "true")]);
        let store = onboarding_store(&storage);

        store.initialize().await;

        assert!(store.has_completed_onboarding());
    }

    #[tokio::test]
    async fn complete_then_reset_round_trips_storage() {
        let storage = MemoryStorage::new();
        let store = onboarding_store(&storage);

        store.complete_onboarding();
        store.slot.flush().await;
        assert_eq!(storage.snapshot("hasCompletedOnboarding").as_deref(), Some("true"));

        store.reset_onboarding();
        store.slot.flush().await;
        assert!(!store.has_completed_onboarding());
        assert_eq!(storage.snapshot("hasCompletedOnboarding"), None);
    }
}
