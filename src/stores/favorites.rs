//! Favorited listing ids.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::persist::{Persisted, Readiness, Slot};
use crate::store::{Store, Subscription};

/// Favorited ids in insertion order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesState {
    pub favorites: Vec<String>,
}

impl FavoritesState {
    pub fn contains(&self, id: &str) -> bool {
        self.favorites.iter().any(|favorite| favorite == id)
    }

    fn insert(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.favorites.push(id.to_string());
        true
    }

    fn remove(&mut self, id: &str) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|favorite| favorite != id);
        self.favorites.len() != before
    }

    /// Drop repeated ids, keeping first occurrences.
    fn dedup(mut favorites: Vec<String>) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        favorites.retain(|id| seen.insert(id.clone()));
        favorites
    }
}

#[derive(Clone)]
pub struct FavoritesStore {
    store: Store<FavoritesState>,
    slot: Slot,
    readiness: Readiness,
}

impl FavoritesStore {
    pub fn new(slot: Slot) -> Self {
        Self {
            store: Store::new(FavoritesState::default()),
            slot,
            readiness: Readiness::new(),
        }
    }

    pub fn favorites(&self) -> Vec<String> {
        self.store.read(|state| state.favorites.clone())
    }

    pub fn count(&self) -> usize {
        self.store.read(|state| state.favorites.len())
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.store.read(|state| state.contains(id))
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&FavoritesState) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    /// Append `id` unless already present.
    pub fn add_favorite(&self, id: &str) {
        if self.store.update_if(|state| state.insert(id)) {
            self.persist();
        }
    }

    /// Remove `id` if present.
    pub fn remove_favorite(&self, id: &str) {
        if self.store.update_if(|state| state.remove(id)) {
            self.persist();
        }
    }

    /// Remove `id` if present, otherwise append it. Returns the new membership.
    pub fn toggle_favorite(&self, id: &str) -> bool {
        let mut now_favorite = false;
        self.store.update(|state| {
            if !state.remove(id) {
                state.insert(id);
                now_favorite = true;
            }
        });
        self.persist();
        now_favorite
    }

    pub fn clear_favorites(&self) {
        if self.store.update_if(|state| {
            let had_any = !state.favorites.is_empty();
            state.favorites.clear();
            had_any
        }) {
            self.persist();
        }
    }

    fn persist(&self) {
        self.store.read(|state| self.slot.save_json(&state.favorites));
    }
}

#[async_trait]
impl Persisted for FavoritesStore {
    async fn hydrate(&self) {
        if let Some(favorites) = self.slot.load_json::<Vec<String>>().await {
            let favorites = FavoritesState::dedup(favorites);
            tracing::debug!(count = favorites.len(), "Rehydrated favorites");
            self.store.set(FavoritesState { favorites });
        }
        self.readiness.mark_ready();
    }

    fn readiness(&self) -> &Readiness {
        &self.readiness
    }
}
