//! Global loading overlay. In memory only.

use crate::store::{Store, Subscription};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingState {
    pub is_loading: bool,
    /// Only meaningful while `is_loading` is set.
    pub loading_text: Option<String>,
}

#[derive(Clone)]
pub struct LoadingStore {
    store: Store<LoadingState>,
}

impl LoadingStore {
    pub fn new() -> Self {
        Self {
            store: Store::new(LoadingState::default()),
        }
    }

    pub fn state(&self) -> LoadingState {
        self.store.get()
    }

    pub fn is_loading(&self) -> bool {
        self.store.read(|state| state.is_loading)
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&LoadingState) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    pub fn start_loading(&self, text: Option<String>) {
        self.store.set(LoadingState {
            is_loading: true,
            loading_text: text,
        });
    }

    pub fn stop_loading(&self) {
        self.store.set(LoadingState::default());
    }

    /// Replace the overlay text. Ignored when not loading.
    pub fn set_loading_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.store.update_if(|state| {
            if !state.is_loading {
                return false;
            }
            state.loading_text = Some(text);
            true
        });
    }
}

impl Default for LoadingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_clears_text() {
        let store = LoadingStore::new();
        store.start_loading(Some("Fetching listings".to_string()));
        assert!(store.is_loading());
        assert_eq!(store.state().loading_text.as_deref(), Some("Fetching listings"));

        store.stop_loading();
        assert_eq!(store.state(), LoadingState::default());
    }

    #[test]
    fn text_only_applies_while_loading() {
        let store = LoadingStore::new();
        store.set_loading_text("ignored");
        assert_eq!(store.state().loading_text, None);

        store.start_loading(None);
        store.set_loading_text("Uploading photos");
        assert_eq!(store.state().loading_text.as_deref(), Some("Uploading photos"));
    }
}
