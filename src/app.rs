//! All application stores wired to one storage adapter.

use std::sync::Arc;

use crate::config::Config;
use crate::persist::{Persisted, Persistence};
use crate::storage::StorageAdapter;
use crate::stores::{
    CurrencyStore, FavoritesStore, LoadingStore, NotificationsStore, OnboardingStore,
    SnackbarStore, ThemeStore,
};

/// The seven stores the client shares between screens.
///
/// Each store owns its own slice of state and storage key; the bundle only
/// builds them and drives startup hydration.
#[derive(Clone)]
pub struct Stores {
    pub theme: ThemeStore,
    pub currency: CurrencyStore,
    pub favorites: FavoritesStore,
    pub notifications: NotificationsStore,
    pub onboarding: OnboardingStore,
    pub loading: LoadingStore,
    pub snackbar: SnackbarStore,
    persistence: Persistence,
}

impl Stores {
    /// Build every store against `storage` using `config`.
    ///
    /// Must be called from within a Tokio runtime. Persisted stores hold
    /// defaults until [`Stores::hydrate`] completes.
    pub fn new(storage: Arc<dyn StorageAdapter>, config: &Config) -> Self {
        let persistence = Persistence::new(storage);
        let keys = &config.keys;

        Self {
            theme: ThemeStore::new(persistence.slot(&keys.theme)),
            currency: CurrencyStore::new(persistence.slot(&keys.currency)),
            favorites: FavoritesStore::new(persistence.slot(&keys.favorites)),
            notifications: NotificationsStore::with_capacity(
                persistence.slot(&keys.notifications),
                config.notifications.capacity,
            ),
            onboarding: OnboardingStore::new(persistence.slot(&keys.onboarding)),
            loading: LoadingStore::new(),
            snackbar: SnackbarStore::new(),
            persistence,
        }
    }

    /// Hydrate every persisted store concurrently.
    pub async fn hydrate(&self) {
        tokio::join!(
            self.theme.hydrate(),
            self.currency.hydrate(),
            self.favorites.hydrate(),
            self.notifications.hydrate(),
            self.onboarding.hydrate(),
        );
        tracing::debug!("All persisted stores hydrated");
    }

    /// Build and hydrate in one step.
    pub async fn open(storage: Arc<dyn StorageAdapter>, config: &Config) -> Self {
        let stores = Self::new(storage, config);
        stores.hydrate().await;
        stores
    }

    /// True once every persisted store has hydrated.
    pub fn is_ready(&self) -> bool {
        self.persisted().iter().all(|store| store.is_ready())
    }

    /// Wait until every persisted store has hydrated.
    pub async fn ready(&self) {
        for store in self.persisted() {
            store.readiness().wait().await;
        }
    }

    /// Wait until every write issued so far has been attempted.
    pub async fn flush(&self) {
        self.persistence.flush().await;
    }

    fn persisted(&self) -> [&dyn Persisted; 5] {
        [
            &self.theme,
            &self.currency,
            &self.favorites,
            &self.notifications,
            &self.onboarding,
        ]
    }
}
