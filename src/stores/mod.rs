//! The application's state stores.
//!
//! Persisted stores (theme, currency, favorites, notifications, onboarding)
//! implement [`Persisted`](crate::persist::Persisted); loading and snackbar
//! live in memory only.

pub mod currency;
pub mod favorites;
pub mod loading;
pub mod notifications;
pub mod onboarding;
pub mod snackbar;
pub mod theme;

pub use currency::{Currency, CurrencyState, CurrencyStore};
pub use favorites::{FavoritesState, FavoritesStore};
pub use loading::{LoadingState, LoadingStore};
pub use notifications::{
    NewNotification, Notification, NotificationKind, NotificationsState, NotificationsStore,
};
pub use onboarding::{OnboardingState, OnboardingStore};
pub use snackbar::{SnackbarOptions, SnackbarState, SnackbarStore};
pub use theme::{Palette, ThemeMode, ThemeState, ThemeStore};
