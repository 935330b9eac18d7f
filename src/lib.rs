//! # Roost
//!
//! Observable, persisted application state for a real-estate listing client.
//!
//! Roost provides two levels of abstraction:
//!
//! ## Store (Low-level container)
//!
//! - `Store<T>` - Thread-safe state container; synchronous reads, in-place
//!   updates, and subscriptions that fire before a mutation returns
//! - `Subscription` - RAII guard that unsubscribes on drop
//!
//! ## Application stores (High-level state)
//!
//! Seven independent stores, each owning one slice of state:
//! - Theme, Currency, Favorites, Notifications, Onboarding - persisted through
//!   an injected [`StorageAdapter`] and rehydrated with [`Persisted::hydrate`]
//! - Loading, Snackbar - in memory only
//!
//! Writes are fire-and-forget: actions update memory immediately and queue the
//! write to a background task. Storage failures are logged and never reach the
//! caller; unreadable persisted values fall back to defaults.
//!
//! ```no_run
//! use std::sync::Arc;
//! use roost::{Config, FileStorage, Stores};
//!
//! # async fn run() {
//! let storage = Arc::new(FileStorage::new("state.json"));
//! let stores = Stores::open(storage, &Config::default()).await;
//!
//! stores.favorites.toggle_favorite("listing-42");
//! stores.snackbar.show_message("Added to favorites");
//! # }
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod persist;
pub mod storage;
pub mod store;
pub mod stores;

// Re-export main types for convenience
pub use app::Stores;
pub use config::Config;
pub use error::{ConfigError, CurrencyError, StorageError, ThemeError};
pub use persist::{Persisted, Persistence, Readiness};
pub use storage::{FileStorage, MemoryStorage, StorageAdapter};
pub use store::{Store, Subscription};
