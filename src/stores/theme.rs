//! Light/dark theme with its color palette.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ThemeError;
use crate::persist::{Persisted, Readiness, Slot};
use crate::store::{Store, Subscription};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            ThemeMode::Light => &LIGHT,
            ThemeMode::Dark => &DARK,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(ThemeError::Unknown(other.to_string())),
        }
    }
}

/// Semantic color roles used by the listing screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub card: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
    pub icon: &'static str,
    pub price: &'static str,
    pub favorite: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
}

pub static LIGHT: Palette = Palette {
    primary: "#2563EB",
    secondary: "#0EA5E9",
    background: "#F8FAFC",
    surface: "#FFFFFF",
    card: "#FFFFFF",
    text: "#0F172A",
    text_secondary: "#64748B",
    border: "#E2E8F0",
    icon: "#475569",
    price: "#16A34A",
    favorite: "#EF4444",
    success: "#22C55E",
    warning: "#F59E0B",
    error: "#DC2626",
};

pub static DARK: Palette = Palette {
    primary: "#3B82F6",
    secondary: "#38BDF8",
    background: "#0B1120",
    surface: "#111827",
    card: "#1E293B",
    text: "#F1F5F9",
    text_secondary: "#94A3B8",
    border: "#334155",
    icon: "#CBD5E1",
    price: "#4ADE80",
    favorite: "#F87171",
    success: "#4ADE80",
    warning: "#FBBF24",
    error: "#F87171",
};

/// Current theme and its palette.
///
/// The fields are private and the only constructor derives `colors` from
/// `theme`, so the two cannot disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeState {
    theme: ThemeMode,
    colors: &'static Palette,
}

impl ThemeState {
    pub fn for_mode(theme: ThemeMode) -> Self {
        Self {
            theme,
            colors: theme.palette(),
        }
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn colors(&self) -> &'static Palette {
        self.colors
    }

    pub fn is_dark(&self) -> bool {
        self.theme == ThemeMode::Dark
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::for_mode(ThemeMode::default())
    }
}

#[derive(Clone)]
pub struct ThemeStore {
    store: Store<ThemeState>,
    slot: Slot,
    readiness: Readiness,
}

impl ThemeStore {
    pub fn new(slot: Slot) -> Self {
        Self {
            store: Store::new(ThemeState::default()),
            slot,
            readiness: Readiness::new(),
        }
    }

    pub fn state(&self) -> ThemeState {
        self.store.get()
    }

    pub fn theme(&self) -> ThemeMode {
        self.store.read(ThemeState::theme)
    }

    pub fn colors(&self) -> &'static Palette {
        self.store.read(ThemeState::colors)
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ThemeState) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    /// Switch to `mode` and persist it.
    pub fn set_theme(&self, mode: ThemeMode) {
        self.store.set(ThemeState::for_mode(mode));
        self.persist();
    }

    pub fn toggle_theme(&self) {
        self.store
            .update(|state| *state = ThemeState::for_mode(state.theme.toggled()));
        self.persist();
    }

    // Saved under the read lock so queued writes follow commit order
    fn persist(&self) {
        self.store
            .read(|state| self.slot.save_raw(state.theme.as_str()));
    }
}

#[async_trait]
impl Persisted for ThemeStore {
    async fn hydrate(&self) {
        if let Some(raw) = self.slot.load_raw().await {
            match raw.parse::<ThemeMode>() {
                Ok(mode) => {
                    tracing::debug!(theme = %mode, "Rehydrated theme");
                    self.store.set(ThemeState::for_mode(mode));
                }
                Err(e) => tracing::warn!(key = %self.slot.key(), error = %e, "Ignoring persisted theme"),
            }
        }
        self.readiness.mark_ready();
    }

    fn readiness(&self) -> &Readiness {
        &self.readiness
    }
}
