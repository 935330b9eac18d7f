//! Transient snackbar message with an optional action. In memory only.

use std::fmt;
use std::sync::Arc;

use crate::store::{Store, Subscription};

pub type SnackbarAction = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone, Default)]
pub struct SnackbarState {
    pub visible: bool,
    pub message: String,
    pub color: Option<String>,
    pub action_label: Option<String>,
    pub on_action: Option<SnackbarAction>,
}

impl SnackbarState {
    /// The action button is shown only with both a label and a callback.
    pub fn has_action(&self) -> bool {
        self.action_label.is_some() && self.on_action.is_some()
    }
}

impl fmt::Debug for SnackbarState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnackbarState")
            .field("visible", &self.visible)
            .field("message", &self.message)
            .field("color", &self.color)
            .field("action_label", &self.action_label)
            .field("on_action", &self.on_action.as_ref().map(|_| "Fn"))
            .finish()
    }
}

/// Arguments to [`SnackbarStore::show`].
#[derive(Clone, Default)]
pub struct SnackbarOptions {
    pub message: String,
    pub color: Option<String>,
    pub action_label: Option<String>,
    pub on_action: Option<SnackbarAction>,
}

impl SnackbarOptions {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn action<F>(mut self, label: impl Into<String>, on_action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.action_label = Some(label.into());
        self.on_action = Some(Arc::new(on_action));
        self
    }
}

#[derive(Clone)]
pub struct SnackbarStore {
    store: Store<SnackbarState>,
}

impl SnackbarStore {
    pub fn new() -> Self {
        Self {
            store: Store::new(SnackbarState::default()),
        }
    }

    pub fn state(&self) -> SnackbarState {
        self.store.get()
    }

    pub fn is_visible(&self) -> bool {
        self.store.read(|state| state.visible)
    }

    pub fn has_action(&self) -> bool {
        self.store.read(SnackbarState::has_action)
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&SnackbarState) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    pub fn show(&self, options: SnackbarOptions) {
        self.store.set(SnackbarState {
            visible: true,
            message: options.message,
            color: options.color,
            action_label: options.action_label,
            on_action: options.on_action,
        });
    }

    pub fn show_message(&self, message: impl Into<String>) {
        self.show(SnackbarOptions::new(message));
    }

    /// Hide and reset every field.
    pub fn hide(&self) {
        self.store.set(SnackbarState::default());
    }

    /// Run the action callback, if any, then dismiss.
    pub fn trigger_action(&self) {
        let action = self.store.read(|state| state.on_action.clone());
        if let Some(action) = action {
            action();
        }
        self.hide();
    }
}

impl Default for SnackbarStore {
    fn default() -> Self {
        Self::new()
    }
}
