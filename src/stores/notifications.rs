//! In-app notification inbox with single-level undo.
//!
//! The list is newest-first and capped (100 by default); inserting past the
//! cap silently evicts the oldest entries. Only the list is persisted, never
//! the undo slot.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::persist::{Persisted, Readiness, Slot};
use crate::store::{Store, Subscription};

pub const DEFAULT_CAPACITY: usize = 100;

const ID_SUFFIX_LEN: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Message,
    Property,
    Payment,
    System,
}

/// A stored notification. Identity fields are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NotificationKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Caller-supplied content for a new notification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub kind: Option<NotificationKind>,
    pub data: Option<serde_json::Value>,
}

impl NewNotification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind: None,
            data: None,
        }
    }

    pub fn kind(mut self, kind: NotificationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationsState {
    pub notifications: Vec<Notification>,
    pub last_deleted: Option<Notification>,
}

impl NotificationsState {
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    fn contains_id(&self, id: &str) -> bool {
        self.notifications.iter().any(|n| n.id == id)
    }
}

/// `<unix millis>-<lowercase alphanumerics>`.
///
/// Best effort: two ids minted in the same millisecond collide only if the
/// random suffixes match.
fn generate_id(now: DateTime<Utc>) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("{}-{}", now.timestamp_millis(), suffix)
}

#[derive(Clone)]
pub struct NotificationsStore {
    store: Store<NotificationsState>,
    slot: Slot,
    readiness: Readiness,
    capacity: usize,
}

impl NotificationsStore {
    pub fn new(slot: Slot) -> Self {
        Self::with_capacity(slot, DEFAULT_CAPACITY)
    }

    /// A store keeping at most `capacity` entries (at least one).
    pub fn with_capacity(slot: Slot, capacity: usize) -> Self {
        Self {
            store: Store::new(NotificationsState::default()),
            slot,
            readiness: Readiness::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn state(&self) -> NotificationsState {
        self.store.get()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.store.read(|state| state.notifications.clone())
    }

    pub fn notification(&self, id: &str) -> Option<Notification> {
        self.store
            .read(|state| state.notifications.iter().find(|n| n.id == id).cloned())
    }

    pub fn unread(&self) -> Vec<Notification> {
        self.store.read(|state| {
            state
                .notifications
                .iter()
                .filter(|n| !n.read)
                .cloned()
                .collect()
        })
    }

    pub fn last_deleted(&self) -> Option<Notification> {
        self.store.read(|state| state.last_deleted.clone())
    }

    pub fn unread_count(&self) -> usize {
        self.store.read(NotificationsState::unread_count)
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&NotificationsState) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    /// Insert a new unread notification at the front and return it.
    pub fn add_notification(&self, new: NewNotification) -> Notification {
        let timestamp = Utc::now();
        let capacity = self.capacity;
        let mut notification = Notification {
            id: generate_id(timestamp),
            title: new.title,
            message: new.message,
            timestamp,
            read: false,
            kind: new.kind,
            data: new.data,
        };

        self.store.update(|state| {
            while state.contains_id(&notification.id) {
                notification.id = generate_id(timestamp);
            }
            state.notifications.insert(0, notification.clone());
            state.notifications.truncate(capacity);
        });

        self.persist();
        notification
    }

    pub fn mark_as_read(&self, id: &str) {
        let changed = self.store.update_if(|state| {
            match state.notifications.iter_mut().find(|n| n.id == id && !n.read) {
                Some(notification) => {
                    notification.read = true;
                    true
                }
                None => false,
            }
        });
        if changed {
            self.persist();
        }
    }

    pub fn mark_all_as_read(&self) {
        let changed = self.store.update_if(|state| {
            let mut changed = false;
            for notification in state.notifications.iter_mut().filter(|n| !n.read) {
                notification.read = true;
                changed = true;
            }
            changed
        });
        if changed {
            self.persist();
        }
    }

    /// Remove `id`, keeping it in the undo slot. Unknown ids are ignored.
    pub fn delete_notification(&self, id: &str) {
        let changed = self.store.update_if(|state| {
            match state.notifications.iter().position(|n| n.id == id) {
                Some(index) => {
                    state.last_deleted = Some(state.notifications.remove(index));
                    true
                }
                None => false,
            }
        });
        if changed {
            self.persist();
        }
    }

    /// Reinsert the last deleted notification at the front.
    pub fn undo_delete(&self) {
        let capacity = self.capacity;
        let changed = self.store.update_if(|state| match state.last_deleted.take() {
            Some(notification) => {
                state.notifications.insert(0, notification);
                state.notifications.truncate(capacity);
                true
            }
            None => false,
        });
        if changed {
            self.persist();
        }
    }

    /// Drop every notification and the undo slot.
    pub fn clear_all(&self) {
        self.store.set(NotificationsState::default());
        self.persist();
    }

    fn persist(&self) {
        self.store
            .read(|state| self.slot.save_json(&state.notifications));
    }
}

#[async_trait]
impl Persisted for NotificationsStore {
    async fn hydrate(&self) {
        if let Some(mut notifications) = self.slot.load_json::<Vec<Notification>>().await {
            // Stored order is authoritative; undo can put older entries first
            notifications.truncate(self.capacity);
            tracing::debug!(count = notifications.len(), "Rehydrated notifications");
            self.store.update(|state| state.notifications = notifications);
        }
        self.readiness.mark_ready();
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

    fn notifications_store(storage: &MemoryStorage, capacity: usize) -> NotificationsStore {
        let slot = Persistence::new(Arc::new(storage.clone())).slot("notification-storage");
        NotificationsStore::with_capacity(slot, capacity)
    }

    fn is_generated_id(id: &str) -> bool {
        match id.split_once('-') {
            Some((millis, suffix)) => {
                !millis.is_empty()
                    && millis.chars().all(|c| c.is_ascii_digit())
                    && suffix.len() == ID_SUFFIX_LEN
                    && suffix.chars().all(|c| c.is_ascii_alphanumeric())
            }
            None => false,
        }
    }

    #[tokio::test]
    async fn add_assigns_identity() {
        let store = notifications_store(&MemoryStorage::new(), DEFAULT_CAPACITY);

        let added = store.add_notification(
            NewNotification::new("Price drop", "A saved home is cheaper")
                .kind(NotificationKind::Property)
                .data(serde_json::json!({ "propertyId": "p1" })),
        );

        assert!(is_generated_id(&added.id), "bad id {}", added.id);
        assert!(!added.read);
        assert_eq!(store.notifications()[0], added);
        assert_eq!(store.notification(&added.id), Some(added));
    }

    #[tokio::test]
    async fn ids_are_distinct() {
        let store = notifications_store(&MemoryStorage::new(), DEFAULT_CAPACITY);
        let mut ids = std::collections::HashSet::new();
        for i in 0..DEFAULT_CAPACITY {
            let added = store.add_notification(NewNotification::new(format!("n{i}"), "body"));
            assert!(ids.insert(added.id));
        }
    }

    #[tokio::test]
    async fn capacity_evicts_oldest() {
        let store = notifications_store(&MemoryStorage::new(), 3);
        for i in 0..5 {
            store.add_notification(NewNotification::new(format!("n{i}"), "body"));
        }

        let titles: Vec<String> = store.notifications().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["n4", "n3", "n2"]);
    }

    #[tokio::test]
    async fn mark_as_read_single_and_all() {
        let store = notifications_store(&MemoryStorage::new(), DEFAULT_CAPACITY);
        let first = store.add_notification(NewNotification::new("a", "a"));
        store.add_notification(NewNotification::new("b", "b"));
        assert_eq!(store.unread_count(), 2);

        store.mark_as_read(&first.id);
        assert_eq!(store.unread_count(), 1);
        assert!(store.notification(&first.id).unwrap().read);
        assert_eq!(store.unread()[0].title, "b");

        store.mark_as_read("missing");
        store.mark_all_as_read();
        assert_eq!(store.unread_count(), 0);
    }

    #[tokio::test]
    async fn delete_unknown_keeps_undo_slot() {
        let store = notifications_store(&MemoryStorage::new(), DEFAULT_CAPACITY);
        let added = store.add_notification(NewNotification::new("a", "a"));

        store.delete_notification(&added.id);
        store.delete_notification("missing");

        assert_eq!(store.last_deleted(), Some(added));
    }

    #[tokio::test]
    async fn clear_all_empties_list_and_undo_slot() {
        let storage = MemoryStorage::new();
        let store = notifications_store(&storage, DEFAULT_CAPACITY);
        let added = store.add_notification(NewNotification::new("a", "a"));
        store.add_notification(NewNotification::new("b", "b"));
        store.delete_notification(&added.id);

        store.clear_all();
        store.undo_delete();

        assert!(store.notifications().is_empty());
        assert_eq!(store.last_deleted(), None);
        store.slot.flush().await;
        assert_eq!(storage.snapshot("notification-storage").as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn persisted_payload_uses_type_field_and_omits_undo_slot() {
        let storage = MemoryStorage::new();
        let store = notifications_store(&storage, DEFAULT_CAPACITY);
        store.add_notification(NewNotification::new("Paid", "Deposit received").kind(NotificationKind::Payment));
        let doomed = store.add_notification(NewNotification::new("x", "x"));
        store.delete_notification(&doomed.id);
        store.slot.flush().await;

        let raw = storage.snapshot("notification-storage").unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["type"], "payment");
        assert_eq!(entries[0]["read"], false);
        assert!(entries[0].get("lastDeleted").is_none());
    }

    #[tokio::test]
    async fn hydrate_restores_newest_first_within_capacity() {
        let storage = MemoryStorage::new();
        let writer = notifications_store(&storage, DEFAULT_CAPACITY);
        for i in 0..4 {
            writer.add_notification(NewNotification::new(format!("n{i}"), "body"));
        }
        writer.slot.flush().await;

        let reader = notifications_store(&storage, 2);
        reader.hydrate().await;

        assert!(reader.is_ready());
        assert_eq!(reader.notifications().len(), 2);
        assert_eq!(reader.notifications()[0], writer.notifications()[0]);
    }

    #[tokio::test]
    async fn undone_order_survives_restart() {
        let storage = MemoryStorage::new();
        let writer = notifications_store(&storage, DEFAULT_CAPACITY);
        let old = writer.add_notification(NewNotification::new("old", "body"));
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        writer.add_notification(NewNotification::new("new", "body"));

        writer.delete_notification(&old.id);
        writer.undo_delete();
        writer.slot.flush().await;
        let before: Vec<String> = writer.notifications().into_iter().map(|n| n.title).collect();
        assert_eq!(before, vec!["old", "new"]);

        let reader = notifications_store(&storage, DEFAULT_CAPACITY);
        reader.hydrate().await;

        let after: Vec<String> = reader.notifications().into_iter().map(|n| n.title).collect();
        assert_eq!(after, before);
    }
}
