//! Recently copied emoji, most recent first
//!
//! Persisted as a JSON array under a fixed key. Loading never fails: a
//! missing, corrupt or non-array value reads as an empty list. Saving is
//! best-effort and errors are only logged.

use crate::storage::KeyValueStore;

pub const RECENTS_KEY: &str = "textkit:emoji:recents";
pub const RECENTS_MAX: usize = 48;

/// Decode a stored value, dropping non-string elements and anything past capacity
pub fn decode_recents(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(values)) => values
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .take(RECENTS_MAX)
            .collect(),
        _ => Vec::new(),
    }
}

pub struct Recents<S: KeyValueStore> {
    store: S,
    items: Vec<String>,
}

impl<S: KeyValueStore> Recents<S> {
    pub fn load(store: S) -> Self {
        let raw = store.get(RECENTS_KEY).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "recents unreadable, starting empty");
            None
        });
        let items = decode_recents(raw.as_deref());
        Self { store, items }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Move or insert `emoji` at the front, evict past capacity, persist
    pub fn record(&mut self, emoji: &str) {
        self.items.retain(|e| e != emoji);
        self.items.insert(0, emoji.to_string());
        self.items.truncate(RECENTS_MAX);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        if let Err(e) = self.store.remove(RECENTS_KEY) {
            tracing::debug!(error = %e, "failed to clear recents");
        }
    }

    fn persist(&self) {
        let encoded = match serde_json::to_string(&self.items) {
            Ok(s) => s,
            Err(e) => {
                tracing::debug!(error = %e, "failed to encode recents");
                return;
            }
        };
        if let Err(e) = self.store.set(RECENTS_KEY, &encoded) {
            tracing::debug!(error = %e, "failed to persist recents");
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
