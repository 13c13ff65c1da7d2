//! Keyed state storage.
//!
//! Under the full-rerun model the host loads engine state from a store at
//! the start of every pass and saves it at the end. Keys are `game/<id>` for
//! sessions, `mode` for the game mode and `controller` for the
//! controller's reseeding progress.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::GameResult;

/// Store key of the game mode.
pub const MODE_KEY: &str = "mode";

/// Store key of the controller's reseeding progress.
pub const CONTROLLER_KEY: &str = "controller";

/// Store key of a session.
pub fn game_key(id: &str) -> String {
    format!("game/{id}")
}

/// A session-scoped key/value store for engine state.
pub trait StateStore {
    /// Value under `key`, if any.
    fn load(&self, key: &str) -> GameResult<Option<serde_json::Value>>;

    /// Replace the value under `key`.
    fn save(&mut self, key: &str, value: serde_json::Value) -> GameResult<()>;
}

/// In-memory store; serializable so hosts can persist it as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryStore {
    entries: BTreeMap<String, serde_json::Value>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Drop a key.
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.entries.remove(key)
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> GameResult<Option<serde_json::Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: serde_json::Value) -> GameResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}
