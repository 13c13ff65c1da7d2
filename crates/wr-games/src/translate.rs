//! Translation lookup injected by the host.
//!
//! The engine only uses translations for human-readable strings. Lookups are
//! scoped per game kind (`"quiz"`, `"duel"`, ...) plus a shared `"common"`
//! scope, and always carry an English default.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Scope shared by all game kinds.
pub const COMMON_SCOPE: &str = "common";

/// A `translate(scope, key, default)` lookup.
pub trait Translator {
    /// Look up `key` in `scope`, falling back to `default`.
    fn translate(&self, scope: &str, key: &str, default: &str) -> String;
}

/// Translator that always returns the default text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Translator for Untranslated {
    fn translate(&self, _scope: &str, _key: &str, default: &str) -> String {
        default.to_string()
    }
}

/// An in-memory translation table: scope → key → text.
///
/// Misses fall back to the [`COMMON_SCOPE`] table, then to the default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    scopes: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from a JSON object of objects.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, scope: &str, key: &str, text: impl Into<String>) {
        self.scopes
            .entry(scope.to_string())
            .or_default()
            .insert(key.to_string(), text.into());
    }

    /// Number of entries across all scopes.
    pub fn len(&self) -> usize {
        self.scopes.values().map(HashMap::len).sum()
    }

    /// Whether the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, scope: &str, key: &str) -> Option<&str> {
        self.scopes
            .get(scope)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }
}

impl Translator for Catalog {
    fn translate(&self, scope: &str, key: &str, default: &str) -> String {
        self.lookup(scope, key)
            .or_else(|| self.lookup(COMMON_SCOPE, key))
            .unwrap_or(default)
            .to_string()
    }
}

/// Replace `{name}` placeholders in a translated template.
pub fn fill(template: &str, args: &[(&str, String)]) -> String {
    args.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{name}}}"), value)
    })
}
