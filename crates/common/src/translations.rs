//! Message translation lookup.
//!
//! A small injected key-to-string catalog standing in for a full
//! localization backend. Callers resolve symbolic keys to user-facing
//! messages; unknown keys fall back to the key itself so lookup never fails.

use std::collections::HashMap;

/// Translation key for the user-facing message shown when the
/// orchestration backend cannot be reached.
pub const ADAPTER_CONNECTION_ERROR: &str = "adapter_connection_error";

#[derive(Debug, Clone)]
pub struct Translations {
    entries: HashMap<String, String>,
}

impl Default for Translations {
    fn default() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            ADAPTER_CONNECTION_ERROR.to_string(),
            "Could not connect to the orchestration service".to_string(),
        );
        entries.insert("hello".to_string(), "Hello world".to_string());
        Self { entries }
    }
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry; useful for embedding and tests.
    pub fn with(mut self, key: &str, message: &str) -> Self {
        self.entries.insert(key.to_string(), message.to_string());
        self
    }

    /// Look up the message for a key.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Look up the message for a key, falling back to the key's literal
    /// string form when no entry exists.
    pub fn resolve_or_key(&self, key: &str) -> String {
        self.resolve(key).unwrap_or(key).to_string()
    }
}
