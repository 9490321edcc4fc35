use std::collections::HashMap;
use std::sync::Mutex;

/// Key/value persistence in the manner of `localStorage`
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage; lives as long as the platform that owns it
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with `entries`
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Mutex::new(map),
        }
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        let g = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        g.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut g = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        g.insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        let mut g = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        g.remove(key);
    }
}
