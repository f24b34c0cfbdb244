//! In-memory key-value medium.
//!
//! Backs unit tests and throwaway sessions. Supports an optional byte quota
//! and an availability switch so callers can exercise storage failures.

use super::{KeyValueStore, StorageError, StorageResult};
use std::collections::BTreeMap;

/// `BTreeMap`-backed medium with optional failure injection.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
    unavailable: bool,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a medium that rejects writes once keys plus values exceed
    /// `limit_bytes`.
    pub fn with_quota(limit_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(limit_bytes),
            ..Self::default()
        }
    }

    /// Toggles simulated outage; every call fails while unavailable.
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Total bytes currently held (keys plus values).
    pub fn used_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|(key, value)| entry_size(key, value))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn ensure_available(&self) -> StorageResult<()> {
        if self.unavailable {
            return Err(StorageError::Unavailable(
                "in-memory medium switched off".to_string(),
            ));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.ensure_available()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.ensure_available()?;

        if let Some(limit_bytes) = self.quota_bytes {
            let replaced = self
                .entries
                .get(key)
                .map_or(0, |old| entry_size(key, old));
            let required_bytes = self.used_bytes() - replaced + entry_size(key, value);
            if required_bytes > limit_bytes {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    required_bytes,
                    limit_bytes,
                });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.ensure_available()?;
        self.entries.remove(key);
        Ok(())
    }
}

fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

#[cfg(test)]
mod tests {
    use super::MemoryKvStore;
    use crate::storage::{KeyValueStore, StorageError};

    #[test]
    fn set_then_get_returns_latest_value() {
        let mut store = MemoryKvStore::new();
        store.set("theme", "light").expect("set");
        store.set("theme", "dark").expect("overwrite");
        assert_eq!(store.get("theme").expect("get").as_deref(), Some("dark"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_absent_key_is_ok() {
        let mut store = MemoryKvStore::new();
        store.remove("logado").expect("remove absent");
        assert!(store.get("logado").expect("get").is_none());
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_old_value() {
        let mut store = MemoryKvStore::with_quota(12);
        store.set("k", "short").expect("fits");
        let err = store.set("k", "much longer value").expect_err("over quota");
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                limit_bytes: 12,
                ..
            }
        ));
        assert_eq!(store.get("k").expect("get").as_deref(), Some("short"));
    }

    #[test]
    fn quota_counts_replacement_not_accumulation() {
        let mut store = MemoryKvStore::with_quota(6);
        store.set("k", "abcde").expect("exactly at limit");
        store.set("k", "vwxyz").expect("same size replacement");
        assert_eq!(store.used_bytes(), 6);
    }

    #[test]
    fn unavailable_medium_fails_every_call() {
        let mut store = MemoryKvStore::new();
        store.set_unavailable(true);
        assert!(matches!(
            store.get("k").expect_err("get fails"),
            StorageError::Unavailable(_)
        ));
        assert!(store.set("k", "v").is_err());
        assert!(store.remove("k").is_err());

        store.set_unavailable(false);
        store.set("k", "v").expect("recovered");
    }
}
