use std::collections::HashMap;

use crate::storage::{Error, KeyValueStore, Result, check_key};

/// A [`KeyValueStore`] held entirely in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
    /// Upper bound on the summed size of all values, if any
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects any write pushing the total stored size past `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(quota),
        }
    }

    fn used_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        check_key(key)?;

        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        check_key(key)?;

        if let Some(quota) = self.quota {
            let needed = self.used_without(key).saturating_add(value.len());
            if needed > quota {
                return Err(Error::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }

        self.entries.insert(key.to_string(), value.to_vec());

        Ok(())
    }
}
