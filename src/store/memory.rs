use super::{KeyValueStore, StoreError};
use std::collections::HashMap;

/// `HashMap` backed store; contents live as long as the value.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, Vec<String>>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        Self::default()
    }

    /// Store pre-seeded with one array, as if a previous run had saved it.
    pub fn with_array(key: &str, values: &[&str]) -> MemoryStore {
        let mut store = MemoryStore::new();
        store
            .values
            .insert(key.to_string(), values.iter().map(|v| v.to_string()).collect());
        store
    }

    /// Number of successful `set_string_array` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get_string_array(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set_string_array(&mut self, key: &str, values: &[String]) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), values.to_vec());
        self.writes += 1;
        Ok(())
    }
}
