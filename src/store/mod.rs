//! Flat key-value storage shared between the editor and the exporter.
//!
//! - [`KeyValueStore`] - the storage seam the registry is built on
//! - [`MemoryStore`] - in-process map, for tests and dry runs
//! - [`JsonFileStore`] - one JSON file on disk, re-read on every access

mod file;
mod memory;

pub use file::{JsonFileStore, StoreDocument};
pub use memory::MemoryStore;

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("store file {path} is not valid JSON at path={json_path}: {message}")]
    Parse {
        path: String,
        json_path: String,
        message: String,
    },
    #[error("error serializing store: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Minimal key-value storage holding string arrays.
pub trait KeyValueStore {
    /// Read the array stored under `key`, `None` when the key was never set.
    fn get_string_array(&self, key: &str) -> Result<Option<Vec<String>>, StoreError>;

    /// Replace the array stored under `key`.
    fn set_string_array(&mut self, key: &str, values: &[String]) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get_string_array(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        (**self).get_string_array(key)
    }

    fn set_string_array(&mut self, key: &str, values: &[String]) -> Result<(), StoreError> {
        (**self).set_string_array(key, values)
    }
}
