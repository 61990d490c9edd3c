//! JSON file backed key-value store.
//!
//! The whole store is one small JSON document. Every read parses the file
//! again so the exporter, running in its own process, always sees what the
//! editor last wrote.

use super::{KeyValueStore, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// On-disk layout of the store file.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct StoreDocument {
    /// Time of the last write, RFC 3339.
    pub updated_at: Option<String>,
    /// String arrays by key.
    #[serde(default)]
    pub values: BTreeMap<String, Vec<String>>,
}

/// Store persisted as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> JsonFileStore {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn path_str(&self) -> String {
        self.path.display().to_string()
    }

    /// Read and parse the store file. A missing file is an empty document.
    pub fn read_document(&self) -> Result<StoreDocument, StoreError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Store file not found, starting empty: {}", self.path_str());
                return Ok(StoreDocument::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path_str(),
                    source,
                })
            }
        };
        if json.trim().is_empty() {
            return Ok(StoreDocument::default());
        }

        let mut deserializer = serde_json::Deserializer::from_str(&json);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
            log::error!("Store file {} failed to parse", self.path_str());
            StoreError::Parse {
                path: self.path_str(),
                json_path: e.path().to_string(),
                message: e.inner().to_string(),
            }
        })
    }

    /// Write the document to a temporary sibling, then rename it into place.
    fn write_document(&self, document: &StoreDocument) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(document)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.display().to_string(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path_str(),
            source,
        })?;
        log::debug!("Wrote store file: {}", self.path_str());
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_string_array(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        let mut document = self.read_document()?;
        Ok(document.values.remove(key))
    }

    fn set_string_array(&mut self, key: &str, values: &[String]) -> Result<(), StoreError> {
        let mut document = self.read_document()?;
        document.values.insert(key.to_string(), values.to_vec());
        document.updated_at = Some(chrono::Utc::now().to_rfc3339());
        self.write_document(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert_eq!(store.get_string_array("blockedPrefixes").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_from_second_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut writer = JsonFileStore::new(&path);
        writer
            .set_string_array("blockedPrefixes", &["212".to_string(), "2135".to_string()])
            .unwrap();
        writer.set_string_array("other", &[]).unwrap();

        let reader = JsonFileStore::new(&path);
        assert_eq!(
            reader.get_string_array("blockedPrefixes").unwrap(),
            Some(vec!["212".to_string(), "2135".to_string()])
        );
        assert_eq!(reader.get_string_array("other").unwrap(), Some(vec![]));
        assert!(reader.read_document().unwrap().updated_at.is_some());
        assert!(!dir.path().join("store.json.tmp").exists());
    }

    #[test]
    fn test_read_fixture() {
        let store = JsonFileStore::new("src/tests/test_data/store_01.json");
        let values = store
            .get_string_array("blockedPrefixes")
            .expect("Error reading store fixture")
            .expect("Fixture should contain blockedPrefixes");
        assert_eq!(values, vec!["212", "2135", "415555", "900"]);
    }

    #[test]
    fn test_parse_error_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"values": {"blockedPrefixes": ["212", 7]}}"#).unwrap();
        let err = JsonFileStore::new(&path)
            .get_string_array("blockedPrefixes")
            .unwrap_err();
        match err {
            StoreError::Parse { json_path, .. } => {
                assert_eq!(json_path, "values.blockedPrefixes[1]")
            }
            other => panic!("expected parse error, got {other}"),
        }
    }
}
