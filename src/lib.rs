//! Maintain a list of blocked NANP number prefixes and export it to the
//! host's call-blocking directory.
//!
//! The [`registry::PrefixRegistry`] owns the rules: prefix format, no
//! overlapping prefixes, and the platform's entry ceiling. Everything else
//! reads from it or writes through it.

pub mod commands;
pub mod config;
pub mod export;
pub mod host;
pub mod models;
pub mod output;
pub mod registry;
pub mod store;

use registry::PrefixRegistry;
use std::error::Error;
use std::path::Path;
use store::JsonFileStore;

pub use models::{entry_count, is_valid_area_code, is_valid_prefix, phone_number_range};

/// Open the registry saved in `store_file`, creating an empty one if the file
/// does not exist yet.
pub fn open_registry(store_file: &Path) -> Result<PrefixRegistry<JsonFileStore>, Box<dyn Error>> {
    let store = JsonFileStore::new(store_file);
    let registry = PrefixRegistry::load(store)
        .map_err(|e| format!("Error loading prefix list from {}: {e}", store_file.display()))?;
    log::info!(
        "Opened {} with {} prefixes ({} entries)",
        store_file.display(),
        registry.len(),
        registry.current_total_entries()
    );
    Ok(registry)
}
