//! Integration tests for prefix-blocklist
//!
//! These tests run the editor and the exporter against the same store file,
//! the way the app and the host's extension process share it.

use prefix_blocklist::config::{MAX_TOTAL_ENTRIES, PREFIX_STORE_KEY};
use prefix_blocklist::export::{
    blocking_entries, export_to_directory, ranges_ascending, ExportMode,
};
use prefix_blocklist::host::{FileDirectory, MemoryDirectory};
use prefix_blocklist::models::PhoneRange;
use prefix_blocklist::open_registry;
use prefix_blocklist::registry::{PrefixRegistry, Rejection};
use prefix_blocklist::store::{JsonFileStore, KeyValueStore, MemoryStore};

#[test]
fn test_edit_then_export_from_shared_file() {
    let dir = tempfile::tempdir().unwrap();
    let store_file = dir.path().join("store.json");
    let output = dir.path().join("entries.txt");

    let mut registry = open_registry(&store_file).expect("Failed to open registry");
    registry.add("415555").unwrap();
    registry.add("212456").unwrap();
    registry.add("21245").unwrap_err();
    registry.add("212457").unwrap();
    drop(registry);

    let mut directory = FileDirectory::new(&output);
    let report = export_to_directory(
        JsonFileStore::new(&store_file),
        &mut directory,
        ExportMode::Incremental,
    )
    .expect("Export failed");
    assert_eq!(report.prefixes, 3);
    assert_eq!(report.entries, 30_000);

    let numbers: Vec<u64> = std::fs::read_to_string(&output)
        .unwrap()
        .lines()
        .map(|l| l.parse().unwrap())
        .collect();
    assert_eq!(numbers.len(), 30_000);
    assert!(numbers.windows(2).all(|w| w[0] < w[1]), "not strictly ascending");
    assert_eq!(numbers[0], 12124560000);
    assert_eq!(numbers[10_000], 12124570000, "212456 and 212457 are adjacent");
    assert_eq!(numbers[29_999], 14155559999);
}

#[test]
fn test_exporter_sees_latest_edit() {
    let dir = tempfile::tempdir().unwrap();
    let store_file = dir.path().join("store.json");

    let mut registry = open_registry(&store_file).unwrap();
    registry.add("900999").unwrap();

    let mut directory = MemoryDirectory::new();
    export_to_directory(JsonFileStore::new(&store_file), &mut directory, ExportMode::Full)
        .unwrap();
    assert_eq!(directory.entries.len(), 10_000);

    registry.remove("900999").unwrap();
    registry.add("900998").unwrap();
    export_to_directory(
        JsonFileStore::new(&store_file),
        &mut directory,
        ExportMode::Incremental,
    )
    .unwrap();
    assert_eq!(directory.entries.len(), 10_000);
    assert_eq!(directory.entries[0], 19009980000);
}

#[test]
fn test_dirty_fixture_is_cleaned_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let store_file = dir.path().join("dirty.json");
    std::fs::copy("src/tests/test_data/store_02_dirty.json", &store_file).unwrap();

    let registry = open_registry(&store_file).expect("Failed to open dirty store");
    let kept: Vec<&str> = registry.prefixes().map(|p| p.as_str()).collect();
    assert_eq!(kept, vec!["212", "300", "400"]);
    assert_eq!(registry.current_total_entries(), MAX_TOTAL_ENTRIES);

    let rewritten = JsonFileStore::new(&store_file)
        .get_string_array(PREFIX_STORE_KEY)
        .unwrap()
        .unwrap();
    assert_eq!(rewritten, vec!["212", "300", "400"]);
}

#[test]
fn test_repeated_full_export_rewrites_file() {
    let dir = tempfile::tempdir().unwrap();
    let store_file = dir.path().join("store.json");
    let output = dir.path().join("entries.txt");

    let mut registry = open_registry(&store_file).unwrap();
    registry.add("212456").unwrap();

    for _ in 0..2 {
        let mut directory = FileDirectory::new(&output);
        export_to_directory(JsonFileStore::new(&store_file), &mut directory, ExportMode::Full)
            .expect("Export failed");
    }

    let numbers: Vec<u64> = std::fs::read_to_string(&output)
        .unwrap()
        .lines()
        .map(|l| l.parse().unwrap())
        .collect();
    assert_eq!(numbers.len(), 10_000);
    assert!(numbers.windows(2).all(|w| w[0] < w[1]), "not strictly ascending");
}

#[test]
fn test_export_leaves_store_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store_file = dir.path().join("dirty.json");
    std::fs::write(
        &store_file,
        r#"{"updated_at":null,"values":{"blockedPrefixes":["415555","41555","1415"]}}"#,
    )
    .unwrap();
    let before = std::fs::read(&store_file).unwrap();

    let mut directory = MemoryDirectory::new();
    let report = export_to_directory(
        JsonFileStore::new(&store_file),
        &mut directory,
        ExportMode::Full,
    )
    .unwrap();
    assert_eq!(report.prefixes, 1);
    assert_eq!(report.entries, 100_000);

    assert_eq!(std::fs::read(&store_file).unwrap(), before);
}

#[test]
fn test_budget_example() {
    let mut registry = PrefixRegistry::new(MemoryStore::new());
    for area in ["200", "300", "400"] {
        registry.add(area).unwrap();
    }
    assert_eq!(registry.current_total_entries(), 24_000_000);
    let err = registry.add("500456").unwrap_err();
    assert!(matches!(
        err.rejection(),
        Some(Rejection::BudgetExceeded { .. })
    ));
}

#[test]
fn test_ranges_sorted_and_sized() {
    let mut registry = PrefixRegistry::new(MemoryStore::new());
    for p in ["989", "2125", "2124", "30012", "300130", "7"] {
        let _ = registry.add(p);
    }
    let ranges: Vec<PhoneRange> = registry.ranges().collect();
    assert_eq!(ranges.len(), 5);
    assert!(ranges_ascending(&ranges));
    for (prefix, range) in registry.prefixes().zip(&ranges) {
        assert_eq!(range.count(), prefix.entry_count(), "{prefix}");
    }

    let total: u64 = ranges.iter().map(PhoneRange::count).sum();
    assert_eq!(total, registry.current_total_entries());
    assert_eq!(
        blocking_entries(&registry).count() as u64,
        registry.current_total_entries()
    );
}
