//! CSV listing of the blocked prefixes.

use super::terminal::format_field;
use crate::config::MAX_TOTAL_ENTRIES;
use crate::export::ranges_ascending;
use crate::models::{format_phone_number, PhoneRange, Prefix};
use crate::registry::PrefixRegistry;
use crate::store::KeyValueStore;

/// One listed prefix.
#[derive(Debug)]
pub struct PrefixRow {
    pub index: usize,
    pub prefix: String,
    pub kind: &'static str,
    pub entries: u64,
    pub start: String,
    pub end: String,
}

impl PrefixRow {
    fn new(index: usize, prefix: &Prefix) -> PrefixRow {
        let range = prefix.phone_number_range();
        PrefixRow {
            index,
            prefix: prefix.to_string(),
            kind: if prefix.is_area_code() { "area" } else { "exchange" },
            entries: prefix.entry_count(),
            start: format_phone_number(range.start),
            end: format_phone_number(range.end),
        }
    }
}

/// Rows for every stored prefix, ascending.
pub fn prefix_rows<S: KeyValueStore>(registry: &PrefixRegistry<S>) -> Vec<PrefixRow> {
    registry
        .prefixes()
        .enumerate()
        .map(|(i, p)| PrefixRow::new(i + 1, p))
        .collect()
}

/// Render the registry as CSV: header, one line per prefix, totals comment.
pub fn prefix_csv<S: KeyValueStore>(registry: &PrefixRegistry<S>) -> String {
    let ranges: Vec<PhoneRange> = registry.ranges().collect();
    if !ranges_ascending(&ranges) {
        log::warn!("Stored ranges are not ascending; export would be rejected");
    }

    let mut lines = vec![format!(
        "{},{},{},{},{},{}",
        format_field("cnt", 5),
        format_field("prefix", 8),
        format_field("kind", 10),
        format_field("entries", 9),
        format_field("first", 17),
        format_field("last", 17),
    )];
    lines.extend(prefix_rows(registry).iter().map(csv_row));
    lines.push(format!(
        "# total {}/{} entries, {} remaining",
        registry.current_total_entries(),
        MAX_TOTAL_ENTRIES,
        registry.remaining_entries()
    ));
    lines.join("\n")
}

fn csv_row(row: &PrefixRow) -> String {
    format!(
        "{index},{prefix},{kind},{entries},{start},{end}",
        index = format_field(row.index, 5),
        prefix = format_field(&row.prefix, 8),
        kind = format_field(row.kind, 10),
        entries = format_field(row.entries, 9),
        start = format_field(&row.start, 17),
        end = format_field(&row.end, 17),
    )
}
