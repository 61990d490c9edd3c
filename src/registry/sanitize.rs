//! Clean-up of a prefix list read back from storage.
//!
//! The store is plain text that another process (or a person) may have
//! edited, so the loaded list is re-validated before the registry trusts it.

use super::Rejection;
use crate::config::MAX_TOTAL_ENTRIES;
use crate::models::Prefix;

/// Result of sanitizing a stored list.
#[derive(Debug, Default)]
pub struct Sanitized {
    /// Accepted prefixes, ascending.
    pub kept: Vec<Prefix>,
    /// Sum of entry counts of `kept`.
    pub total_entries: u64,
    /// Entries that were dropped and why.
    pub dropped: Vec<Rejection>,
}

/// Validate a raw stored list.
///
/// Entries are sorted first, then accepted in order. An entry is dropped when
/// it is not a valid prefix, repeats an accepted one, overlaps an accepted one,
/// or would push the total past the entry ceiling.
pub fn sanitize_prefixes(raw: &[String]) -> Sanitized {
    let mut candidates: Vec<&str> = raw.iter().map(|s| s.trim()).collect();
    candidates.sort_unstable();

    let mut result = Sanitized::default();
    for text in candidates {
        let candidate = match Prefix::new(text) {
            Ok(p) => p,
            Err(_) => {
                result.dropped.push(Rejection::InvalidFormat(text.to_string()));
                continue;
            }
        };

        // Sorted input: any overlapping accepted prefix is the last one kept.
        if let Some(last) = result.kept.last() {
            if *last == candidate {
                result.dropped.push(Rejection::Duplicate(candidate));
                continue;
            }
            if last.overlaps(&candidate) {
                result.dropped.push(Rejection::Conflict {
                    candidate,
                    existing: last.clone(),
                });
                continue;
            }
        }

        let requested = candidate.entry_count();
        let available = MAX_TOTAL_ENTRIES - result.total_entries;
        if requested > available {
            result.dropped.push(Rejection::BudgetExceeded {
                candidate,
                requested,
                available,
            });
            continue;
        }

        result.total_entries += requested;
        result.kept.push(candidate);
    }
    result
}
