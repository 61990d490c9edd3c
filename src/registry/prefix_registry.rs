//! The blocked prefix registry.

use super::sanitize::sanitize_prefixes;
use super::{RegistryError, Rejection};
use crate::config::{MAX_TOTAL_ENTRIES, PREFIX_STORE_KEY};
use crate::models::{PhoneRange, Prefix};
use crate::store::{KeyValueStore, StoreError};
use colored::Colorize;
use std::collections::BTreeSet;

/// Sorted set of blocked prefixes, persisted through a [`KeyValueStore`].
///
/// Invariants kept by every mutation:
/// - no two stored prefixes overlap (neither starts with the other)
/// - the summed entry count never exceeds [`MAX_TOTAL_ENTRIES`]
/// - the store always holds the list in ascending order
#[derive(Debug)]
pub struct PrefixRegistry<S: KeyValueStore> {
    store: S,
    prefixes: BTreeSet<Prefix>,
    total_entries: u64,
}

/// Everything the add form shows while the user is typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub candidate: String,
    /// Parsed prefix, None while the text is not a valid prefix.
    pub prefix: Option<Prefix>,
    pub entry_count: Option<u64>,
    pub range: Option<PhoneRange>,
    /// First stored prefix overlapping the text typed so far.
    pub conflicting: Option<Prefix>,
    pub current_total: u64,
    /// Total if the candidate were added.
    pub total_after: Option<u64>,
    /// Reason `add` would refuse the candidate.
    pub rejection: Option<Rejection>,
}

impl Preview {
    pub fn can_add(&self) -> bool {
        self.rejection.is_none()
    }
}

impl<S: KeyValueStore> PrefixRegistry<S> {
    /// Empty registry that has not read `store`.
    ///
    /// The first mutation overwrites whatever the store held.
    pub fn new(store: S) -> PrefixRegistry<S> {
        PrefixRegistry {
            store,
            prefixes: BTreeSet::new(),
            total_entries: 0,
        }
    }

    /// Build the registry from the list saved in `store`.
    ///
    /// Stored entries that break the registry invariants are dropped with a
    /// warning and the cleaned list is written back.
    pub fn load(store: S) -> Result<PrefixRegistry<S>, StoreError> {
        let (mut registry, raw) = Self::read_sanitized(store)?;
        if !registry.matches_stored(&raw) {
            log::info!(
                "Rewriting stored prefix list: {} -> {} entries",
                raw.len(),
                registry.len()
            );
            registry.persist()?;
        }
        Ok(registry)
    }

    /// Build a view of the list saved in `store` without ever writing to it.
    ///
    /// Invalid stored entries are skipped in memory only. Used by the exporter,
    /// which runs beside the editor and must not race its writes.
    pub fn load_readonly(store: S) -> Result<PrefixRegistry<S>, StoreError> {
        let (registry, _raw) = Self::read_sanitized(store)?;
        Ok(registry)
    }

    fn read_sanitized(store: S) -> Result<(PrefixRegistry<S>, Vec<String>), StoreError> {
        let raw = store.get_string_array(PREFIX_STORE_KEY)?.unwrap_or_default();
        let sanitized = sanitize_prefixes(&raw);

        for dropped in &sanitized.dropped {
            log::warn!("{} stored entry: {}", "Dropping".on_red(), dropped);
        }
        log::debug!(
            "Loaded {} prefixes, {} entries",
            sanitized.kept.len(),
            sanitized.total_entries
        );
        let registry = PrefixRegistry {
            store,
            prefixes: sanitized.kept.into_iter().collect(),
            total_entries: sanitized.total_entries,
        };
        Ok((registry, raw))
    }

    fn matches_stored(&self, raw: &[String]) -> bool {
        raw.len() == self.prefixes.len()
            && self.prefixes.iter().zip(raw).all(|(p, r)| p.as_str() == r)
    }

    /// Validate and insert `text`, then persist the sorted list.
    ///
    /// Nothing changes when the candidate is refused or the write fails.
    pub fn add(&mut self, text: &str) -> Result<Prefix, RegistryError> {
        let prefix = self.check_candidate(text)?;
        let count = prefix.entry_count();

        self.prefixes.insert(prefix.clone());
        self.total_entries += count;
        if let Err(e) = self.persist() {
            self.prefixes.remove(&prefix);
            self.total_entries -= count;
            log::error!("Rolled back add of {prefix}: {e}");
            return Err(e.into());
        }

        log::info!(
            "Added {prefix} (+{count} entries) => total {}",
            self.total_entries
        );
        Ok(prefix)
    }

    /// Remove `text` if stored. Returns whether anything was removed.
    pub fn remove(&mut self, text: &str) -> Result<bool, RegistryError> {
        let prefix = match Prefix::new(text) {
            Ok(p) if self.prefixes.contains(&p) => p,
            _ => {
                log::debug!("remove({text}) not stored, nothing to do");
                return Ok(false);
            }
        };

        let count = prefix.entry_count();
        self.prefixes.remove(&prefix);
        self.total_entries -= count;
        if let Err(e) = self.persist() {
            self.prefixes.insert(prefix.clone());
            self.total_entries += count;
            log::error!("Rolled back remove of {prefix}: {e}");
            return Err(e.into());
        }

        log::info!(
            "Removed {prefix} (-{count} entries) => total {}",
            self.total_entries
        );
        Ok(true)
    }

    /// First stored prefix, ascending, that starts with `candidate` or that
    /// `candidate` starts with.
    ///
    /// `candidate` may be partial input; an empty string matches nothing.
    /// The text is compared as given, callers normalise form input.
    pub fn conflicting_prefix(&self, candidate: &str) -> Option<&Prefix> {
        if candidate.is_empty() {
            return None;
        }
        self.prefixes.iter().find(|p| {
            p.as_str().starts_with(candidate) || candidate.starts_with(p.as_str())
        })
    }

    /// Why `add(text)` would fail, without changing anything.
    pub fn check_candidate(&self, text: &str) -> Result<Prefix, Rejection> {
        let prefix = Prefix::new(text).map_err(|e| Rejection::InvalidFormat(e.0))?;
        if self.prefixes.contains(&prefix) {
            return Err(Rejection::Duplicate(prefix));
        }
        if let Some(existing) = self.conflicting_prefix(prefix.as_str()) {
            return Err(Rejection::Conflict {
                existing: existing.clone(),
                candidate: prefix,
            });
        }
        let requested = prefix.entry_count();
        let available = self.remaining_entries();
        if requested > available {
            return Err(Rejection::BudgetExceeded {
                candidate: prefix,
                requested,
                available,
            });
        }
        Ok(prefix)
    }

    /// Live validation data for the add form.
    pub fn preview(&self, text: &str) -> Preview {
        let prefix = Prefix::new(text).ok();
        let entry_count = prefix.as_ref().map(Prefix::entry_count);
        Preview {
            candidate: text.to_string(),
            range: prefix.as_ref().map(Prefix::phone_number_range),
            conflicting: self.conflicting_prefix(text).cloned(),
            current_total: self.total_entries,
            total_after: entry_count.map(|c| self.total_entries + c),
            rejection: self.check_candidate(text).err(),
            entry_count,
            prefix,
        }
    }

    /// Sum of entry counts over all stored prefixes.
    pub fn current_total_entries(&self) -> u64 {
        self.total_entries
    }

    /// Entries still available under the ceiling.
    pub fn remaining_entries(&self) -> u64 {
        MAX_TOTAL_ENTRIES - self.total_entries
    }

    /// True when some stored prefix covers `number`.
    pub fn blocks_number(&self, number: u64) -> bool {
        let ranges: Vec<PhoneRange> = self.ranges().collect();
        let idx = ranges.partition_point(|r| r.end < number);
        ranges.get(idx).is_some_and(|r| r.contains(number))
    }

    pub fn contains(&self, text: &str) -> bool {
        Prefix::new(text).is_ok_and(|p| self.prefixes.contains(&p))
    }

    /// Stored prefixes, ascending.
    pub fn prefixes(&self) -> impl Iterator<Item = &Prefix> + '_ {
        self.prefixes.iter()
    }

    /// Ranges of the stored prefixes, ascending and disjoint.
    pub fn ranges(&self) -> impl Iterator<Item = PhoneRange> + '_ {
        self.prefixes.iter().map(Prefix::phone_number_range)
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let list: Vec<String> = self.prefixes.iter().map(|p| p.to_string()).collect();
        self.store.set_string_array(PREFIX_STORE_KEY, &list)
    }
}
