//! Streaming the blocked numbers into the host directory.
//!
//! The host runs the exporter in its own process, so each export rebuilds the
//! registry from the shared store instead of trusting any cached view.

use crate::host::{BlockingDirectory, DirectoryError};
use crate::models::PhoneRange;
use crate::registry::PrefixRegistry;
use crate::store::{KeyValueStore, StoreError};
use itertools::Itertools;
use std::fmt;
use std::time::{Duration, Instant};

/// How the host asked for the directory to be rebuilt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExportMode {
    /// The host starts from an empty directory.
    Full,
    /// The host keeps previous entries; clear them, then rebuild.
    Incremental,
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportMode::Full => write!(f, "full"),
            ExportMode::Incremental => write!(f, "incremental"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("could not read prefix list: {0}")]
    Store(#[from] StoreError),
    #[error("host directory failed: {0}")]
    Directory(#[from] DirectoryError),
    #[error("entry {number} does not follow {previous}; entries must be strictly ascending")]
    OutOfOrder { previous: u64, number: u64 },
}

/// Summary of a finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub mode: ExportMode,
    pub prefixes: usize,
    pub entries: u64,
    pub elapsed: Duration,
}

/// Every blocked number, ascending.
pub fn blocking_entries<S: KeyValueStore>(
    registry: &PrefixRegistry<S>,
) -> impl Iterator<Item = u64> + '_ {
    registry.ranges().flat_map(|r| r.numbers())
}

/// True when `ranges` are ascending and pairwise disjoint.
pub fn ranges_ascending(ranges: &[PhoneRange]) -> bool {
    ranges.iter().tuple_windows().all(|(a, b)| a.end < b.start)
}

/// Rebuild the registry from `store` and stream its numbers into `directory`.
///
/// The store is only read; entries that would break the registry invariants
/// are skipped. Host failures are logged and returned; nothing is retried.
pub fn export_to_directory<S, D>(
    store: S,
    directory: &mut D,
    mode: ExportMode,
) -> Result<ExportReport, ExportError>
where
    S: KeyValueStore,
    D: BlockingDirectory + ?Sized,
{
    let started = Instant::now();
    let registry = PrefixRegistry::load_readonly(store).map_err(|e| {
        log::error!("Export aborted, store unreadable: {e}");
        e
    })?;
    log::info!(
        "#Start {mode} export of {} prefixes, {} entries",
        registry.len(),
        registry.current_total_entries()
    );

    let entries = stream_entries(&registry, directory, mode).map_err(|e| {
        log::error!("Export failed: {e}");
        e
    })?;

    let report = ExportReport {
        mode,
        prefixes: registry.len(),
        entries,
        elapsed: started.elapsed(),
    };
    log::info!(
        "#End {mode} export: {} entries in {:?}",
        report.entries,
        report.elapsed
    );
    Ok(report)
}

fn stream_entries<S, D>(
    registry: &PrefixRegistry<S>,
    directory: &mut D,
    mode: ExportMode,
) -> Result<u64, ExportError>
where
    S: KeyValueStore,
    D: BlockingDirectory + ?Sized,
{
    if mode == ExportMode::Incremental {
        directory.remove_all_blocking_entries()?;
    }

    let mut previous: Option<u64> = None;
    let mut count: u64 = 0;
    for number in blocking_entries(registry) {
        if let Some(previous) = previous {
            if number <= previous {
                return Err(ExportError::OutOfOrder { previous, number });
            }
        }
        directory.add_blocking_entry(number)?;
        previous = Some(number);
        count += 1;
    }
    directory.complete()?;
    Ok(count)
}
