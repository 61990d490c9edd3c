//! Host platform collaborators.
//!
//! - [`directory`] - blocking directory sinks the exporter writes to
//! - [`reload`] - asynchronous reload request
//! - [`shell`] - running the host command behind a reload

mod directory;
mod reload;
mod shell;

pub use directory::{BlockingDirectory, DirectoryError, FileDirectory, MemoryDirectory};
pub use reload::{request_reload, spawn_reload, ReloadOutcome};
pub use shell::{run, split_words};
