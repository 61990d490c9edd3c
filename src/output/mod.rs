//! Output formatting for the blocklist.
//!
//! - [`csv`] - CSV listing of stored prefixes
//! - [`terminal`] - column formatting and preview text

mod csv;
mod terminal;

pub use csv::{prefix_csv, prefix_rows, PrefixRow};
pub use terminal::{format_field, format_preview};
