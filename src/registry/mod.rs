//! Blocked prefix registry.
//!
//! - [`PrefixRegistry`] - validated, overlap-free, budgeted prefix set
//! - [`Rejection`] / [`RegistryError`] - why an add was refused
//! - [`sanitize_prefixes`] - clean-up of a list read from storage

mod error;
mod prefix_registry;
mod sanitize;

pub use error::{RegistryError, Rejection};
pub use prefix_registry::{PrefixRegistry, Preview};
pub use sanitize::{sanitize_prefixes, Sanitized};
