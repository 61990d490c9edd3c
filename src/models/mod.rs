//! Domain models for the prefix blocklist.
//!
//! - [`Prefix`] - validated 3-6 digit NANP prefix
//! - [`PhoneRange`] - inclusive range of numbers a prefix covers

mod phone_range;
mod prefix;

// Re-export public types
pub use phone_range::{format_phone_number, PhoneRange};
pub use prefix::{
    entry_count, is_valid_area_code, is_valid_prefix, phone_number_range, InvalidPrefix, Prefix,
    MAX_PREFIX_LEN, MIN_PREFIX_LEN,
};
