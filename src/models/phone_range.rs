//! Inclusive range of national phone numbers.

use std::fmt;

/// Inclusive `start..=end` range of eleven digit numbers (country digit 1).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhoneRange {
    pub start: u64,
    pub end: u64,
}

impl PhoneRange {
    pub fn new(start: u64, end: u64) -> PhoneRange {
        assert!(start <= end, "start[{start}] > end[{end}] should never happen.");
        PhoneRange { start, end }
    }

    /// Number of entries in the range.
    pub fn count(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn contains(&self, number: u64) -> bool {
        self.start <= number && number <= self.end
    }

    /// Iterate every number in ascending order.
    pub fn numbers(&self) -> std::ops::RangeInclusive<u64> {
        self.start..=self.end
    }
}

impl fmt::Display for PhoneRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            format_phone_number(self.start),
            format_phone_number(self.end)
        )
    }
}

/// Render an eleven digit number as `+1 NPA-NXX-XXXX`.
///
/// Anything that is not eleven digits with a leading 1 is printed raw.
///
/// # Examples
/// ```
/// use prefix_blocklist::models::format_phone_number;
/// assert_eq!(format_phone_number(12125550123), "+1 212-555-0123");
/// ```
pub fn format_phone_number(number: u64) -> String {
    if !(10_000_000_000..20_000_000_000).contains(&number) {
        return number.to_string();
    }
    let national = number - 10_000_000_000;
    format!(
        "+1 {:03}-{:03}-{:04}",
        national / 10_000_000,
        national / 10_000 % 1_000,
        national % 10_000
    )
}
