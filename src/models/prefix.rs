//! Blocked number prefix with NANP validation and range derivation.
//!
//! A [`Prefix`] is a 3 to 6 digit string whose first digit is 2-9. Three digits
//! name a whole area code, four to six digits narrow it down to part of an
//! exchange.

use super::PhoneRange;
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Shortest accepted prefix (a bare area code).
pub const MIN_PREFIX_LEN: usize = 3;
/// Longest accepted prefix.
pub const MAX_PREFIX_LEN: usize = 6;

/// Country digit plus ten national digits: 1 NPA NXX XXXX.
const COUNTRY_BASE: u64 = 10_000_000_000;
const AREA_CODE_STRIDE: u64 = 10_000_000;
/// Exchanges 000-199 are not assignable, so a bare area code starts at NXX 200.
const FIRST_VALID_EXCHANGE: u64 = 2_000_000;

static PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_prefix_regex() -> &'static Regex {
    PREFIX_REGEX.get_or_init(|| {
        let pattern = format!(
            "^[2-9][0-9]{{{},{}}}$",
            MIN_PREFIX_LEN - 1,
            MAX_PREFIX_LEN - 1
        );
        Regex::new(&pattern).expect("Invalid Regex")
    })
}

/// True iff `s` has 3-6 ASCII digits and starts with 2-9.
///
/// # Examples
/// ```
/// use prefix_blocklist::models::is_valid_prefix;
/// assert!(is_valid_prefix("212"));
/// assert!(is_valid_prefix("212555"));
/// assert!(!is_valid_prefix("112"));
/// ```
pub fn is_valid_prefix(s: &str) -> bool {
    get_prefix_regex().is_match(s)
}

/// True iff `s` is a valid prefix of exactly three digits.
pub fn is_valid_area_code(s: &str) -> bool {
    s.len() == MIN_PREFIX_LEN && is_valid_prefix(s)
}

/// Error returned when text is not a valid prefix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid prefix '{0}': expected 3-6 digits starting with 2-9")]
pub struct InvalidPrefix(pub String);

/// A validated blocked-number prefix.
///
/// Ordering is the textual ordering of the digits, which for non-overlapping
/// prefixes matches the ordering of their [`PhoneRange`]s.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Prefix(String);

impl Prefix {
    /// Validate `digits` and wrap it. Accepts exactly what [`is_valid_prefix`] accepts.
    pub fn new(digits: &str) -> Result<Prefix, InvalidPrefix> {
        if is_valid_prefix(digits) {
            Ok(Prefix(digits.to_string()))
        } else {
            Err(InvalidPrefix(digits.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digits, 3 to 6.
    pub fn digit_count(&self) -> usize {
        self.0.len()
    }

    /// The leading three digits.
    pub fn area_code(&self) -> u64 {
        digits_value(&self.0[..MIN_PREFIX_LEN])
    }

    /// True for a bare three digit area code.
    pub fn is_area_code(&self) -> bool {
        self.digit_count() == MIN_PREFIX_LEN
    }

    /// True when one prefix textually starts with the other.
    ///
    /// Identical prefixes overlap too.
    pub fn overlaps(&self, other: &Prefix) -> bool {
        self.0.starts_with(&other.0) || other.0.starts_with(&self.0)
    }

    /// Count of phone numbers this prefix blocks.
    pub fn entry_count(&self) -> u64 {
        let range = self.phone_number_range();
        range.end - range.start + 1
    }

    /// Inclusive range of national numbers (with country digit 1) covered.
    ///
    /// Digits after the area code are not checked against the 000-199
    /// exchange exclusion; "2121" covers 1-212-100-0000 .. 1-212-199-9999.
    pub fn phone_number_range(&self) -> PhoneRange {
        let base = COUNTRY_BASE + self.area_code() * AREA_CODE_STRIDE;
        if self.is_area_code() {
            return PhoneRange {
                start: base + FIRST_VALID_EXCHANGE,
                end: base + AREA_CODE_STRIDE - 1,
            };
        }
        let multiplier = self.block_size();
        let suffix = digits_value(&self.0[MIN_PREFIX_LEN..]);
        let start = base + suffix * multiplier;
        PhoneRange {
            start,
            end: start + multiplier - 1,
        }
    }

    /// Numbers spanned by one value of the last digit: 10^(10 - len).
    fn block_size(&self) -> u64 {
        10u64.pow((10 - self.digit_count()) as u32)
    }
}

/// Numeric value of a digit string already checked by the regex.
fn digits_value(digits: &str) -> u64 {
    digits
        .bytes()
        .fold(0, |acc, b| acc * 10 + u64::from(b - b'0'))
}

impl FromStr for Prefix {
    type Err = InvalidPrefix;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Prefix::new(s)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Prefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Prefix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Prefix {
    fn deserialize<D>(deserializer: D) -> Result<Prefix, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Prefix::new(&s).map_err(de::Error::custom)
    }
}

/// Entry count for raw text, or None if it is not a valid prefix.
pub fn entry_count(s: &str) -> Option<u64> {
    Prefix::new(s).ok().map(|p| p.entry_count())
}

/// Phone number range for raw text, or None if it is not a valid prefix.
pub fn phone_number_range(s: &str) -> Option<PhoneRange> {
    Prefix::new(s).ok().map(|p| p.phone_number_range())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Prefix {
        Prefix::new(s).unwrap()
    }

    #[test]
    fn test_is_valid_prefix() {
        assert!(is_valid_prefix("200"));
        assert!(is_valid_prefix("999999"));
        assert!(is_valid_prefix("2124"));
        assert!(!is_valid_prefix("20"));
        assert!(!is_valid_prefix("2000000"));
        assert!(!is_valid_prefix("012"));
        assert!(!is_valid_prefix("123"));
        assert!(!is_valid_prefix("21a"));
        assert!(!is_valid_prefix(""));
        assert!(!is_valid_prefix(" 212"));
        assert!(!is_valid_prefix("２１２"), "full width digits are not ASCII");
    }

    #[test]
    fn test_is_valid_area_code() {
        assert!(is_valid_area_code("212"));
        assert!(!is_valid_area_code("2124"));
        assert!(!is_valid_area_code("112"));
    }

    #[test]
    fn test_new_matches_is_valid_prefix() {
        for s in [" 415", "415 ", "\t212", "2124\n"] {
            assert!(!is_valid_prefix(s), "{s:?}");
            assert!(Prefix::new(s).is_err(), "{s:?}");
        }
        assert_eq!(p("415").digit_count(), 3);
        assert_eq!(
            Prefix::new("1415").unwrap_err().to_string(),
            "invalid prefix '1415': expected 3-6 digits starting with 2-9"
        );
    }

    #[test]
    fn test_phone_number_range_examples() {
        assert_eq!(
            p("212").phone_number_range(),
            PhoneRange::new(12122000000, 12129999999)
        );
        assert_eq!(
            p("2124").phone_number_range(),
            PhoneRange::new(12124000000, 12124999999)
        );
        assert_eq!(
            p("21245").phone_number_range(),
            PhoneRange::new(12124500000, 12124599999)
        );
        assert_eq!(
            p("212456").phone_number_range(),
            PhoneRange::new(12124560000, 12124569999)
        );
    }

    #[test]
    fn test_low_exchange_digits_not_excluded() {
        assert_eq!(
            p("2120").phone_number_range(),
            PhoneRange::new(12120000000, 12120999999)
        );
        assert_eq!(p("212012").entry_count(), 10_000);
    }

    #[test]
    fn test_entry_count() {
        assert_eq!(p("212").entry_count(), 8_000_000);
        assert_eq!(p("2124").entry_count(), 1_000_000);
        assert_eq!(p("21245").entry_count(), 100_000);
        assert_eq!(p("212456").entry_count(), 10_000);
        assert_eq!(entry_count("12"), None);
    }

    #[test]
    fn test_range_len_matches_entry_count() {
        for s in ["200", "999", "5551", "98765", "234567", "9999", "20000"] {
            let prefix = p(s);
            assert_eq!(prefix.phone_number_range().count(), prefix.entry_count(), "{s}");
        }
    }

    #[test]
    fn test_overlaps() {
        assert!(p("212").overlaps(&p("2124")));
        assert!(p("2124").overlaps(&p("212")));
        assert!(p("2124").overlaps(&p("2124")));
        assert!(!p("2124").overlaps(&p("2125")));
        assert!(!p("212").overlaps(&p("213")));
    }

    #[test]
    fn test_sorted_prefixes_give_sorted_ranges() {
        let mut prefixes = vec![p("213"), p("2125"), p("21249"), p("2124"), p("300999")];
        prefixes.sort();
        // "2124" and "21249" overlap; drop the narrower one
        prefixes.retain(|x| x.as_str() != "21249");
        let ranges: Vec<PhoneRange> = prefixes.iter().map(|x| x.phone_number_range()).collect();
        for pair in ranges.windows(2) {
            assert!(pair[0].end < pair[1].start, "{:?}", pair);
        }
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&p("2124")).unwrap();
        assert_eq!(json, "\"2124\"");
        let back: Prefix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p("2124"));
        assert!(serde_json::from_str::<Prefix>("\"0124\"").is_err());
    }
}
