//! Human-facing order numbers.

use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Errors from parsing an [`OrderNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderNumberError {
    #[error("order number must start with RT")]
    MissingPrefix,
    #[error("order number must be RT followed by 10 digits")]
    InvalidDigits,
}

/// An order number such as `RT4821937315`.
///
/// The format is `RT`, six digits taken from the creation time in
/// milliseconds, then four random digits in `1000..=9999`. Numbers are
/// short enough to read over the phone but are not guaranteed unique; the
/// database constraint is the final word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderNumber(String);

impl OrderNumber {
    const PREFIX: &'static str = "RT";
    const DIGITS: usize = 10;

    /// Generate a number from the current time and the thread RNG.
    #[must_use]
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis().unsigned_abs();
        let suffix = rand::rng().random_range(1000..=9999);
        Self::from_parts(millis, suffix)
    }

    /// Build a number from a Unix millisecond timestamp and a 4-digit suffix.
    ///
    /// Only the last six digits of `millis` are used.
    #[must_use]
    pub fn from_parts(millis: u64, suffix: u16) -> Self {
        Self(format!("{}{:06}{:04}", Self::PREFIX, millis % 1_000_000, suffix % 10_000))
    }

    /// Parse an existing order number.
    ///
    /// # Errors
    ///
    /// Returns [`OrderNumberError`] if the input is not `RT` plus 10 digits.
    pub fn parse(s: &str) -> Result<Self, OrderNumberError> {
        let digits = s
            .strip_prefix(Self::PREFIX)
            .ok_or(OrderNumberError::MissingPrefix)?;
        if digits.len() != Self::DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OrderNumberError::InvalidDigits);
        }
        Ok(Self(s.to_owned()))
    }

    /// The random suffix (last four digits).
    #[must_use]
    pub fn suffix(&self) -> u16 {
        self.0
            .get(self.0.len() - 4..)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for OrderNumber {
    type Error = OrderNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<OrderNumber> for String {
    fn from(value: OrderNumber) -> Self {
        value.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_format() {
        for _ in 0..50 {
            let number = OrderNumber::generate();
            let s = number.as_str();
            assert_eq!(s.len(), 12);
            assert!(s.starts_with("RT"));
            assert!(s[2..].bytes().all(|b| b.is_ascii_digit()));
            assert!((1000..=9999).contains(&number.suffix()));
        }
    }

    #[test]
    fn test_from_parts_uses_last_six_digits() {
        let number = OrderNumber::from_parts(1_718_000_123_456, 4821);
        assert_eq!(number.as_str(), "RT1234564821");
        assert_eq!(number.suffix(), 4821);
    }

    #[test]
    fn test_from_parts_pads_small_timestamps() {
        assert_eq!(OrderNumber::from_parts(42, 1000).as_str(), "RT0000421000");
    }

    #[test]
    fn test_parse() {
        assert!(OrderNumber::parse("RT1234564821").is_ok());
        assert_eq!(OrderNumber::parse("XX1234564821"), Err(OrderNumberError::MissingPrefix));
        assert_eq!(OrderNumber::parse("RT12345"), Err(OrderNumberError::InvalidDigits));
        assert_eq!(OrderNumber::parse("RT12345648a1"), Err(OrderNumberError::InvalidDigits));
    }

    #[test]
    fn test_serde() {
        let number: OrderNumber = serde_json::from_str("\"RT1234564821\"").unwrap();
        assert_eq!(serde_json::to_string(&number).unwrap(), "\"RT1234564821\"");
        assert!(serde_json::from_str::<OrderNumber>("\"RT1\"").is_err());
    }
}
