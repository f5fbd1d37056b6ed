//! Train number (service identity) type.

use std::fmt;

use super::DomainError;

/// Service class letters accepted as the leading character of a train number.
const CLASS_LETTERS: &[u8] = b"GDCKZTSL";

/// A normalized train number.
///
/// Train numbers are trimmed and upper-cased on construction, so two numbers
/// compare equal regardless of how the user typed them. Any non-blank value
/// is accepted here; `is_well_formed` checks the stricter passenger format
/// (class letter or digit, then one to four digits, e.g. "G1", "D3202", "K123").
///
/// # Examples
///
/// ```
/// use raillog_server::domain::TrainNumber;
///
/// let number = TrainNumber::parse("  g1 ").unwrap();
/// assert_eq!(number.as_str(), "G1");
/// assert!(number.is_well_formed());
///
/// assert!(TrainNumber::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TrainNumber(String);

impl TrainNumber {
    /// Parse and normalize a train number.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let normalized = s.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(DomainError::BlankTrainNumber);
        }
        Ok(Self(normalized))
    }

    /// Parse a train number and require the passenger service format.
    pub fn parse_strict(s: &str) -> Result<Self, DomainError> {
        let number = Self::parse(s)?;
        if !number.is_well_formed() {
            return Err(DomainError::MalformedTrainNumber(number.0));
        }
        Ok(number)
    }

    /// Returns the normalized train number.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this number follows the passenger service format:
    /// a class letter (G, D, C, K, Z, T, S, L) or digit, followed by
    /// one to four digits.
    pub fn is_well_formed(&self) -> bool {
        let bytes = self.0.as_bytes();

        if !(2..=5).contains(&bytes.len()) {
            return false;
        }

        let lead = bytes[0];
        if !(lead.is_ascii_digit() || CLASS_LETTERS.contains(&lead)) {
            return false;
        }

        bytes[1..].iter().all(u8::is_ascii_digit)
    }

    /// Case-insensitive exact comparison against a raw provider value.
    ///
    /// The raw value is trimmed first. No prefix or partial matching.
    pub fn matches(&self, raw: &str) -> bool {
        raw.trim().to_uppercase() == self.0
    }
}

impl fmt::Debug for TrainNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainNumber({})", self.0)
    }
}

impl fmt::Display for TrainNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
