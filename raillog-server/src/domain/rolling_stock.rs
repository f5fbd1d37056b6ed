//! Resolved rolling-stock assignment.

use std::collections::HashSet;
use std::fmt;

/// The train-set codes that operated a service, in report order.
///
/// Codes are deduplicated case-insensitively: the first spelling of a code
/// wins and later duplicates are dropped. Blank codes are ignored. An empty
/// value is a valid "no match" result.
#[derive(Debug, Clone, Default)]
pub struct RollingStock {
    units: Vec<String>,
    seen: HashSet<String>,
}

impl RollingStock {
    /// Create an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a unit code, skipping blanks and duplicates.
    pub fn push(&mut self, code: impl Into<String>) {
        let code: String = code.into();
        let code = code.trim();
        if code.is_empty() || !self.seen.insert(code.to_lowercase()) {
            return;
        }
        self.units.push(code.to_string());
    }

    /// Unit codes in first-occurrence order.
    pub fn units(&self) -> &[String] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl PartialEq for RollingStock {
    fn eq(&self, other: &Self) -> bool {
        self.units == other.units
    }
}

impl Eq for RollingStock {}

impl<S: Into<String>> FromIterator<S> for RollingStock {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut stock = Self::new();
        stock.extend(iter);
        stock
    }
}

impl<S: Into<String>> Extend<S> for RollingStock {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for code in iter {
            self.push(code);
        }
    }
}

impl fmt::Display for RollingStock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.units.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_casing_and_order() {
        let stock: RollingStock = ["CR400AF-0001", "cr400af-0001", "CR400AF-0002"]
            .into_iter()
            .collect();
        assert_eq!(stock.to_string(), "CR400AF-0001 CR400AF-0002");
    }

    #[test]
    fn lowercase_first_occurrence_wins() {
        let stock: RollingStock = ["crh380a-2541", "CRH380A-2541"].into_iter().collect();
        assert_eq!(stock.units(), ["crh380a-2541"]);
    }

    #[test]
    fn blank_codes_ignored() {
        let mut stock = RollingStock::new();
        stock.push("");
        stock.push("   ");
        assert!(stock.is_empty());
        stock.push(" HXD3C-0451 ");
        assert_eq!(stock.to_string(), "HXD3C-0451");
    }

    #[test]
    fn coupled_code_is_a_single_unit() {
        let stock: RollingStock = ["CRH380A CRH380A"].into_iter().collect();
        assert_eq!(stock.len(), 1);
        assert_eq!(stock.to_string(), "CRH380A CRH380A");
    }

    #[test]
    fn empty_displays_as_empty_string() {
        let stock = RollingStock::new();
        assert!(stock.is_empty());
        assert_eq!(stock.to_string(), "");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// No two retained units are equal ignoring case
        #[test]
        fn no_case_insensitive_duplicates(codes in prop::collection::vec("[a-dA-D]{1,3}", 0..20)) {
            let stock: RollingStock = codes.iter().cloned().collect();
            let lowered: HashSet<String> = stock.units().iter().map(|u| u.to_lowercase()).collect();
            prop_assert_eq!(lowered.len(), stock.len());
        }

        /// Retained units appear in the order they were first seen
        #[test]
        fn first_occurrence_order(codes in prop::collection::vec("[a-dA-D]{1,3}", 0..20)) {
            let stock: RollingStock = codes.iter().cloned().collect();
            let mut expected: Vec<String> = Vec::new();
            for code in &codes {
                if !expected.iter().any(|e| e.eq_ignore_ascii_case(code)) {
                    expected.push(code.clone());
                }
            }
            prop_assert_eq!(stock.units(), expected.as_slice());
        }
    }
}
