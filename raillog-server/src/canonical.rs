//! Rolling-stock model canonicalization.
//!
//! Providers report train-set models in whatever spelling they like
//! ("CR400AFZ", "CRH380AL2541", "HXD3C0451"). This module maps those onto a
//! fixed display form: `<family>-<variant>` for the model and
//! `<model>-<serial>` for an individual unit.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Known train-set families (multiple units and locomotives).
///
/// Longer names sharing a prefix with shorter ones are always probed first,
/// whatever order they are listed in here.
pub const DEFAULT_FAMILIES: &[&str] = &[
    // Fuxing multiple units
    "CR400AF", "CR400BF", "CR300AF", "CR300BF", "CR200J",
    // Hexie 380 series
    "CRH380AL", "CRH380A", "CRH380BL", "CRH380B", "CRH380CL", "CRH380D",
    // Earlier Hexie multiple units
    "CRH1A", "CRH1B", "CRH1E", "CRH2A", "CRH2B", "CRH2C", "CRH2E", "CRH3A", "CRH3C", "CRH5A",
    "CRH5G", "CRH6A", "CRH6F",
    // Electric locomotives
    "HXD1B", "HXD1C", "HXD1D", "HXD1", "HXD2B", "HXD2C", "HXD2", "HXD3B", "HXD3C", "HXD3D",
    "HXD3", "SS3B", "SS3", "SS4", "SS7E", "SS7", "SS8", "SS9",
    // Diesel locomotives
    "HXN3", "HXN5", "DF4B", "DF4D", "DF4", "DF7", "DF8B", "DF11", "NDJ3",
];

/// A unit identifier: family code (letters, digits, optional letter suffix)
/// immediately followed by a four digit serial.
static UNIT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]+[0-9]+[A-Z]*)([0-9]{4})$").expect("unit pattern is a valid regex")
});

/// What follows a known family in a unit identifier: optional variant
/// letters, then digits ending in the four digit serial. Digits before the
/// serial (build batch, year) are not part of the identity.
static SERIAL_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]*)[0-9]*([0-9]{4})$").expect("serial pattern is a valid regex")
});

/// Maps raw model codes onto canonical family names.
#[derive(Debug, Clone)]
pub struct ModelCanonicalizer {
    /// Families in probe order (longest first).
    families: Vec<String>,
}

impl ModelCanonicalizer {
    /// Create a canonicalizer over the given family table.
    ///
    /// Families are upper-cased and blank entries dropped. The probe order
    /// puts longer names first so that "CRH380A" never shadows "CRH380AL";
    /// names of equal length keep the order given.
    pub fn new<I, S>(families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut families: Vec<String> = families
            .into_iter()
            .map(|f| f.as_ref().trim().to_uppercase())
            .filter(|f| !f.is_empty())
            .collect();

        let mut seen = HashSet::new();
        families.retain(|f| seen.insert(f.clone()));
        families.sort_by_key(|f| Reverse(f.len()));

        Self { families }
    }

    /// Families in the order they are probed.
    pub fn families(&self) -> &[String] {
        &self.families
    }

    /// Canonicalize an upper-cased model prefix (unit serial already stripped).
    ///
    /// The first family that prefixes the input wins. An exact match is
    /// returned unchanged; otherwise the remainder becomes the variant,
    /// joined with a hyphen. Unknown models are returned unchanged.
    ///
    /// ```
    /// use raillog_server::canonical::ModelCanonicalizer;
    ///
    /// let canon = ModelCanonicalizer::default();
    /// assert_eq!(canon.canonicalize("CR400AF"), "CR400AF");
    /// assert_eq!(canon.canonicalize("CR400AFZ"), "CR400AF-Z");
    /// assert_eq!(canon.canonicalize("CRH380AL"), "CRH380AL");
    /// assert_eq!(canon.canonicalize("ZZ9"), "ZZ9");
    /// ```
    pub fn canonicalize(&self, raw: &str) -> String {
        for family in &self.families {
            let Some(variant) = raw.strip_prefix(family.as_str()) else {
                continue;
            };
            // Already canonical: exact family or "<family>-<variant>".
            if variant.is_empty() || variant.starts_with('-') {
                return raw.to_string();
            }
            return format!("{family}-{variant}");
        }
        raw.to_string()
    }

    /// Canonicalize a raw unit identifier such as "cr400af2018".
    ///
    /// The identifier is trimmed and upper-cased. After a known family, an
    /// optional variant and a run of digits may follow; the last four digits
    /// are the serial and any digits before them are dropped, so
    /// "cr400af20180001" becomes "CR400AF-0001". An unknown family code
    /// followed by exactly four digits is split the same way ("ABC1-2345").
    /// Anything else is returned normalized but otherwise unchanged.
    pub fn canonicalize_unit(&self, raw: &str) -> String {
        let normalized = raw.trim().to_uppercase();

        for family in &self.families {
            let Some(rest) = normalized.strip_prefix(family.as_str()) else {
                continue;
            };
            if let Some(caps) = SERIAL_SUFFIX.captures(rest) {
                let model = self.canonicalize(&format!("{family}{}", &caps[1]));
                return format!("{}-{}", model, &caps[2]);
            }
        }

        let Some(caps) = UNIT_PATTERN.captures(&normalized) else {
            return normalized;
        };

        let family = self.canonicalize(&caps[1]);
        format!("{}-{}", family, &caps[2])
    }
}

impl Default for ModelCanonicalizer {
    fn default() -> Self {
        Self::new(DEFAULT_FAMILIES)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn family() -> impl Strategy<Value = String> {
        prop::sample::select(DEFAULT_FAMILIES).prop_map(str::to_string)
    }

    proptest! {
        /// Canonicalizing twice equals canonicalizing once
        #[test]
        fn idempotent(family in family(), variant in "[A-Z]{0,3}") {
            let canon = ModelCanonicalizer::default();
            let once = canon.canonicalize(&format!("{family}{variant}"));
            prop_assert_eq!(canon.canonicalize(&once), once.clone());
        }

        /// The canonical form still starts with the family it was built from
        #[test]
        fn family_preserved(family in family(), variant in "[A-Z]{0,3}") {
            let canon = ModelCanonicalizer::default();
            let out = canon.canonicalize(&format!("{family}{variant}"));
            prop_assert!(out.starts_with(family.as_str()));
        }

        /// Unit canonicalization never panics and is upper-case
        #[test]
        fn unit_output_upper(raw in "[a-zA-Z0-9 ]{0,16}") {
            let out = ModelCanonicalizer::default().canonicalize_unit(&raw);
            prop_assert_eq!(out.to_uppercase(), out);
        }
    }
}
