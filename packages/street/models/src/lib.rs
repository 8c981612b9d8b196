#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared types for the street-address audit engine.
//!
//! This crate contains only data types and simple accessors. The grammar,
//! lookup tables, and anomaly bookkeeping live in `osm_wrangle_street`.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The four positional components of a street name, as matched by the
/// grammar: `[direction prefix] base name [street type] [direction suffix]`.
///
/// Components hold the literal spelling from the input (original case, no
/// lookup applied). An empty string means the component was not present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedStreet {
    /// Leading compass token (e.g., "N", "North"), or empty.
    pub dir_prefix: String,
    /// The street's base name: 1-3 whitespace-joined tokens.
    pub base_name: String,
    /// The classifying type token (e.g., "St", "Drive"), or empty when a
    /// trailing direction token consumed the only candidate.
    pub street_type: String,
    /// Trailing compass token, or empty.
    pub dir_suffix: String,
}

/// Category of a recorded street-name anomaly.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum AnomalyKind {
    /// Direction prefix present but not in its canonical spelled-out form.
    #[serde(rename = "prefix")]
    #[strum(serialize = "prefix")]
    Prefix,
    /// Direction suffix present but not canonical (suppressed for
    /// "Avenue E"-style names).
    #[serde(rename = "suffix")]
    #[strum(serialize = "suffix")]
    Suffix,
    /// Street type outside the expected vocabulary.
    #[serde(rename = "type")]
    #[strum(serialize = "type")]
    StreetType,
    /// Parsed base name disagrees with the TIGER base-name candidate.
    #[serde(rename = "tiger:base")]
    #[strum(serialize = "tiger:base")]
    TigerBase,
    /// Canonicalized street type disagrees with the TIGER type candidate.
    #[serde(rename = "tiger:type")]
    #[strum(serialize = "tiger:type")]
    TigerType,
    /// Input did not match the street grammar at all.
    #[serde(rename = "nomatch")]
    #[strum(serialize = "nomatch")]
    NoMatch,
}

/// Secondary-validation candidates for one logical name field, sourced
/// from TIGER tags on a way.
///
/// Zero or more candidates per list; only the first of each is compared
/// against the parsed components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryNames {
    /// Expected base-name candidates (`tiger:name_base*`).
    pub base: Vec<String>,
    /// Expected street-type candidates (`tiger:name_type*`).
    pub types: Vec<String>,
}

impl SecondaryNames {
    /// The base-name candidate that gets compared, if any.
    #[must_use]
    pub fn first_base(&self) -> Option<&str> {
        self.base.first().map(String::as_str)
    }

    /// The street-type candidate that gets compared, if any.
    #[must_use]
    pub fn first_type(&self) -> Option<&str> {
        self.types.first().map(String::as_str)
    }

    /// `true` if there is nothing to validate against.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn anomaly_kind_renders_ledger_categories() {
        assert_eq!(AnomalyKind::Prefix.to_string(), "prefix");
        assert_eq!(AnomalyKind::StreetType.to_string(), "type");
        assert_eq!(AnomalyKind::TigerBase.to_string(), "tiger:base");
        assert_eq!(AnomalyKind::NoMatch.to_string(), "nomatch");
    }

    #[test]
    fn anomaly_kind_round_trips_from_str() {
        assert_eq!(
            AnomalyKind::from_str("tiger:type").unwrap(),
            AnomalyKind::TigerType
        );
        assert!(AnomalyKind::from_str("bogus").is_err());
    }

    #[test]
    fn secondary_names_first_candidates() {
        let names = SecondaryNames {
            base: vec!["Banana River".to_string()],
            types: vec![],
        };
        assert_eq!(names.first_base(), Some("Banana River"));
        assert_eq!(names.first_type(), None);
        assert!(!names.is_empty());
        assert!(SecondaryNames::default().is_empty());
    }
}
