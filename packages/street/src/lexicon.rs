//! Street-type and directional lookup tables plus expected vocabularies.
//!
//! The abbreviation maps rewrite parsed components into their canonical
//! form; the expected sets define the vocabulary the audit flags
//! deviations from. Lookups are total: an unknown token maps to itself.
//!
//! A [`Lexicon`] is built once at startup (built-in defaults, optionally
//! overridden from a TOML config) and passed by reference into the
//! matcher and normalizer, so unit tests and parallel runs never share
//! ambient state.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;

/// Abbreviation/typo to canonical street type. Grown iteratively from
/// audit output over the source extract, so it carries dataset-specific
/// misspellings ("Causway", "Raod") alongside standard abbreviations.
const STREET_TYPES: &[(&str, &str)] = &[
    ("Aly", "Alley"),
    ("Av", "Avenue"),
    ("Ave", "Avenue"),
    ("Ave.", "Avenue"),
    ("Avenuen", "Avenue"),
    ("Aveue", "Avenue"),
    ("BLVD", "Boulevard"),
    ("Blvd", "Boulevard"),
    ("Brg", "Bridge"),
    ("Causway", "Causeway"),
    ("Cir", "Circle"),
    ("Cswy", "Causeway"),
    ("Ct", "Court"),
    ("Cv", "Cove"),
    ("Dr", "Drive"),
    ("Hts", "Heights"),
    ("Hwy", "Highway"),
    ("Kn", "Lane"),
    ("Ln", "Lane"),
    ("Pky", "Parkway"),
    ("Pl", "Place"),
    ("Plz", "Plaza"),
    ("Raod", "Road"),
    ("Rd", "Road"),
    ("Rd.", "Road"),
    ("Sq", "Square"),
    ("St", "Street"),
    ("St.", "Street"),
    ("Ter", "Terrace"),
    ("Terr", "Terrace"),
    ("Tr", "Trail"),
    ("Trce", "Trace"),
    ("Trl", "Trail"),
    ("Trls", "Trails"),
    ("ave", "Avenue"),
    ("court", "Court"),
    ("ln", "Lane"),
];

/// Compass abbreviation to spelled-out direction.
const DIRECTIONS: &[(&str, &str)] = &[
    ("N", "North"),
    ("S", "South"),
    ("E", "East"),
    ("W", "West"),
    ("NE", "Northeast"),
    ("SE", "Southeast"),
    ("SW", "Southwest"),
    ("NW", "Northwest"),
];

/// Canonical street types the audit does not flag.
const EXPECTED_TYPES: &[&str] = &[
    "Street", "Avenue", "Boulevard", "Drive", "Court", "Place", "Square", "Lane", "Road", "Trail",
    "Parkway", "Commons", "Circle", "Cove", "Creek", "Highway", "Causeway", "Lake", "Loop",
    "Manor", "Park", "Plaza", "Run", "Terrace", "Way", "Trace",
];

/// Canonical spelled-out directions the audit does not flag.
const EXPECTED_DIRECTIONS: &[&str] = &[
    "North",
    "South",
    "East",
    "West",
    "Northeast",
    "Southeast",
    "Southwest",
    "Northwest",
];

/// Immutable lookup tables and expected vocabularies for one audit run.
#[derive(Debug, Clone)]
pub struct Lexicon {
    street_types: BTreeMap<String, String>,
    directions: BTreeMap<String, String>,
    expected_types: BTreeSet<String>,
    expected_directions: BTreeSet<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            street_types: owned_map(STREET_TYPES),
            directions: owned_map(DIRECTIONS),
            expected_types: owned_set(EXPECTED_TYPES),
            expected_directions: owned_set(EXPECTED_DIRECTIONS),
        }
    }
}

impl Lexicon {
    /// Loads a lexicon from a TOML document. Each present section
    /// replaces the built-in table wholesale; absent sections keep the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML.
    pub fn from_toml_str(doc: &str) -> Result<Self, LexiconError> {
        let config: LexiconConfig = toml::from_str(doc)?;
        Ok(Self::from_config(config))
    }

    /// Loads a lexicon from a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let doc = std::fs::read_to_string(path)?;
        Self::from_toml_str(&doc)
    }

    fn from_config(config: LexiconConfig) -> Self {
        let defaults = Self::default();
        let expected = config.expected.unwrap_or_default();
        Self {
            street_types: config
                .street_types
                .unwrap_or(defaults.street_types),
            directions: config.directions.unwrap_or(defaults.directions),
            expected_types: expected
                .types
                .map_or(defaults.expected_types, |types| {
                    types.into_iter().collect()
                }),
            expected_directions: expected
                .directions
                .map_or(defaults.expected_directions, |directions| {
                    directions.into_iter().collect()
                }),
        }
    }

    /// Rewrites a street-type token to its canonical form, or returns it
    /// unchanged if no rule matches. Lookups are exact-case.
    #[must_use]
    pub fn canonical_type<'a>(&'a self, token: &'a str) -> &'a str {
        self.street_types.get(token).map_or(token, String::as_str)
    }

    /// Rewrites a direction token to its spelled-out form, or returns it
    /// unchanged if no rule matches. Lookups are exact-case.
    #[must_use]
    pub fn canonical_direction<'a>(&'a self, token: &'a str) -> &'a str {
        self.directions.get(token).map_or(token, String::as_str)
    }

    /// `true` if the literal token is a canonical street type.
    #[must_use]
    pub fn is_expected_type(&self, token: &str) -> bool {
        self.expected_types.contains(token)
    }

    /// `true` if the literal token is a canonical spelled-out direction.
    #[must_use]
    pub fn is_expected_direction(&self, token: &str) -> bool {
        self.expected_directions.contains(token)
    }

    /// `true` if the token is a direction abbreviation or its spelled-out
    /// form, compared case-insensitively. This is the membership test the
    /// grammar uses, so a reconfigured direction table reshapes matching
    /// and rewriting together.
    #[must_use]
    pub fn is_direction_token(&self, token: &str) -> bool {
        self.directions
            .iter()
            .any(|(abbrev, full)| {
                token.eq_ignore_ascii_case(abbrev) || token.eq_ignore_ascii_case(full)
            })
    }
}

fn owned_map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn owned_set(entries: &[&str]) -> BTreeSet<String> {
    entries.iter().map(|s| (*s).to_string()).collect()
}

/// TOML shape of a lexicon override file.
#[derive(Debug, Default, Deserialize)]
struct LexiconConfig {
    street_types: Option<BTreeMap<String, String>>,
    directions: Option<BTreeMap<String, String>>,
    expected: Option<ExpectedConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct ExpectedConfig {
    types: Option<Vec<String>>,
    directions: Option<Vec<String>>,
}

/// Errors from loading a lexicon config.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    /// Config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_known_abbreviations() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.canonical_type("St"), "Street");
        assert_eq!(lexicon.canonical_type("Cswy"), "Causeway");
        assert_eq!(lexicon.canonical_type("Raod"), "Road");
        assert_eq!(lexicon.canonical_direction("NE"), "Northeast");
    }

    #[test]
    fn unknown_tokens_pass_through() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.canonical_type("Esplanade"), "Esplanade");
        assert_eq!(lexicon.canonical_type("1"), "1");
        assert_eq!(lexicon.canonical_direction("Upward"), "Upward");
    }

    #[test]
    fn lookups_are_case_sensitive() {
        let lexicon = Lexicon::default();
        // "ave" and "Ave" are both keys; "AVE" is not.
        assert_eq!(lexicon.canonical_type("ave"), "Avenue");
        assert_eq!(lexicon.canonical_type("AVE"), "AVE");
        assert_eq!(lexicon.canonical_direction("n"), "n");
    }

    #[test]
    fn direction_membership_is_case_insensitive() {
        let lexicon = Lexicon::default();
        assert!(lexicon.is_direction_token("N"));
        assert!(lexicon.is_direction_token("n"));
        assert!(lexicon.is_direction_token("northeast"));
        assert!(!lexicon.is_direction_token("Main"));
    }

    #[test]
    fn expected_vocabularies() {
        let lexicon = Lexicon::default();
        assert!(lexicon.is_expected_type("Street"));
        assert!(lexicon.is_expected_type("Causeway"));
        assert!(!lexicon.is_expected_type("St"));
        assert!(!lexicon.is_expected_type(""));
        assert!(lexicon.is_expected_direction("North"));
        assert!(!lexicon.is_expected_direction("N"));
    }

    #[test]
    fn toml_section_replaces_table() {
        let lexicon = Lexicon::from_toml_str(
            r#"
            [street_types]
            Strasse = "Street"
            "#,
        )
        .unwrap();
        assert_eq!(lexicon.canonical_type("Strasse"), "Street");
        // Replaced wholesale: the built-in entries are gone.
        assert_eq!(lexicon.canonical_type("St"), "St");
        // Untouched sections keep their defaults.
        assert_eq!(lexicon.canonical_direction("N"), "North");
        assert!(lexicon.is_expected_type("Street"));
    }

    #[test]
    fn toml_expected_override() {
        let lexicon = Lexicon::from_toml_str(
            r#"
            [expected]
            types = ["Street"]
            "#,
        )
        .unwrap();
        assert!(lexicon.is_expected_type("Street"));
        assert!(!lexicon.is_expected_type("Avenue"));
        assert!(lexicon.is_expected_direction("North"));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(Lexicon::from_toml_str("[street_types").is_err());
    }
}
