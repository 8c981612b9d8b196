//! State and postcode correction tables for munged address records.
//!
//! Small identity-defaulting maps, grown from audit output the same way
//! the street lexicon was. `addr:state` and `addr:postcode` values are
//! rewritten through them during the munge pass.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

/// State values observed in the extract that need rewriting to the
/// two-letter code.
const STATES: &[(&str, &str)] = &[("Florida", "FL"), ("Fl", "FL")];

/// Postcode values observed in the extract that need stripping to the
/// bare ZIP.
const POSTCODES: &[(&str, &str)] = &[("FL 32904", "32904")];

/// Correction maps applied to `addr:state` and `addr:postcode`.
#[derive(Debug, Clone)]
pub struct RegionFixups {
    states: BTreeMap<String, String>,
    postcodes: BTreeMap<String, String>,
}

impl Default for RegionFixups {
    fn default() -> Self {
        Self {
            states: owned_map(STATES),
            postcodes: owned_map(POSTCODES),
        }
    }
}

impl RegionFixups {
    /// Loads fix-ups from a TOML document. A present `[states]` or
    /// `[postcodes]` section replaces the built-in table wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML.
    pub fn from_toml_str(doc: &str) -> Result<Self, FixupsError> {
        let config: FixupsConfig = toml::from_str(doc)?;
        let defaults = Self::default();
        Ok(Self {
            states: config.states.unwrap_or(defaults.states),
            postcodes: config.postcodes.unwrap_or(defaults.postcodes),
        })
    }

    /// Loads fix-ups from a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, FixupsError> {
        let doc = std::fs::read_to_string(path)?;
        Self::from_toml_str(&doc)
    }

    /// Rewrites a state value, or returns it unchanged.
    #[must_use]
    pub fn state<'a>(&'a self, value: &'a str) -> &'a str {
        self.states.get(value).map_or(value, String::as_str)
    }

    /// Rewrites a postcode value, or returns it unchanged.
    #[must_use]
    pub fn postcode<'a>(&'a self, value: &'a str) -> &'a str {
        self.postcodes.get(value).map_or(value, String::as_str)
    }
}

fn owned_map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// TOML shape of a fix-ups override.
#[derive(Debug, Default, Deserialize)]
struct FixupsConfig {
    states: Option<BTreeMap<String, String>>,
    postcodes: Option<BTreeMap<String, String>>,
}

/// Errors from loading region fix-ups.
#[derive(Debug, thiserror::Error)]
pub enum FixupsError {
    /// Config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
