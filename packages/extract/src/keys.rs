//! Tag-key survey.
//!
//! Classifies every tag key in an extract by naming convention so the
//! structuring decisions (which keys are plain, which are namespaced,
//! which need correction before export) can be made from a report rather
//! than by eyeballing the raw XML.
//!
//! ref: <http://taginfo.openstreetmap.org/reports/characters_in_keys>

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use osm_wrangle_extract_models::{ElementKind, Primitive};
use regex::Regex;
use strum_macros::{AsRefStr, Display, EnumString};

/// Keys in the common lower-case/underscore format.
static PLAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]([_a-z]*[a-z])*$").expect("valid regex"));

/// Common-format keys with one or more `:`-separated namespace segments.
static COLON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]([_a-z]*[a-z])*(:[a-z]([_a-z]*[a-z])*)+$").expect("valid regex")
});

/// Keys containing ASCII upper-case or numeric characters.
static UPPER_NUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z0-9]").expect("valid regex"));

/// Keys containing whitespace that may need replacing with `_`.
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]").expect("valid regex"));

/// Keys with characters that are problematic downstream (query syntax,
/// path separators, quoting).
static PROBLEMATIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[=\+/&<>;'"\?%#$@,\.\r\n]"#).expect("valid regex"));

/// Naming-convention class of a tag key.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum KeyCategory {
    /// Contains characters that break downstream tooling.
    Problematic,
    /// Contains spaces or tabs.
    Whitespace,
    /// Common format: lower-case letters and underscores.
    Plain,
    /// Common format with `:` namespace segments.
    Colon,
    /// Contains upper-case or numeric characters.
    UpperNum,
    /// None of the above.
    Rest,
}

/// Classifies a tag key. Checks run in severity order, so a key with both
/// problematic characters and whitespace lands in `Problematic`.
#[must_use]
pub fn classify_key(key: &str) -> KeyCategory {
    if PROBLEMATIC_RE.is_match(key) {
        KeyCategory::Problematic
    } else if WHITESPACE_RE.is_match(key) {
        KeyCategory::Whitespace
    } else if PLAIN_RE.is_match(key) {
        KeyCategory::Plain
    } else if COLON_RE.is_match(key) {
        KeyCategory::Colon
    } else if UPPER_NUM_RE.is_match(key) {
        KeyCategory::UpperNum
    } else {
        KeyCategory::Rest
    }
}

/// Survey key: category, element kind the key appeared on, and the key
/// itself.
pub type SurveyKey = (KeyCategory, ElementKind, String);

/// Accumulates the distinct values seen for every classified tag key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySurvey {
    entries: BTreeMap<SurveyKey, BTreeSet<String>>,
}

impl KeySurvey {
    /// Creates an empty survey.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one tag occurrence.
    pub fn record(&mut self, kind: ElementKind, key: &str, value: &str) {
        self.entries
            .entry((classify_key(key), kind, key.to_string()))
            .or_default()
            .insert(value.to_string());
    }

    /// Records every tag of a primitive.
    pub fn record_primitive(&mut self, primitive: &Primitive) {
        for (key, value) in &primitive.tags {
            self.record(primitive.kind, key, value);
        }
    }

    /// Merges another survey into this one.
    pub fn merge(&mut self, other: Self) {
        for (key, values) in other.entries {
            self.entries.entry(key).or_default().extend(values);
        }
    }

    /// Iterates entries in category/kind/key order.
    pub fn iter(&self) -> impl Iterator<Item = (&SurveyKey, &BTreeSet<String>)> {
        self.entries.iter()
    }

    /// Number of distinct `(category, kind, key)` entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct keys per category, for summary logging.
    #[must_use]
    pub fn counts_by_category(&self) -> BTreeMap<KeyCategory, usize> {
        let mut counts = BTreeMap::new();
        for (category, _, _) in self.entries.keys() {
            *counts.entry(*category).or_insert(0) += 1;
        }
        counts
    }
}
