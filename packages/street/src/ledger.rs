//! Accumulating anomaly ledger.
//!
//! A set-valued multi-map from `(category, offending value)` to the
//! `(original, corrected)` string pairs that exhibited it. The ledger is
//! an explicit accumulator owned by the caller's loop: one per audit run,
//! or one per partition merged afterwards. Entries have set semantics
//! (identical pairs collapse) and no ordering beyond the deterministic
//! BTree iteration used by the report writers.

use std::collections::{BTreeMap, BTreeSet};

use osm_wrangle_street_models::AnomalyKind;

/// One `(original, corrected)` pair recorded under a ledger key. The
/// corrected string is empty for the TIGER disagreement categories, which
/// do not compute one.
pub type Correction = (String, String);

/// Ledger key: anomaly category plus the offending literal value.
pub type AnomalyKey = (AnomalyKind, String);

/// Accumulator for every value that fell outside the expected vocabulary
/// or disagreed with secondary validation during one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnomalyLedger {
    entries: BTreeMap<AnomalyKey, BTreeSet<Correction>>,
}

impl AnomalyLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one anomaly occurrence. Duplicate `(original, corrected)`
    /// pairs under the same key collapse.
    pub fn record(
        &mut self,
        kind: AnomalyKind,
        value: impl Into<String>,
        original: &str,
        corrected: &str,
    ) {
        self.entries
            .entry((kind, value.into()))
            .or_default()
            .insert((original.to_string(), corrected.to_string()));
    }

    /// Merges another ledger into this one: union by key, set-union of
    /// values. Supports partition-per-worker fan-out.
    pub fn merge(&mut self, other: Self) {
        for (key, corrections) in other.entries {
            self.entries.entry(key).or_default().extend(corrections);
        }
    }

    /// Iterates keys and their correction sets in category/value order.
    pub fn iter(&self) -> impl Iterator<Item = (&AnomalyKey, &BTreeSet<Correction>)> {
        self.entries.iter()
    }

    /// The corrections recorded under one key, if any.
    #[must_use]
    pub fn get(&self, kind: AnomalyKind, value: &str) -> Option<&BTreeSet<Correction>> {
        self.entries.get(&(kind, value.to_string()))
    }

    /// Number of distinct `(category, value)` keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of recorded `(original, corrected)` pairs across all
    /// keys.
    #[must_use]
    pub fn total_corrections(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }
}

impl<'a> IntoIterator for &'a AnomalyLedger {
    type Item = (&'a AnomalyKey, &'a BTreeSet<Correction>);
    type IntoIter = std::collections::btree_map::Iter<'a, AnomalyKey, BTreeSet<Correction>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
