//! Canonical rewriting and anomaly detection for matched street names.
//!
//! [`normalize`] is the audit entry point: it rewrites a raw street
//! string into canonical form and, as a side effect, records every
//! component that falls outside the expected vocabulary or disagrees with
//! TIGER secondary validation. [`clean`] is the same rewrite without the
//! bookkeeping, for the munge path. Anomaly detection never changes the
//! returned string.

use osm_wrangle_street_models::{AnomalyKind, ParsedStreet, SecondaryNames};

use crate::grammar::match_street;
use crate::ledger::AnomalyLedger;
use crate::lexicon::Lexicon;

/// Base name whose trailing letter suffixes are legitimate names
/// ("Avenue E", "Avenue N"), exempt from suffix anomaly recording.
const SUFFIX_EXEMPT_BASE: &str = "Avenue";

/// Offending value and correction pair recorded for unparseable input.
const NO_MATCH: &str = "nomatch";

/// Rewrites `input` into canonical form and records anomalies into
/// `ledger`.
///
/// Unparseable input is returned unchanged and recorded under the
/// `nomatch` category; there is no error path. When `secondary` is
/// supplied, the parsed base name and street type are cross-checked
/// against its first candidates.
pub fn normalize(
    lexicon: &Lexicon,
    input: &str,
    secondary: Option<&SecondaryNames>,
    ledger: &mut AnomalyLedger,
) -> String {
    let Some(parsed) = match_street(lexicon, input) else {
        ledger.record(AnomalyKind::NoMatch, NO_MATCH, input, input);
        return input.to_string();
    };

    let corrected = canonical_string(lexicon, &parsed);

    if !parsed.dir_prefix.is_empty() && !lexicon.is_expected_direction(&parsed.dir_prefix) {
        ledger.record(AnomalyKind::Prefix, parsed.dir_prefix.clone(), input, &corrected);
    }
    if !parsed.dir_suffix.is_empty()
        && !lexicon.is_expected_direction(&parsed.dir_suffix)
        && parsed.base_name != SUFFIX_EXEMPT_BASE
    {
        ledger.record(AnomalyKind::Suffix, parsed.dir_suffix.clone(), input, &corrected);
    }
    // Unconditional: an empty street type (trailing direction consumed the
    // only candidate) is recorded with offending value "".
    if !lexicon.is_expected_type(&parsed.street_type) {
        ledger.record(
            AnomalyKind::StreetType,
            parsed.street_type.clone(),
            input,
            &corrected,
        );
    }

    if let Some(secondary) = secondary {
        if let Some(candidate) = secondary.first_base() {
            if candidate != parsed.base_name {
                ledger.record(
                    AnomalyKind::TigerBase,
                    format!("{candidate}-{}", parsed.base_name),
                    input,
                    "",
                );
            }
        }
        if let Some(candidate) = secondary.first_type() {
            if lexicon.canonical_type(candidate) != lexicon.canonical_type(&parsed.street_type) {
                ledger.record(
                    AnomalyKind::TigerType,
                    format!("{candidate}-{}", parsed.street_type),
                    input,
                    "",
                );
            }
        }
    }

    corrected
}

/// Rewrites `input` into canonical form without recording anything.
/// Unparseable input is returned unchanged.
#[must_use]
pub fn clean(lexicon: &Lexicon, input: &str) -> String {
    match_street(lexicon, input).map_or_else(
        || input.to_string(),
        |parsed| canonical_string(lexicon, &parsed),
    )
}

/// Joins the lookup-rewritten, non-empty components with single spaces.
#[must_use]
pub fn canonical_string(lexicon: &Lexicon, parsed: &ParsedStreet) -> String {
    let components = [
        lexicon.canonical_direction(&parsed.dir_prefix),
        parsed.base_name.as_str(),
        lexicon.canonical_type(&parsed.street_type),
        lexicon.canonical_direction(&parsed.dir_suffix),
    ];
    components
        .iter()
        .copied()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> (String, AnomalyLedger) {
        let lexicon = Lexicon::default();
        let mut ledger = AnomalyLedger::new();
        let out = normalize(&lexicon, input, None, &mut ledger);
        (out, ledger)
    }

    #[test]
    fn abbreviated_type_is_expanded_and_flagged() {
        let (out, ledger) = run("Main St");
        assert_eq!(out, "Main Street");
        assert_eq!(ledger.len(), 1);
        let pairs = ledger.get(AnomalyKind::StreetType, "St").unwrap();
        assert!(pairs.contains(&("Main St".to_string(), "Main Street".to_string())));
    }

    #[test]
    fn canonical_input_records_nothing() {
        let (out, ledger) = run("Banana River Drive");
        assert_eq!(out, "Banana River Drive");
        assert!(ledger.is_empty());
    }

    #[test]
    fn abbreviated_prefix_and_type_both_flagged() {
        let (out, ledger) = run("N Banana River Dr");
        assert_eq!(out, "North Banana River Drive");
        assert!(ledger.get(AnomalyKind::Prefix, "N").is_some());
        assert!(ledger.get(AnomalyKind::StreetType, "Dr").is_some());
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn spelled_out_prefix_is_not_flagged() {
        let (out, ledger) = run("North Harbor City Blvd");
        assert_eq!(out, "North Harbor City Boulevard");
        assert!(ledger.get(AnomalyKind::Prefix, "North").is_none());
        assert!(ledger.get(AnomalyKind::StreetType, "Blvd").is_some());
    }

    #[test]
    fn avenue_suffix_exemption() {
        let (out, ledger) = run("Avenue E");
        assert_eq!(out, "Avenue East");
        // The suffix escapes recording, but the empty street type does not.
        assert!(ledger.get(AnomalyKind::Suffix, "E").is_none());
        assert!(ledger.get(AnomalyKind::StreetType, "").is_some());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn non_avenue_base_still_gets_suffix_anomaly() {
        let (out, ledger) = run("Boulevard E");
        assert_eq!(out, "Boulevard East");
        assert!(ledger.get(AnomalyKind::Suffix, "E").is_some());
        assert!(ledger.get(AnomalyKind::StreetType, "").is_some());
    }

    #[test]
    fn canonical_suffix_is_not_flagged() {
        let (out, ledger) = run("Main St East");
        assert_eq!(out, "Main Street East");
        assert!(ledger.get(AnomalyKind::Suffix, "East").is_none());
    }

    #[test]
    fn numeric_type_passes_through_with_anomaly() {
        let (out, ledger) = run("Highway 1");
        assert_eq!(out, "Highway 1");
        assert!(ledger.get(AnomalyKind::StreetType, "1").is_some());
    }

    #[test]
    fn no_match_passes_through_and_is_recorded() {
        let (out, ledger) = run("Gateway");
        assert_eq!(out, "Gateway");
        let pairs = ledger.get(AnomalyKind::NoMatch, "nomatch").unwrap();
        assert!(pairs.contains(&("Gateway".to_string(), "Gateway".to_string())));
    }

    #[test]
    fn normalize_is_idempotent_on_canonical_output() {
        let lexicon = Lexicon::default();
        let mut ledger = AnomalyLedger::new();
        let once = normalize(&lexicon, "N Banana River Dr", None, &mut ledger);
        let twice = normalize(&lexicon, &once, None, &mut ledger);
        assert_eq!(once, twice);
    }

    #[test]
    fn clean_matches_normalize_output_without_recording() {
        let lexicon = Lexicon::default();
        assert_eq!(clean(&lexicon, "N Banana River Dr"), "North Banana River Drive");
        assert_eq!(clean(&lexicon, "Gateway"), "Gateway");
    }

    #[test]
    fn tiger_base_disagreement() {
        let lexicon = Lexicon::default();
        let mut ledger = AnomalyLedger::new();
        let secondary = SecondaryNames {
            base: vec!["Banana River".to_string()],
            types: vec![],
        };
        normalize(&lexicon, "Banana Creek Dr", Some(&secondary), &mut ledger);
        let pairs = ledger
            .get(AnomalyKind::TigerBase, "Banana River-Banana Creek")
            .unwrap();
        // TIGER disagreements carry no corrected form.
        assert!(pairs.contains(&("Banana Creek Dr".to_string(), String::new())));
    }

    #[test]
    fn tiger_type_compares_canonical_forms() {
        let lexicon = Lexicon::default();
        let mut ledger = AnomalyLedger::new();
        // "St" and "Street" canonicalize identically: no disagreement.
        let agreeing = SecondaryNames {
            base: vec!["Main".to_string()],
            types: vec!["Street".to_string()],
        };
        normalize(&lexicon, "Main St", Some(&agreeing), &mut ledger);
        assert!(ledger.get(AnomalyKind::TigerType, "Street-St").is_none());

        // "Ave" canonicalizes to "Avenue", which disagrees with "Street".
        let disagreeing = SecondaryNames {
            base: vec!["Main".to_string()],
            types: vec!["Ave".to_string()],
        };
        normalize(&lexicon, "Main St", Some(&disagreeing), &mut ledger);
        assert!(ledger.get(AnomalyKind::TigerType, "Ave-St").is_some());
    }

    #[test]
    fn empty_secondary_candidates_check_nothing() {
        let lexicon = Lexicon::default();
        let mut ledger = AnomalyLedger::new();
        normalize(
            &lexicon,
            "Main St",
            Some(&SecondaryNames::default()),
            &mut ledger,
        );
        assert!(ledger.get(AnomalyKind::TigerBase, "").is_none());
        assert_eq!(ledger.len(), 1); // only the type anomaly
    }
}
