//! TIGER secondary-validation extraction.
//!
//! Ways imported from the US Census TIGER dataset carry
//! `tiger:name_base`/`tiger:name_type` tags that independently restate
//! the street's base name and type. This module wires those candidates to
//! the way name fields they validate, so the audit can cross-check what
//! the `name` tags claim against what TIGER recorded.
//!
//! The wiring mirrors the original audit tooling: `name` and `old_name`
//! read the unsuffixed TIGER tags, `name_1` and `alt_name` read the `_1`
//! variants, and `name_2`/`name_3` have no TIGER source at all.

use std::collections::BTreeMap;

use osm_wrangle_extract_models::Primitive;
use osm_wrangle_street_models::SecondaryNames;

/// Way tag keys that hold auditable street names.
pub const NAME_FIELDS: &[&str] = &["name", "name_1", "name_2", "name_3", "old_name", "alt_name"];

/// Builds the secondary-validation candidates for each name field of a
/// way. Fields with no TIGER source map to empty candidate lists.
#[must_use]
pub fn tiger_names(primitive: &Primitive) -> BTreeMap<&'static str, SecondaryNames> {
    let base = candidates(primitive, "tiger:name_base");
    let types = candidates(primitive, "tiger:name_type");
    let base_1 = candidates(primitive, "tiger:name_base_1");
    let types_1 = candidates(primitive, "tiger:name_type_1");

    BTreeMap::from([
        (
            "name",
            SecondaryNames {
                base: base.clone(),
                types: types.clone(),
            },
        ),
        (
            "name_1",
            SecondaryNames {
                base: base_1.clone(),
                types: types_1.clone(),
            },
        ),
        (
            "alt_name",
            SecondaryNames {
                base: base_1,
                types: types_1,
            },
        ),
        ("name_2", SecondaryNames::default()),
        ("name_3", SecondaryNames::default()),
        ("old_name", SecondaryNames { base, types }),
    ])
}

fn candidates(primitive: &Primitive, key: &str) -> Vec<String> {
    primitive
        .tag(key)
        .map(|value| vec![value.to_string()])
        .unwrap_or_default()
}
