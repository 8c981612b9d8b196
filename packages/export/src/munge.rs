//! Munge pass: primitives to cleaned, line-delimited JSON records.
//!
//! Each primitive becomes one JSON object shaped for downstream loading:
//! element attributes with `lat`/`lon` folded into a GeoJSON point,
//! `addr:*` tags nested under one `addr` object with street/state/postcode
//! corrections applied, way name fields cleaned through the lexicon, and
//! node references / relation members carried as lists. Collections that
//! would be empty are omitted.

use std::io::Write;

use osm_wrangle_extract::reader::ExtractError;
use osm_wrangle_extract::{NAME_FIELDS, ProgressCallback};
use osm_wrangle_extract_models::{ElementKind, Primitive};
use osm_wrangle_street::{Lexicon, clean};
use serde_json::{Map, Value, json};

use crate::fixups::RegionFixups;

/// Errors from the munge pass.
#[derive(Debug, thiserror::Error)]
pub enum MungeError {
    /// The underlying extract stream failed.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Record serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Converts one primitive into its cleaned JSON record.
#[must_use]
pub fn munge_primitive(
    lexicon: &Lexicon,
    fixups: &RegionFixups,
    primitive: &Primitive,
) -> Value {
    let mut record = Map::new();
    record.insert(
        "primitive".to_string(),
        Value::String(primitive.kind.to_string()),
    );
    record.insert(
        "attrib".to_string(),
        Value::Object(munge_attrib(primitive)),
    );

    let tags = munge_tags(lexicon, fixups, primitive);
    if !tags.is_empty() {
        record.insert("tag".to_string(), Value::Object(tags));
    }

    if primitive.kind == ElementKind::Way && !primitive.nd_refs.is_empty() {
        record.insert("nd".to_string(), json!(primitive.nd_refs));
    }
    if primitive.kind == ElementKind::Relation && !primitive.members.is_empty() {
        record.insert("member".to_string(), json!(primitive.members));
    }

    Value::Object(record)
}

/// Copies element attributes, folding parseable `lat`/`lon` into a
/// GeoJSON `pos` point (`coordinates` ordered longitude, latitude).
fn munge_attrib(primitive: &Primitive) -> Map<String, Value> {
    let mut attrib = Map::new();
    for (key, value) in &primitive.attrib {
        if key == "lat" || key == "lon" {
            if let Ok(coord) = value.parse::<f64>() {
                let pos = attrib.entry("pos").or_insert_with(|| {
                    json!({"type": "Point", "coordinates": [0.0, 0.0]})
                });
                if let Some(coords) = pos.get_mut("coordinates").and_then(Value::as_array_mut) {
                    coords[usize::from(key == "lat")] = json!(coord);
                }
                continue;
            }
            log::warn!(
                "unparseable {key} {value:?} on {} {}: keeping the raw attribute",
                primitive.kind,
                primitive.id().unwrap_or("?"),
            );
        }
        attrib.insert(key.clone(), Value::String(value.clone()));
    }
    attrib
}

/// Copies tags, nesting `addr:*` parts under one corrected `addr` object
/// and cleaning way name fields through the lexicon.
fn munge_tags(
    lexicon: &Lexicon,
    fixups: &RegionFixups,
    primitive: &Primitive,
) -> Map<String, Value> {
    let mut tags = Map::new();
    let mut addr = Map::new();

    for (key, value) in &primitive.tags {
        if let Some(rest) = key.strip_prefix("addr:") {
            let part = rest.split(':').next().unwrap_or(rest);
            let corrected = match part {
                "street" => clean(lexicon, value),
                "state" => fixups.state(value).to_string(),
                "postcode" => fixups.postcode(value).to_string(),
                _ => value.clone(),
            };
            addr.insert(part.to_string(), Value::String(corrected));
        } else if primitive.kind == ElementKind::Way && NAME_FIELDS.contains(&key.as_str()) {
            tags.insert(key.clone(), Value::String(clean(lexicon, value)));
        } else {
            tags.insert(key.clone(), Value::String(value.clone()));
        }
    }

    if !addr.is_empty() {
        tags.insert("addr".to_string(), Value::Object(addr));
    }
    tags
}

/// Streams primitives to line-delimited JSON, one record per line.
///
/// Returns the number of records written.
///
/// # Errors
///
/// Returns an error if the stream yields one, or if serialization or the
/// sink fails.
pub fn write_ndjson<I, W>(
    lexicon: &Lexicon,
    fixups: &RegionFixups,
    primitives: I,
    mut writer: W,
    progress: &dyn ProgressCallback,
) -> Result<u64, MungeError>
where
    I: IntoIterator<Item = Result<Primitive, ExtractError>>,
    W: Write,
{
    let mut written = 0u64;
    for primitive in primitives {
        let record = munge_primitive(lexicon, fixups, &primitive?);
        serde_json::to_writer(&mut writer, &record)?;
        writer.write_all(b"\n")?;

        written += 1;
        progress.inc(1);
        if written.is_multiple_of(100_000) {
            log::info!("  munged {written} records...");
        }
    }
    writer.flush()?;
    Ok(written)
}
