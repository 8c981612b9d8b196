#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Streaming traversal of OSM XML extracts.
//!
//! Turns a raw `.osm` document into a stream of [`Primitive`] records and
//! provides the extract-side helpers the audit consumes: TIGER
//! secondary-validation wiring per way name field, and the tag-key
//! naming-convention survey.
//!
//! The reader never buffers the whole document; callers fold the
//! primitive stream into whatever accumulator they need (anomaly ledger,
//! key survey, NDJSON output).

pub mod keys;
pub mod progress;
pub mod reader;
pub mod tiger;

pub use keys::{KeyCategory, KeySurvey, classify_key};
pub use progress::{NullProgress, ProgressCallback, null_progress};
pub use reader::{ExtractError, OsmReader};
pub use tiger::{NAME_FIELDS, tiger_names};

pub use osm_wrangle_extract_models::{ElementKind, Member, Primitive};
