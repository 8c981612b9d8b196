#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Street-name grammar, canonicalization, and anomaly audit engine.
//!
//! Parses free-form street strings from an OSM extract into
//! `[direction prefix] base name [street type] [direction suffix]`
//! components, rewrites recognized abbreviations into canonical form, and
//! records everything outside the expected vocabulary into an
//! [`AnomalyLedger`].
//!
//! # Architecture
//!
//! - **Matcher** ([`grammar`]): tokenizer plus fixed positional
//!   decomposition; returns components or `None`, never an error.
//! - **Normalizer** ([`normalize`]): total lookup rewrites over the
//!   matched components, with anomaly recording as an independent side
//!   effect that never changes the canonical output.
//! - **State**: none. The [`Lexicon`] is immutable for the process
//!   lifetime and the [`AnomalyLedger`] is an explicit accumulator owned
//!   by the caller, so runs can be partitioned and merged.
//!
//! # Usage
//!
//! ```rust
//! use osm_wrangle_street::{AnomalyLedger, Lexicon, normalize};
//!
//! let lexicon = Lexicon::default();
//! let mut ledger = AnomalyLedger::new();
//! let canonical = normalize(&lexicon, "N Banana River Dr", None, &mut ledger);
//! assert_eq!(canonical, "North Banana River Drive");
//! assert_eq!(ledger.len(), 2); // abbreviated prefix + abbreviated type
//! ```

pub mod grammar;
pub mod ledger;
pub mod lexicon;
pub mod normalize;

pub use grammar::match_street;
pub use ledger::{AnomalyKey, AnomalyLedger, Correction};
pub use lexicon::{Lexicon, LexiconError};
pub use normalize::{canonical_string, clean, normalize};

pub use osm_wrangle_street_models::{AnomalyKind, ParsedStreet, SecondaryNames};
