#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Output side of the toolchain: audit, munge, and reports.
//!
//! Consumes the primitive stream from `osm_wrangle_extract`, drives the
//! `osm_wrangle_street` engine over every auditable street string, and
//! emits the results: an anomaly ledger with its semicolon-delimited CSV
//! report, cleaned NDJSON records for downstream loading, and the tag-key
//! survey report.

pub mod audit;
pub mod fixups;
pub mod munge;
pub mod report;

pub use audit::{AuditError, AuditStats, audit_primitive, audit_stream};
pub use fixups::{FixupsError, RegionFixups};
pub use munge::{MungeError, munge_primitive, write_ndjson};
pub use report::{ReportError, write_anomaly_report, write_survey_report};
