//! Audit driver over a primitive stream.
//!
//! Feeds every auditable street string in an extract through the
//! normalizer and folds the results into one [`AnomalyLedger`]:
//! `addr:street` tags on nodes and ways (no TIGER source exists for
//! these), and the way name fields cross-checked against their TIGER
//! candidates. Relations carry no auditable street names.

use osm_wrangle_extract::reader::ExtractError;
use osm_wrangle_extract::{NAME_FIELDS, ProgressCallback, tiger_names};
use osm_wrangle_extract_models::{ElementKind, Primitive};
use osm_wrangle_street::{AnomalyLedger, Lexicon, normalize};

/// Counters from one audit pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditStats {
    /// Nodes seen.
    pub nodes: u64,
    /// Ways seen.
    pub ways: u64,
    /// Relations seen (skipped by the audit).
    pub relations: u64,
    /// Street strings fed through the normalizer.
    pub streets_audited: u64,
}

impl AuditStats {
    /// Total primitives seen.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.nodes + self.ways + self.relations
    }
}

/// Errors from an audit pass.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// The underlying extract stream failed.
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Audits one primitive, returning how many street strings it contributed.
pub fn audit_primitive(
    lexicon: &Lexicon,
    primitive: &Primitive,
    ledger: &mut AnomalyLedger,
) -> u64 {
    if primitive.kind == ElementKind::Relation {
        return 0;
    }

    let mut audited = 0;
    if let Some(street) = primitive.tag("addr:street") {
        // No TIGER cross-validation is available for addr:street.
        normalize(lexicon, street, None, ledger);
        audited += 1;
    }

    if primitive.kind == ElementKind::Way {
        let tiger = tiger_names(primitive);
        for field in NAME_FIELDS {
            if let Some(name) = primitive.tag(field) {
                normalize(lexicon, name, tiger.get(*field), ledger);
                audited += 1;
            }
        }
    }

    audited
}

/// Folds a primitive stream into an anomaly ledger.
///
/// # Errors
///
/// Returns an error if the underlying stream yields one; the ledger
/// accumulated so far is discarded with it.
pub fn audit_stream<I>(
    lexicon: &Lexicon,
    primitives: I,
    progress: &dyn ProgressCallback,
) -> Result<(AnomalyLedger, AuditStats), AuditError>
where
    I: IntoIterator<Item = Result<Primitive, ExtractError>>,
{
    let mut ledger = AnomalyLedger::new();
    let mut stats = AuditStats::default();

    for primitive in primitives {
        let primitive = primitive?;
        match primitive.kind {
            ElementKind::Node => stats.nodes += 1,
            ElementKind::Way => stats.ways += 1,
            ElementKind::Relation => stats.relations += 1,
        }
        stats.streets_audited += audit_primitive(lexicon, &primitive, &mut ledger);

        progress.inc(1);
        if stats.total().is_multiple_of(100_000) {
            log::info!("  audited {} primitives...", stats.total());
        }
    }

    Ok((ledger, stats))
}
