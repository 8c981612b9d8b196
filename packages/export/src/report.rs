//! Semicolon-delimited CSV reports.
//!
//! Two flat exports meant for spreadsheet triage: the anomaly report
//! (one row per recorded correction pair) and the tag-key survey report
//! (one row per distinct key value). Rows come out in the accumulators'
//! deterministic iteration order.

use std::io::Write;

use osm_wrangle_extract::keys::KeySurvey;
use osm_wrangle_street::AnomalyLedger;

/// Errors from writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Output could not be flushed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes the anomaly ledger as `audit;value;address;corrected_address`
/// rows.
///
/// # Errors
///
/// Returns an error if the sink fails.
pub fn write_anomaly_report<W: Write>(
    ledger: &AnomalyLedger,
    writer: W,
) -> Result<(), ReportError> {
    let mut csv_writer = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);
    csv_writer.write_record(["audit", "value", "address", "corrected_address"])?;

    for ((kind, value), corrections) in ledger {
        for (original, corrected) in corrections {
            csv_writer.write_record([
                kind.as_ref(),
                value.as_str(),
                original.as_str(),
                corrected.as_str(),
            ])?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes the tag-key survey as `category;primitive;tag;value` rows.
///
/// # Errors
///
/// Returns an error if the sink fails.
pub fn write_survey_report<W: Write>(survey: &KeySurvey, writer: W) -> Result<(), ReportError> {
    let mut csv_writer = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);
    csv_writer.write_record(["category", "primitive", "tag", "value"])?;

    for ((category, kind, key), values) in survey.iter() {
        for value in values {
            csv_writer.write_record([
                category.as_ref(),
                kind.as_ref(),
                key.as_str(),
                value.as_str(),
            ])?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use osm_wrangle_extract::ElementKind;
    use osm_wrangle_street_models::AnomalyKind;

    use super::*;

    #[test]
    fn anomaly_report_rows() {
        let mut ledger = AnomalyLedger::new();
        ledger.record(AnomalyKind::StreetType, "St", "Main St", "Main Street");
        ledger.record(AnomalyKind::Prefix, "N", "N Main St", "North Main Street");
        ledger.record(AnomalyKind::TigerBase, "Maine-Main", "Main St", "");

        let mut sink = Vec::new();
        write_anomaly_report(&ledger, &mut sink).unwrap();

        let text = String::from_utf8(sink).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "audit;value;address;corrected_address");
        assert_eq!(lines.len(), 4);
        assert!(lines.contains(&"type;St;Main St;Main Street"));
        assert!(lines.contains(&"prefix;N;N Main St;North Main Street"));
        assert!(lines.contains(&"tiger:base;Maine-Main;Main St;"));
    }

    #[test]
    fn survey_report_rows() {
        let mut survey = KeySurvey::new();
        survey.record(ElementKind::Node, "addr:street", "Main St");
        survey.record(ElementKind::Way, "FIXME", "check this");

        let mut sink = Vec::new();
        write_survey_report(&survey, &mut sink).unwrap();

        let text = String::from_utf8(sink).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "category;primitive;tag;value");
        assert!(lines.contains(&"colon;node;addr:street;Main St"));
        assert!(lines.contains(&"uppernum;way;FIXME;check this"));
    }

    #[test]
    fn fields_with_delimiters_get_quoted() {
        let mut ledger = AnomalyLedger::new();
        ledger.record(
            AnomalyKind::NoMatch,
            "nomatch",
            "Odd; Name",
            "Odd; Name",
        );

        let mut sink = Vec::new();
        write_anomaly_report(&ledger, &mut sink).unwrap();
        let text = String::from_utf8(sink).unwrap();
        assert!(text.contains("\"Odd; Name\""));
    }
}
