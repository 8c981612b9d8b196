#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the OSM street-address audit and munge toolchain.
//!
//! Three passes over an OSM XML extract, each streaming primitives
//! through `osm_wrangle_extract`:
//!
//! - `audit` runs every street name through the normalizer and writes the
//!   anomaly report;
//! - `munge` applies the corrections and emits newline-delimited JSON for
//!   downstream loading;
//! - `survey` classifies tag keys by naming convention.
//!
//! Uses `indicatif-log-bridge` (via [`osm_wrangle_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and progress bars never fight for the terminal.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use osm_wrangle_cli_utils::{IndicatifProgress, MultiProgress};
use osm_wrangle_export::{
    RegionFixups, audit_stream, write_anomaly_report, write_ndjson, write_survey_report,
};
use osm_wrangle_extract::{KeySurvey, OsmReader, ProgressCallback as _};
use osm_wrangle_street::Lexicon;

#[derive(Parser)]
#[command(name = "osm_wrangle", about = "OSM street-address audit and munge toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit street names and write the anomaly report
    Audit {
        /// Path to the `.osm` XML extract
        osm_file: PathBuf,
        /// Output path for the anomaly CSV
        #[arg(long, default_value = "addrval.csv")]
        report: PathBuf,
        /// TOML config overriding the built-in lexicon tables
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Clean street addresses and emit newline-delimited JSON
    Munge {
        /// Path to the `.osm` XML extract
        osm_file: PathBuf,
        /// Output path; defaults to the extract path with an `.ndjson`
        /// extension
        #[arg(long)]
        out: Option<PathBuf>,
        /// TOML config overriding the built-in lexicon and fix-up tables
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Classify tag keys by naming convention and write the survey report
    Survey {
        /// Path to the `.osm` XML extract
        osm_file: PathBuf,
        /// Output path for the survey CSV
        #[arg(long, default_value = "tagkeyval.csv")]
        report: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = osm_wrangle_cli_utils::init_logger();
    let cli = Cli::parse();

    match cli.command {
        Commands::Audit {
            osm_file,
            report,
            config,
        } => audit(&multi, &osm_file, &report, config.as_deref()),
        Commands::Munge {
            osm_file,
            out,
            config,
        } => {
            let out = out.unwrap_or_else(|| osm_file.with_extension("ndjson"));
            munge(&multi, &osm_file, &out, config.as_deref())
        }
        Commands::Survey { osm_file, report } => survey(&multi, &osm_file, &report),
    }
}

fn load_lexicon(config: Option<&Path>) -> Result<Lexicon, osm_wrangle_street::LexiconError> {
    config.map_or_else(|| Ok(Lexicon::default()), Lexicon::from_toml_file)
}

/// Streams the extract through the audit and writes the anomaly report.
fn audit(
    multi: &MultiProgress,
    osm_file: &Path,
    report: &Path,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let lexicon = load_lexicon(config)?;
    log::info!("Auditing street names in {}", osm_file.display());

    let reader = OsmReader::from_path(osm_file)?;
    let progress = IndicatifProgress::records_bar(multi, "Auditing primitives");
    let (ledger, stats) = audit_stream(&lexicon, reader, progress.as_ref())?;
    progress.finish(format!(
        "audited {} street names in {} primitives",
        stats.streets_audited,
        stats.total()
    ));

    write_anomaly_report(&ledger, BufWriter::new(File::create(report)?))?;
    log::info!(
        "{} anomaly values ({} corrections) written to {}",
        ledger.len(),
        ledger.total_corrections(),
        report.display()
    );
    Ok(())
}

/// Streams the extract through the cleaner and emits NDJSON records.
fn munge(
    multi: &MultiProgress,
    osm_file: &Path,
    out: &Path,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let lexicon = load_lexicon(config)?;
    let fixups = config.map_or_else(
        || Ok(RegionFixups::default()),
        RegionFixups::from_toml_file,
    )?;
    log::info!("Munging {} to {}", osm_file.display(), out.display());

    let reader = OsmReader::from_path(osm_file)?;
    let progress = IndicatifProgress::records_bar(multi, "Munging primitives");
    let written = write_ndjson(
        &lexicon,
        &fixups,
        reader,
        BufWriter::new(File::create(out)?),
        progress.as_ref(),
    )?;
    progress.finish(format!("munged {written} records"));

    log::info!("{} records written to {}", written, out.display());
    Ok(())
}

/// Streams the extract through the tag-key survey and writes the report.
fn survey(
    multi: &MultiProgress,
    osm_file: &Path,
    report: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Surveying tag keys in {}", osm_file.display());

    let reader = OsmReader::from_path(osm_file)?;
    let progress = IndicatifProgress::records_bar(multi, "Surveying primitives");
    let mut key_survey = KeySurvey::new();
    let mut primitives = 0u64;
    for primitive in reader {
        key_survey.record_primitive(&primitive?);
        primitives += 1;
        progress.inc(1);
    }
    progress.finish(format!("surveyed {primitives} primitives"));

    for (category, count) in key_survey.counts_by_category() {
        log::info!("  {category}: {count} distinct keys");
    }
    write_survey_report(&key_survey, BufWriter::new(File::create(report)?))?;
    log::info!(
        "{} distinct keys written to {}",
        key_survey.len(),
        report.display()
    );
    Ok(())
}
