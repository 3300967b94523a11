//! Clean command implementation.

use std::io::{BufReader, BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use streets_core::{
    AreaAssigner, CleaningPipeline, CleaningReport, CleaningSummary, RejectionReason,
    StreetNormalizer, StreetRecord,
};
use streets_data::{
    ingest_osm_pbf_streets, persist_streets_to_sqlite, read_os_names_csv, read_overpass_json,
};

use crate::{
    ARG_AREAS, ARG_KEEP_UNASSIGNED, ARG_OS_NAMES, ARG_OSM_PBF, ARG_OUTPUT_DIR, ARG_OVERPASS_JSON,
    CliError, STREETS_DB, STREETS_JSON,
};

/// CLI arguments for the `clean` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "clean",
    long_about = "Read street candidates from an Overpass JSON response, an \
                 OSM PBF extract, an OS Open Names CSV file, or any mix of \
                 them. Reject placeholder and implausible \
                 names, place each street in an area, drop repeats and write \
                 streets.json and streets.db. Paths can come from CLI flags, \
                 configuration files, or environment variables.",
    about = "Clean extracted streets into local artefacts"
)]
#[ortho_config(prefix = "STREETS")]
pub(crate) struct CleanArgs {
    /// Path to a saved Overpass API JSON response.
    #[arg(long = ARG_OVERPASS_JSON, value_name = "path")]
    #[serde(default)]
    pub(crate) overpass_json: Option<Utf8PathBuf>,
    /// Path to an OpenStreetMap PBF extract.
    #[arg(long = ARG_OSM_PBF, value_name = "path")]
    #[serde(default)]
    pub(crate) osm_pbf: Option<Utf8PathBuf>,
    /// Path to an OS Open Names CSV file with a header row.
    #[arg(long = ARG_OS_NAMES, value_name = "path")]
    #[serde(default)]
    pub(crate) os_names: Option<Utf8PathBuf>,
    /// Area table JSON; defaults to the built-in SE London districts.
    #[arg(long = ARG_AREAS, value_name = "path")]
    #[serde(default)]
    pub(crate) areas: Option<Utf8PathBuf>,
    /// Directory receiving `streets.json` and `streets.db`.
    #[arg(long = ARG_OUTPUT_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) output_dir: Option<Utf8PathBuf>,
    /// Keep accepted streets that fall in no area.
    #[arg(long = ARG_KEEP_UNASSIGNED, action = ArgAction::SetTrue)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) keep_unassigned: bool,
}

impl CleanArgs {
    fn into_config(self) -> Result<CleanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CleanConfig::try_from(merged)
    }
}

/// Resolved `clean` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CleanConfig {
    pub(crate) overpass_json: Option<Utf8PathBuf>,
    pub(crate) osm_pbf: Option<Utf8PathBuf>,
    pub(crate) os_names: Option<Utf8PathBuf>,
    pub(crate) areas: Option<Utf8PathBuf>,
    pub(crate) output_dir: Utf8PathBuf,
    pub(crate) keep_unassigned: bool,
}

impl CleanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let inputs = [
            (self.overpass_json.as_deref(), ARG_OVERPASS_JSON),
            (self.osm_pbf.as_deref(), ARG_OSM_PBF),
            (self.os_names.as_deref(), ARG_OS_NAMES),
            (self.areas.as_deref(), ARG_AREAS),
        ];
        for (path, field) in inputs {
            if let Some(existing) = path {
                Self::require_existing(existing, field)?;
            }
        }
        self.require_output_dir()
    }

    /// A missing output directory is fine; it is created before writing.
    fn require_output_dir(&self) -> Result<(), CliError> {
        match streets_fs::dir_is_dir(&self.output_dir) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::OutputDirectoryNotDirectory {
                path: self.output_dir.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CliError::InspectOutputDirectory {
                path: self.output_dir.clone(),
                source,
            }),
        }
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match streets_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub(crate) fn json_path(&self) -> Utf8PathBuf {
        self.output_dir.join(STREETS_JSON)
    }

    pub(crate) fn db_path(&self) -> Utf8PathBuf {
        self.output_dir.join(STREETS_DB)
    }
}

impl TryFrom<CleanArgs> for CleanConfig {
    type Error = CliError;

    fn try_from(args: CleanArgs) -> Result<Self, Self::Error> {
        if args.overpass_json.is_none() && args.osm_pbf.is_none() && args.os_names.is_none() {
            return Err(CliError::MissingInput);
        }
        Ok(Self {
            overpass_json: args.overpass_json,
            osm_pbf: args.osm_pbf,
            os_names: args.os_names,
            areas: args.areas,
            output_dir: args.output_dir.unwrap_or_else(|| Utf8PathBuf::from(".")),
            keep_unassigned: args.keep_unassigned,
        })
    }
}

pub(crate) fn resolve_clean_config(args: CleanArgs) -> Result<CleanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

pub(super) fn run_clean(args: CleanArgs) -> Result<CleaningSummary, CliError> {
    let mut stdout = std::io::stdout().lock();
    let config = resolve_clean_config(args)?;
    execute_clean(&config, &mut stdout)
}

/// Run a resolved configuration, writing artefacts and the summary line.
pub(crate) fn execute_clean(
    config: &CleanConfig,
    writer: &mut dyn Write,
) -> Result<CleaningSummary, CliError> {
    let candidates = gather_candidates(config)?;
    let assigner = load_area_table(config.areas.as_deref())?;
    let report = CleaningPipeline::new(StreetNormalizer::default(), assigner)
        .keep_unassigned(config.keep_unassigned)
        .run(candidates);

    streets_fs::ensure_dir(&config.output_dir).map_err(|source| {
        CliError::CreateOutputDirectory {
            path: config.output_dir.clone(),
            source,
        }
    })?;
    write_report(&config.json_path(), &report)?;
    let db_path = config.db_path();
    persist_streets_to_sqlite(&db_path, &report.streets).map_err(|source| {
        CliError::PersistStreets {
            path: db_path.clone(),
            source,
        }
    })?;

    writeln!(writer, "{}", format_summary(&report.summary)).map_err(CliError::WriteSummary)?;
    Ok(report.summary)
}

/// Overpass candidates first, then PBF candidates, then OS Open Names rows.
fn gather_candidates(config: &CleanConfig) -> Result<Vec<StreetRecord>, CliError> {
    let mut candidates = Vec::new();
    if let Some(path) = &config.overpass_json {
        candidates.extend(read_overpass_json(path)?.streets);
    }
    if let Some(path) = &config.osm_pbf {
        candidates.extend(ingest_osm_pbf_streets(path.as_std_path())?.streets);
    }
    if let Some(path) = &config.os_names {
        candidates.extend(read_os_names_csv(path)?.streets);
    }
    info!("Gathered {} street candidates", candidates.len());
    Ok(candidates)
}

pub(crate) fn load_area_table(path: Option<&Utf8Path>) -> Result<AreaAssigner, CliError> {
    let Some(table) = path else {
        return Ok(AreaAssigner::se_london());
    };
    let file = streets_fs::open_utf8_file(table).map_err(|source| CliError::OpenAreaTable {
        path: table.to_path_buf(),
        source,
    })?;
    AreaAssigner::from_json_reader(BufReader::new(file)).map_err(|source| {
        CliError::InvalidAreaTable {
            path: table.to_path_buf(),
            source,
        }
    })
}

fn write_report(path: &Utf8Path, report: &CleaningReport) -> Result<(), CliError> {
    let write_error = |source| CliError::WriteReport {
        path: path.to_path_buf(),
        source,
    };
    let file = streets_fs::create_utf8_file(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report).map_err(|source| {
        CliError::SerializeReport {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.write_all(b"\n").map_err(write_error)?;
    writer.flush().map_err(write_error)
}

/// One-line run summary such as
/// `candidates=5 accepted=4 rejected=1 (too_short=1) unassigned=2 duplicates=1 written=1`.
pub(crate) fn format_summary(summary: &CleaningSummary) -> String {
    let reasons: Vec<String> = RejectionReason::ALL
        .iter()
        .filter_map(|reason| {
            let count = summary.rejected_for(*reason);
            (count > 0).then(|| format!("{reason}={count}"))
        })
        .collect();
    let breakdown = if reasons.is_empty() {
        String::new()
    } else {
        format!(" ({})", reasons.join(" "))
    };
    format!(
        "candidates={} accepted={} rejected={}{breakdown} unassigned={} duplicates={} written={}",
        summary.candidates,
        summary.accepted,
        summary.rejected_total(),
        summary.unassigned,
        summary.duplicates,
        summary.retained
    )
}
