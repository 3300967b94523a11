//! Error types emitted by the street cleaning CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use streets_core::AreaTableError;
use streets_data::{OsNamesError, OsmIngestError, OverpassError, PersistStreetsError};
use thiserror::Error;

use crate::{
    ARG_OS_NAMES, ARG_OSM_PBF, ARG_OVERPASS_JSON, ENV_OS_NAMES, ENV_OSM_PBF, ENV_OVERPASS_JSON,
};

/// Errors emitted by the street cleaning CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// No input was supplied after configuration merging.
    #[error(
        "no input given (set --{}, --{} or --{}, or {}, {} or {})",
        ARG_OVERPASS_JSON,
        ARG_OSM_PBF,
        ARG_OS_NAMES,
        ENV_OVERPASS_JSON,
        ENV_OSM_PBF,
        ENV_OS_NAMES
    )]
    MissingInput,
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The output directory exists but is not a directory.
    #[error("output directory {path:?} is not a directory")]
    OutputDirectoryNotDirectory { path: Utf8PathBuf },
    /// The output directory could not be inspected due to an IO error.
    #[error("failed to inspect output directory {path:?}: {source}")]
    InspectOutputDirectory {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The output directory could not be created.
    #[error("failed to create output directory {path:?}: {source}")]
    CreateOutputDirectory {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Reading the Overpass response failed.
    #[error("failed to read Overpass data: {0}")]
    Overpass(#[from] OverpassError),
    /// OSM extraction failed.
    #[error("failed to ingest OSM data: {0}")]
    OsmIngest(#[from] OsmIngestError),
    /// Reading the OS Open Names file failed.
    #[error("failed to read OS Open Names data: {0}")]
    OsNames(#[from] OsNamesError),
    /// Opening the area table failed.
    #[error("failed to open area table at {path:?}: {source}")]
    OpenAreaTable {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The area table could not be loaded.
    #[error("invalid area table at {path:?}: {source}")]
    InvalidAreaTable {
        path: Utf8PathBuf,
        #[source]
        source: AreaTableError,
    },
    /// Writing the JSON report failed.
    #[error("failed to write {path:?}: {source}")]
    WriteReport {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Serializing the JSON report failed.
    #[error("failed to serialize report to {path:?}: {source}")]
    SerializeReport {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Persisting streets to SQLite failed.
    #[error("failed to persist streets to {path:?}: {source}")]
    PersistStreets {
        path: Utf8PathBuf,
        #[source]
        source: PersistStreetsError,
    },
    /// Writing the summary line failed.
    #[error("failed to write summary: {0}")]
    WriteSummary(#[source] std::io::Error),
}
