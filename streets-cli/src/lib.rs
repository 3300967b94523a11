//! Command-line interface for the offline street cleaning tooling.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod clean;
mod error;

pub use error::CliError;

use clean::{CleanArgs, run_clean};

const ARG_OVERPASS_JSON: &str = "overpass-json";
const ARG_OSM_PBF: &str = "osm-pbf";
const ARG_OS_NAMES: &str = "os-names";
const ARG_AREAS: &str = "areas";
const ARG_OUTPUT_DIR: &str = "output-dir";
const ARG_KEEP_UNASSIGNED: &str = "keep-unassigned";
const ENV_OVERPASS_JSON: &str = "STREETS_CMDS_CLEAN_OVERPASS_JSON";
const ENV_OSM_PBF: &str = "STREETS_CMDS_CLEAN_OSM_PBF";
const ENV_OS_NAMES: &str = "STREETS_CMDS_CLEAN_OS_NAMES";

const STREETS_JSON: &str = "streets.json";
const STREETS_DB: &str = "streets.db";

/// Run the CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Clean(args) => run_clean(args).map(|_| ()),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "streets",
    about = "Offline cleaning of UK street-name extracts",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Normalize, place and deduplicate extracted streets.
    Clean(CleanArgs),
}

#[cfg(test)]
mod tests;
