//! Extraction and persistence glue for the street cleaning pipeline.
//!
//! Responsibilities:
//! - Turn Overpass JSON responses, OSM PBF extracts and OS Open Names CSV
//!   files into raw [`StreetRecord`](streets_core::StreetRecord) candidates.
//! - Write cleaned streets to the SQLite artefact consumed by import tooling.
//!
//! Boundaries:
//! - Do not encode cleaning rules (they live in `streets-core`).
//! - No network access; every input is a local file or reader.

#![forbid(unsafe_code)]

mod geometry;
pub mod os_names;
pub mod osm;
pub mod overpass;
pub mod sqlite;

pub use os_names::{OsNamesError, OsNamesExtract, parse_os_names_csv, read_os_names_csv};
pub use osm::{OsmIngestError, OsmStreetReport, OsmStreetSummary, ingest_osm_pbf_streets};
pub use overpass::{OverpassError, OverpassExtract, parse_overpass_json, read_overpass_json};
pub use sqlite::{PersistStreetsError, persist_streets_to_sqlite};
