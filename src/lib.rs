//! Facade crate for the street etymology cleaning tools.
//!
//! This crate re-exports the cleaning rules from `streets-core` and, behind
//! the `data` feature, the extraction and persistence adapters.

#![forbid(unsafe_code)]

pub use streets_core::{
    AcceptedStreet, AreaAssigner, AreaBoundingBox, AreaBoundsError, CleanedStreet,
    CleaningPipeline, CleaningReport, CleaningSummary, DedupOutcome, HighwayTypeTable,
    NormalizerConfig, RejectionReason, StreetDeduplicator, StreetNormalizer, StreetRecord,
    Verdict, tables,
};

#[cfg(feature = "serde")]
pub use streets_core::AreaTableError;

#[cfg(feature = "data")]
pub use streets_data::{
    OsNamesError, OsNamesExtract, OsmIngestError, OsmStreetReport, OsmStreetSummary,
    OverpassError, OverpassExtract, PersistStreetsError, ingest_osm_pbf_streets,
    parse_os_names_csv, parse_overpass_json, persist_streets_to_sqlite, read_os_names_csv,
    read_overpass_json,
};
