//! Street extraction from OSM PBF extracts.

use std::path::{Path, PathBuf};

use log::{info, warn};
use osmpbf::{Element, ElementReader};
use streets_core::StreetRecord;
use thiserror::Error;

mod accumulator;
mod ids;
mod tags;

use accumulator::OsmStreetAccumulator;

/// Counts of raw OSM elements seen during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OsmStreetSummary {
    /// Number of nodes discovered, including dense-node entries.
    pub nodes: u64,
    /// Number of ways discovered.
    pub ways: u64,
    /// Number of relations discovered.
    pub relations: u64,
    /// Ways tagged with both `highway` and `name`.
    pub street_ways: u64,
    /// Street ways none of whose nodes had usable coordinates.
    pub unlocated_streets: u64,
}

impl OsmStreetSummary {
    const fn combine(mut self, other: Self) -> Self {
        self.nodes += other.nodes;
        self.ways += other.ways;
        self.relations += other.relations;
        self.street_ways += other.street_ways;
        self.unlocated_streets += other.unlocated_streets;
        self
    }
}

/// Street candidates extracted from a PBF file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OsmStreetReport {
    /// Element counts.
    pub summary: OsmStreetSummary,
    /// One candidate per street way, ordered by way id.
    pub streets: Vec<StreetRecord>,
}

/// Errors returned when reading an OSM PBF file.
#[derive(Debug, Error)]
pub enum OsmIngestError {
    /// The file could not be opened.
    #[error("failed to open OSM PBF file at {path:?}")]
    Open {
        /// Underlying reader error.
        #[source]
        source: osmpbf::Error,
        /// Path that failed to open.
        path: PathBuf,
    },
    /// The file was opened but its blocks could not be decoded.
    #[error("failed to decode OSM PBF data at {path:?}")]
    Decode {
        /// Underlying decoder error.
        #[source]
        source: osmpbf::Error,
        /// Path being decoded.
        path: PathBuf,
    },
}

/// Extract named highway ways from an OSM PBF file.
///
/// Blocks are decoded in parallel. Way node coordinates are resolved with a
/// second sequential pass, so each street is placed at the mean of its nodes.
///
/// # Examples
/// ```no_run
/// use std::path::Path;
/// use streets_data::ingest_osm_pbf_streets;
///
/// # fn main() -> Result<(), streets_data::OsmIngestError> {
/// let report = ingest_osm_pbf_streets(Path::new("greater-london.osm.pbf"))?;
/// println!("Found {} named streets", report.streets.len());
/// # Ok(())
/// # }
/// ```
pub fn ingest_osm_pbf_streets(path: &Path) -> Result<OsmStreetReport, OsmIngestError> {
    let open_error = |source| OsmIngestError::Open {
        source,
        path: path.to_path_buf(),
    };
    let decode_error = |source| OsmIngestError::Decode {
        source,
        path: path.to_path_buf(),
    };

    let reader = ElementReader::from_path(path).map_err(open_error)?;
    let mut accumulator = reader
        .par_map_reduce(
            |element| {
                let mut accumulator = OsmStreetAccumulator::default();
                accumulator.process_element(element);
                accumulator
            },
            OsmStreetAccumulator::default,
            OsmStreetAccumulator::combine,
        )
        .map_err(decode_error)?;

    if accumulator.has_pending_nodes() {
        let resolver = ElementReader::from_path(path).map_err(open_error)?;
        {
            let accumulator_ref = &mut accumulator;
            resolver
                .for_each(|element| match element {
                    Element::Node(node) => {
                        accumulator_ref.resolve_pending_node(node.id(), node.lon(), node.lat());
                    }
                    Element::DenseNode(node) => {
                        accumulator_ref.resolve_pending_node(node.id(), node.lon(), node.lat());
                    }
                    Element::Way(_) | Element::Relation(_) => {}
                })
                .map_err(decode_error)?;
        }
        if accumulator.has_pending_nodes() {
            warn!(
                "Skipped {} way node references without coordinates",
                accumulator.pending_node_count()
            );
        }
    }

    let report = accumulator.into_report();
    info!(
        "Extracted {} street ways from {} ways in {}",
        report.summary.street_ways,
        report.summary.ways,
        path.display()
    );
    Ok(report)
}
