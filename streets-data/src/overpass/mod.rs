//! Street candidates from Overpass API JSON responses.
//!
//! Accepts the body returned by `[out:json]` queries such as
//! `way["highway"]["name"](area); out center;` or `out geom;`. Ways and
//! relations with a `name` tag become candidates. Nodes, other element types
//! and unnamed elements are counted and skipped.
//!
//! Coordinates are passed on exactly as the response gives them, half pairs
//! and out-of-range values included, so the normalizer can reject them.

use std::collections::HashMap;
use std::io::{BufReader, Read};

use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use log::{debug, info};
use serde::Deserialize;
use streets_core::StreetRecord;
use thiserror::Error;

use crate::geometry::representative_point;

/// Errors raised while reading Overpass JSON.
#[derive(Debug, Error)]
pub enum OverpassError {
    /// The response file could not be opened.
    #[error("failed to open Overpass response at {path}")]
    Open {
        /// Path that failed to open.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The response file is not a valid Overpass JSON document.
    #[error("failed to decode Overpass response at {path}")]
    DecodeFile {
        /// Path being decoded.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// A reader did not yield a valid Overpass JSON document.
    #[error("failed to decode Overpass response")]
    Decode {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Candidates and counts from one Overpass response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverpassExtract {
    /// Elements in the response.
    pub elements: usize,
    /// Nodes and other elements that are neither ways nor relations.
    pub not_ways: usize,
    /// Ways and relations without a `name` tag.
    pub unnamed: usize,
    /// Named ways and relations without any coordinate.
    pub unlocated: usize,
    /// Candidates in response order.
    pub streets: Vec<StreetRecord>,
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ElementKind {
    Node,
    Way,
    Relation,
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    kind: ElementKind,
    id: u64,
    #[serde(default)]
    tags: HashMap<String, String>,
    center: Option<LatLon>,
    #[serde(default)]
    geometry: Vec<Option<LatLon>>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
struct LatLon {
    lat: Option<f64>,
    lon: Option<f64>,
}

impl LatLon {
    fn coord(self) -> Option<Coord<f64>> {
        Some(Coord {
            x: self.lon?,
            y: self.lat?,
        })
    }
}

impl OverpassElement {
    const fn is_street_kind(&self) -> bool {
        matches!(self.kind, ElementKind::Way | ElementKind::Relation)
    }

    /// `center`, else the mean of `geometry`.
    ///
    /// A half-present point in either place is returned untouched.
    fn location(&self) -> LatLon {
        if let Some(center) = self.center {
            return center;
        }
        let mut points = Vec::with_capacity(self.geometry.len());
        for point in self.geometry.iter().flatten() {
            match point.coord() {
                Some(coord) => points.push(coord),
                None => return *point,
            }
        }
        representative_point(points).map_or_else(LatLon::default, |coord| LatLon {
            lat: Some(coord.y),
            lon: Some(coord.x),
        })
    }

    fn into_record(mut self) -> Option<StreetRecord> {
        let location = self.location();
        let name = self.tags.remove("name")?;
        let mut record = StreetRecord::new(name)
            .with_osm_id(self.id)
            .with_optional_coordinates(location.lat, location.lon);
        if let Some(highway) = self.tags.remove("highway") {
            record = record.with_highway_type(highway);
        }
        Some(record)
    }
}

/// Parse an Overpass JSON document from a reader.
///
/// # Examples
/// ```
/// use streets_data::parse_overpass_json;
///
/// let body = r#"{"elements": [
///     {"type": "way", "id": 1, "center": {"lat": 51.47, "lon": -0.069},
///      "tags": {"highway": "secondary", "name": "Rye Lane"}}
/// ]}"#;
/// let extract = parse_overpass_json(body.as_bytes())?;
/// assert_eq!(extract.streets[0].name, "Rye Lane");
/// # Ok::<(), streets_data::OverpassError>(())
/// ```
pub fn parse_overpass_json<R: Read>(reader: R) -> Result<OverpassExtract, OverpassError> {
    let response: Response = serde_json::from_reader(BufReader::new(reader))
        .map_err(|source| OverpassError::Decode { source })?;
    Ok(extract(response))
}

/// Read and parse an Overpass JSON response file.
pub fn read_overpass_json(path: &Utf8Path) -> Result<OverpassExtract, OverpassError> {
    let file = streets_fs::open_utf8_file(path).map_err(|source| OverpassError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let response: Response =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            OverpassError::DecodeFile {
                path: path.to_path_buf(),
                source,
            }
        })?;
    let outcome = extract(response);
    info!(
        "Read {} named ways and relations of {} elements from {path}",
        outcome.streets.len(),
        outcome.elements
    );
    Ok(outcome)
}

fn extract(response: Response) -> OverpassExtract {
    let mut outcome = OverpassExtract {
        elements: response.elements.len(),
        ..OverpassExtract::default()
    };
    for element in response.elements {
        let id = element.id;
        if !element.is_street_kind() {
            debug!("Skipped Overpass {:?} {id}", element.kind);
            outcome.not_ways += 1;
            continue;
        }
        match element.into_record() {
            Some(record) => {
                if record.latitude.is_none() && record.longitude.is_none() {
                    outcome.unlocated += 1;
                }
                outcome.streets.push(record);
            }
            None => {
                debug!("Skipped unnamed Overpass element {id}");
                outcome.unnamed += 1;
            }
        }
    }
    outcome
}
