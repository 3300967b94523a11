//! Street candidates from the OS Open Names CSV export.
//!
//! Rows are read by header name, so the per-tile CSV files must carry the
//! header row from the product's `OS_Open_Names_Header.csv`. Only
//! `transportNetwork` features (named and numbered roads) become candidates.
//!
//! OS Open Names positions are British National Grid eastings and northings.
//! They are not projected to WGS84 here, so candidates carry no coordinates.
//! The `POSTCODE_DISTRICT` column is kept as the source district and lets the
//! pipeline place the street when the area table knows that code.

use std::io::{BufReader, Read};

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use serde::Deserialize;
use streets_core::StreetRecord;
use thiserror::Error;

/// Feature type carried by road rows.
const TRANSPORT_NETWORK: &str = "transportNetwork";

/// Errors raised while reading OS Open Names CSV data.
#[derive(Debug, Error)]
pub enum OsNamesError {
    /// The CSV file could not be opened.
    #[error("failed to open OS Open Names file at {path}")]
    Open {
        /// Path that failed to open.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A row in the file could not be decoded.
    #[error("failed to decode OS Open Names file at {path}")]
    DecodeFile {
        /// Path being decoded.
        path: Utf8PathBuf,
        /// Underlying CSV error, including the record position.
        #[source]
        source: csv::Error,
    },
    /// A reader did not yield valid OS Open Names CSV.
    #[error("failed to decode OS Open Names data")]
    Decode {
        /// Underlying CSV error, including the record position.
        #[source]
        source: csv::Error,
    },
}

/// Candidates and counts from one OS Open Names file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OsNamesExtract {
    /// Data rows in the file.
    pub rows: usize,
    /// Rows describing something other than a road.
    pub not_roads: usize,
    /// Road rows with neither `NAME1` nor `NAME2`.
    pub unnamed: usize,
    /// Candidates in file order.
    pub streets: Vec<StreetRecord>,
}

#[derive(Debug, Deserialize)]
struct OpenNamesRow {
    #[serde(rename = "ID", default)]
    id: Option<String>,
    #[serde(rename = "NAME1", default)]
    name1: Option<String>,
    #[serde(rename = "NAME2", default)]
    name2: Option<String>,
    #[serde(rename = "TYPE", default)]
    feature_type: Option<String>,
    #[serde(rename = "LOCAL_TYPE", default)]
    local_type: Option<String>,
    #[serde(rename = "POSTCODE_DISTRICT", default)]
    postcode_district: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

impl OpenNamesRow {
    fn is_road(&self) -> bool {
        self.feature_type.as_deref().map(str::trim) == Some(TRANSPORT_NETWORK)
    }

    /// `NAME1`, else the alternative-language `NAME2`.
    fn into_record(self) -> Option<StreetRecord> {
        let name = non_blank(self.name1).or_else(|| non_blank(self.name2))?;
        let mut record = StreetRecord::new(name);
        if let Some(local_type) = non_blank(self.local_type) {
            record = record.with_highway_type(local_type);
        }
        if let Some(district) = non_blank(self.postcode_district) {
            record = record.with_district(district.trim());
        }
        Some(record)
    }
}

/// Parse OS Open Names CSV, with a header row, from a reader.
///
/// # Examples
/// ```
/// use streets_data::parse_os_names_csv;
///
/// let body = "ID,NAME1,NAME2,TYPE,LOCAL_TYPE,POSTCODE_DISTRICT\n\
///             osgb4000000074813713,Rye Lane,,transportNetwork,Named Road,SE15\n";
/// let extract = parse_os_names_csv(body.as_bytes())?;
/// assert_eq!(extract.streets[0].name, "Rye Lane");
/// assert_eq!(extract.streets[0].district.as_deref(), Some("SE15"));
/// # Ok::<(), streets_data::OsNamesError>(())
/// ```
pub fn parse_os_names_csv<R: Read>(reader: R) -> Result<OsNamesExtract, OsNamesError> {
    extract(reader).map_err(|source| OsNamesError::Decode { source })
}

/// Read and parse an OS Open Names CSV file.
pub fn read_os_names_csv(path: &Utf8Path) -> Result<OsNamesExtract, OsNamesError> {
    let file = streets_fs::open_utf8_file(path).map_err(|source| OsNamesError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let outcome = extract(file).map_err(|source| OsNamesError::DecodeFile {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "Read {} named roads of {} OS Open Names rows from {path}",
        outcome.streets.len(),
        outcome.rows
    );
    Ok(outcome)
}

fn extract<R: Read>(reader: R) -> Result<OsNamesExtract, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(reader));
    let mut outcome = OsNamesExtract::default();
    for decoded in csv_reader.deserialize::<OpenNamesRow>() {
        let row = decoded?;
        outcome.rows += 1;
        if !row.is_road() {
            outcome.not_roads += 1;
            continue;
        }
        let id = row.id.clone();
        match row.into_record() {
            Some(record) => outcome.streets.push(record),
            None => {
                debug!("Skipped unnamed OS Open Names road {id:?}");
                outcome.unnamed += 1;
            }
        }
    }
    Ok(outcome)
}
