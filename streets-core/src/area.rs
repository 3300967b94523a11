//! Assign coordinates to named areas using rectangular bounds.
//!
//! Bounds are hand-authored approximations and may overlap. The assigner
//! scans its table in order and returns the first area whose rectangle
//! contains the point, with all four edges inclusive.

use geo::{Coord, Rect};
use thiserror::Error;

use crate::tables::{DistrictBounds, SE_LONDON_COUNTY, SE_LONDON_DISTRICTS, SE_LONDON_POST_TOWN};

/// Inclusive containment check for a WGS84 coordinate.
pub(crate) fn rect_covers(rect: &Rect<f64>, coord: Coord<f64>) -> bool {
    let min = rect.min();
    let max = rect.max();
    (min.x..=max.x).contains(&coord.x) && (min.y..=max.y).contains(&coord.y)
}

/// A named rectangular area.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaBoundingBox {
    code: String,
    bounds: Rect<f64>,
    borough: Option<String>,
    county: Option<String>,
    post_town: Option<String>,
}

/// Errors returned by [`AreaBoundingBox::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AreaBoundsError {
    /// The area code was empty or whitespace.
    #[error("area code must not be empty")]
    EmptyCode,
    /// One of the edges was NaN or infinite.
    #[error("area {code} has a non-finite edge")]
    NonFinite {
        /// Offending area code.
        code: String,
    },
    /// South lies above north or west lies east of east.
    #[error("area {code} has inverted edges")]
    Inverted {
        /// Offending area code.
        code: String,
    },
}

impl AreaBoundingBox {
    /// Validate edges and build an area.
    ///
    /// # Errors
    /// Returns [`AreaBoundsError`] when the code is blank, an edge is not
    /// finite, or the edges are inverted.
    ///
    /// # Examples
    /// ```
    /// use streets_core::AreaBoundingBox;
    ///
    /// # fn main() -> Result<(), streets_core::AreaBoundsError> {
    /// let area = AreaBoundingBox::new("A1", 51.49, -0.11, 51.50, -0.09)?;
    /// assert!(area.contains(51.495, -0.10));
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        code: impl Into<String>,
        south: f64,
        west: f64,
        north: f64,
        east: f64,
    ) -> Result<Self, AreaBoundsError> {
        let trimmed = code.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(AreaBoundsError::EmptyCode);
        }
        if ![south, west, north, east].iter().all(|edge| edge.is_finite()) {
            return Err(AreaBoundsError::NonFinite { code: trimmed });
        }
        if south > north || west > east {
            return Err(AreaBoundsError::Inverted { code: trimmed });
        }
        Ok(Self::from_edges(trimmed, south, west, north, east))
    }

    fn from_edges(code: String, south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            code,
            bounds: Rect::new(Coord { x: west, y: south }, Coord { x: east, y: north }),
            borough: None,
            county: None,
            post_town: None,
        }
    }

    fn from_district(row: &DistrictBounds) -> Self {
        Self::from_edges(row.code.to_owned(), row.south, row.west, row.north, row.east)
            .with_borough(row.borough)
            .with_county(SE_LONDON_COUNTY)
            .with_post_town(SE_LONDON_POST_TOWN)
    }

    /// Attach the local authority name.
    #[must_use]
    pub fn with_borough(mut self, borough: impl Into<String>) -> Self {
        self.borough = Some(borough.into());
        self
    }

    /// Attach the county name.
    #[must_use]
    pub fn with_county(mut self, county: impl Into<String>) -> Self {
        self.county = Some(county.into());
        self
    }

    /// Attach the post town.
    #[must_use]
    pub fn with_post_town(mut self, post_town: impl Into<String>) -> Self {
        self.post_town = Some(post_town.into());
        self
    }

    /// Area code, e.g. `SE1`.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Rectangle with `x = longitude`, `y = latitude`.
    #[must_use]
    pub const fn bounds(&self) -> &Rect<f64> {
        &self.bounds
    }

    /// Local authority, if recorded.
    #[must_use]
    pub fn borough(&self) -> Option<&str> {
        self.borough.as_deref()
    }

    /// County, if recorded.
    #[must_use]
    pub fn county(&self) -> Option<&str> {
        self.county.as_deref()
    }

    /// Post town, if recorded.
    #[must_use]
    pub fn post_town(&self) -> Option<&str> {
        self.post_town.as_deref()
    }

    /// Whether the point lies inside or on the edge of this area.
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        rect_covers(
            &self.bounds,
            Coord {
                x: longitude,
                y: latitude,
            },
        )
    }
}

/// Ordered table of areas with first-match lookup.
///
/// # Examples
/// ```
/// use streets_core::AreaAssigner;
///
/// let assigner = AreaAssigner::se_london();
/// assert_eq!(assigner.assign(51.495, -0.10), Some("SE1"));
/// assert_eq!(assigner.assign(53.48, -2.24), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AreaAssigner {
    areas: Vec<AreaBoundingBox>,
}

impl AreaAssigner {
    /// Build an assigner that checks `areas` in the given order.
    #[must_use]
    pub const fn new(areas: Vec<AreaBoundingBox>) -> Self {
        Self { areas }
    }

    /// The built-in south-east London postal districts.
    #[must_use]
    pub fn se_london() -> Self {
        Self::new(
            SE_LONDON_DISTRICTS
                .iter()
                .map(AreaBoundingBox::from_district)
                .collect(),
        )
    }

    /// Code of the first area containing the point.
    #[must_use]
    pub fn assign(&self, latitude: f64, longitude: f64) -> Option<&str> {
        self.assign_area(latitude, longitude)
            .map(AreaBoundingBox::code)
    }

    /// First area containing the point.
    #[must_use]
    pub fn assign_area(&self, latitude: f64, longitude: f64) -> Option<&AreaBoundingBox> {
        self.areas
            .iter()
            .find(|area| area.contains(latitude, longitude))
    }

    /// Areas in lookup order.
    #[must_use]
    pub fn areas(&self) -> &[AreaBoundingBox] {
        &self.areas
    }

    /// Look up an area by code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&AreaBoundingBox> {
        self.areas.iter().find(|area| area.code == code)
    }
}

#[cfg(feature = "serde")]
mod table {
    use std::collections::HashSet;
    use std::io::Read;

    use serde::Deserialize;
    use thiserror::Error;

    use super::{AreaAssigner, AreaBoundingBox, AreaBoundsError};

    /// Errors raised while loading an area table from JSON.
    #[derive(Debug, Error)]
    pub enum AreaTableError {
        /// The document was not a valid table.
        #[error("failed to parse area table")]
        Parse {
            /// Source error from `serde_json`.
            #[source]
            source: serde_json::Error,
        },
        /// A row had unusable bounds.
        #[error("area table row {index} is invalid")]
        InvalidRow {
            /// Zero-based row position.
            index: usize,
            /// Validation failure.
            #[source]
            source: AreaBoundsError,
        },
        /// Two rows shared a code.
        #[error("area code {code} appears more than once")]
        DuplicateCode {
            /// Repeated code.
            code: String,
        },
    }

    #[derive(Debug, Deserialize)]
    struct AreaRow {
        code: String,
        south: f64,
        west: f64,
        north: f64,
        east: f64,
        #[serde(default)]
        borough: Option<String>,
        #[serde(default)]
        county: Option<String>,
        #[serde(default)]
        post_town: Option<String>,
    }

    impl AreaRow {
        fn into_area(self) -> Result<AreaBoundingBox, AreaBoundsError> {
            let mut area =
                AreaBoundingBox::new(self.code, self.south, self.west, self.north, self.east)?;
            area.borough = self.borough;
            area.county = self.county;
            area.post_town = self.post_town;
            Ok(area)
        }
    }

    impl AreaAssigner {
        /// Load a table from a JSON array of rows, preserving row order.
        ///
        /// Each row carries `code`, `south`, `west`, `north`, `east` and
        /// optionally `borough`, `county` and `post_town`.
        ///
        /// # Errors
        /// Returns [`AreaTableError`] when the JSON is malformed, a row fails
        /// validation, or a code repeats.
        pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, AreaTableError> {
            let rows: Vec<AreaRow> = serde_json::from_reader(reader)
                .map_err(|source| AreaTableError::Parse { source })?;
            let mut seen = HashSet::new();
            let mut areas = Vec::with_capacity(rows.len());
            for (index, row) in rows.into_iter().enumerate() {
                let area = row
                    .into_area()
                    .map_err(|source| AreaTableError::InvalidRow { index, source })?;
                if !seen.insert(area.code.clone()) {
                    return Err(AreaTableError::DuplicateCode { code: area.code });
                }
                areas.push(area);
            }
            Ok(Self::new(areas))
        }
    }
}

#[cfg(feature = "serde")]
pub use table::AreaTableError;
