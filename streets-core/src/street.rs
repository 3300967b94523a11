//! Street records flowing through the cleaning pipeline.
//!
//! Coordinates are WGS84. Where a [`Coord`] is used, `x = longitude` and
//! `y = latitude`, matching the `geo` convention.

use geo::Coord;

use crate::area::AreaBoundingBox;

/// A raw street candidate as harvested from a geodata source.
///
/// Nothing about the record has been validated. Latitude and longitude are
/// kept separate so a source that supplies only one of them can be reported
/// rather than silently defaulted.
///
/// # Examples
/// ```
/// use streets_core::StreetRecord;
///
/// let record = StreetRecord::new("High Street")
///     .with_highway_type("residential")
///     .with_coordinates(51.50, -0.10);
/// assert_eq!(record.latitude, Some(51.50));
/// assert_eq!(record.highway_type.as_deref(), Some("residential"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreetRecord {
    /// Free-text name exactly as supplied.
    pub name: String,
    /// Source category such as `primary` or `footway`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub highway_type: Option<String>,
    /// Latitude in degrees.
    #[cfg_attr(feature = "serde", serde(default))]
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    #[cfg_attr(feature = "serde", serde(default))]
    pub longitude: Option<f64>,
    /// Identifier of the source element, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub osm_id: Option<u64>,
    /// Area code reported by the source itself, such as a postcode district.
    #[cfg_attr(feature = "serde", serde(default))]
    pub district: Option<String>,
}

impl StreetRecord {
    /// Start a record from a name alone.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attach a source highway category.
    #[must_use]
    pub fn with_highway_type(mut self, highway_type: impl Into<String>) -> Self {
        self.highway_type = Some(highway_type.into());
        self
    }

    /// Attach both coordinates.
    #[must_use]
    pub const fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Attach whatever coordinates the source supplied, even half a pair.
    #[must_use]
    pub const fn with_optional_coordinates(
        mut self,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    /// Attach the area code the source reported.
    #[must_use]
    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    /// Attach the source element identifier.
    #[must_use]
    pub const fn with_osm_id(mut self, osm_id: u64) -> Self {
        self.osm_id = Some(osm_id);
        self
    }
}

/// A street that passed validation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcceptedStreet {
    /// Trimmed name with internal whitespace collapsed.
    pub name: String,
    /// Canonical highway label.
    pub highway_type: String,
    /// Validated position, if the source had one.
    #[cfg_attr(feature = "serde", serde(with = "lat_lon"))]
    pub location: Option<Coord<f64>>,
    /// Identifier of the source element, if any.
    pub osm_id: Option<u64>,
}

impl AcceptedStreet {
    /// Latitude of the validated position.
    #[must_use]
    pub fn latitude(&self) -> Option<f64> {
        self.location.map(|coord| coord.y)
    }

    /// Longitude of the validated position.
    #[must_use]
    pub fn longitude(&self) -> Option<f64> {
        self.location.map(|coord| coord.x)
    }
}

/// An accepted street with its assigned area and that area's metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CleanedStreet {
    /// The validated street.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub street: AcceptedStreet,
    /// Code of the enclosing area, if any.
    pub area_code: Option<String>,
    /// Local authority of the enclosing area.
    pub borough: Option<String>,
    /// County of the enclosing area.
    pub county: Option<String>,
    /// Post town of the enclosing area.
    pub post_town: Option<String>,
}

impl CleanedStreet {
    /// A street that fell in no area.
    #[must_use]
    pub const fn unassigned(street: AcceptedStreet) -> Self {
        Self {
            street,
            area_code: None,
            borough: None,
            county: None,
            post_town: None,
        }
    }

    /// A street placed in `area`, copying its metadata.
    #[must_use]
    pub fn in_area(street: AcceptedStreet, area: &AreaBoundingBox) -> Self {
        Self {
            street,
            area_code: Some(area.code().to_owned()),
            borough: area.borough().map(str::to_owned),
            county: area.county().map(str::to_owned),
            post_town: area.post_town().map(str::to_owned),
        }
    }
}

/// Serialize a [`Coord`] as `{"latitude": .., "longitude": ..}`.
#[cfg(feature = "serde")]
mod lat_lon {
    use geo::Coord;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct LatLon {
        latitude: f64,
        longitude: f64,
    }

    #[expect(clippy::ref_option, reason = "serde `with` passes the field by reference")]
    pub(super) fn serialize<S>(
        location: &Option<Coord<f64>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        location
            .map(|coord| LatLon {
                latitude: coord.y,
                longitude: coord.x,
            })
            .serialize(serializer)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Coord<f64>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let point = Option::<LatLon>::deserialize(deserializer)?;
        Ok(point.map(|lat_lon| Coord {
            x: lat_lon.longitude,
            y: lat_lon.latitude,
        }))
    }
}
