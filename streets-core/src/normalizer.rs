//! Validation and normalization of raw street candidates.
//!
//! Rules run in a fixed order and stop at the first failure:
//!
//! 1. blank names, then names with too few non-whitespace characters;
//! 2. names containing a blocklisted placeholder marker;
//! 3. half-present, non-finite or out-of-WGS84 coordinates, then
//!    coordinates outside the plausibility envelope.
//!
//! Anything that survives is accepted with a cleaned name and a canonical
//! highway label. Classification never fails; rejection is a value.

use std::fmt;

use geo::{Coord, Rect};

use crate::area::rect_covers;
use crate::highway::HighwayTypeTable;
use crate::street::{AcceptedStreet, StreetRecord};
use crate::tables::{
    MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE, MIN_NAME_CHARS, NAME_BLOCKLIST,
    UK_EAST, UK_NORTH, UK_SOUTH, UK_WEST,
};

/// Why a candidate was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RejectionReason {
    /// Name was empty after trimming.
    EmptyName,
    /// Name had fewer non-whitespace characters than the minimum.
    TooShort,
    /// Name contained a placeholder marker such as `unnamed`.
    BlocklistedPattern,
    /// Only one coordinate was present, or one was not a WGS84 degree value.
    InvalidCoordinate,
    /// Coordinates fell outside the plausibility envelope.
    OutOfBounds,
}

impl RejectionReason {
    /// Every reason, in rule order.
    pub const ALL: [Self; 5] = [
        Self::EmptyName,
        Self::TooShort,
        Self::BlocklistedPattern,
        Self::InvalidCoordinate,
        Self::OutOfBounds,
    ];

    /// Return the reason as a `snake_case` tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::TooShort => "too_short",
            Self::BlocklistedPattern => "blocklisted_pattern",
            Self::InvalidCoordinate => "invalid_coordinate",
            Self::OutOfBounds => "out_of_bounds",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of normalizing one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The candidate looks like a real street.
    Accepted(AcceptedStreet),
    /// The candidate was discarded.
    Rejected(RejectionReason),
}

impl Verdict {
    /// The accepted street, if any.
    #[must_use]
    pub fn accepted(self) -> Option<AcceptedStreet> {
        match self {
            Self::Accepted(street) => Some(street),
            Self::Rejected(_) => None,
        }
    }

    /// The rejection reason, if any.
    #[must_use]
    pub const fn rejection(&self) -> Option<RejectionReason> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }

    /// Whether the candidate was accepted.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Tunable inputs for [`StreetNormalizer`].
///
/// [`NormalizerConfig::default`] yields the canonical UK rules; tests and
/// other regions substitute their own values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizerConfig {
    /// Minimum count of non-whitespace characters.
    pub min_name_chars: usize,
    /// Lowercase placeholder markers.
    pub blocklist: &'static [&'static str],
    /// Plausibility envelope with `x = longitude`, `y = latitude`.
    pub envelope: Rect<f64>,
    /// Highway label mapping.
    pub highway_types: HighwayTypeTable,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            min_name_chars: MIN_NAME_CHARS,
            blocklist: NAME_BLOCKLIST,
            envelope: Rect::new(
                Coord {
                    x: UK_WEST,
                    y: UK_SOUTH,
                },
                Coord {
                    x: UK_EAST,
                    y: UK_NORTH,
                },
            ),
            highway_types: HighwayTypeTable::default(),
        }
    }
}

/// Classifies raw street candidates.
///
/// # Examples
/// ```
/// use streets_core::{RejectionReason, StreetNormalizer, StreetRecord, Verdict};
///
/// let normalizer = StreetNormalizer::default();
///
/// let record = StreetRecord::new("High Street").with_coordinates(51.50, -0.10);
/// let verdict = normalizer.normalize(&record);
/// let Verdict::Accepted(street) = verdict else { panic!("expected acceptance") };
/// assert_eq!(street.highway_type, "unclassified");
///
/// let verdict = normalizer.normalize(&StreetRecord::new("Unnamed Road"));
/// assert_eq!(verdict, Verdict::Rejected(RejectionReason::BlocklistedPattern));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StreetNormalizer {
    config: NormalizerConfig,
}

impl StreetNormalizer {
    /// Build a normalizer from explicit configuration.
    #[must_use]
    pub const fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Classify a record.
    #[must_use]
    pub fn normalize(&self, record: &StreetRecord) -> Verdict {
        match self.normalize_parts(
            &record.name,
            record.highway_type.as_deref(),
            record.latitude,
            record.longitude,
        ) {
            Verdict::Accepted(street) => Verdict::Accepted(AcceptedStreet {
                osm_id: record.osm_id,
                ..street
            }),
            rejected @ Verdict::Rejected(_) => rejected,
        }
    }

    /// Classify loose fields without building a [`StreetRecord`].
    #[must_use]
    pub fn normalize_parts(
        &self,
        name: &str,
        highway_type: Option<&str>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Verdict {
        self.classify(name, latitude, longitude)
            .map_or_else(Verdict::Rejected, |(cleaned, location)| {
                Verdict::Accepted(AcceptedStreet {
                    name: cleaned,
                    highway_type: self.normalize_type(highway_type).to_owned(),
                    location,
                    osm_id: None,
                })
            })
    }

    /// Map a raw highway category to its canonical label.
    #[must_use]
    pub fn normalize_type(&self, highway_type: Option<&str>) -> &'static str {
        self.config.highway_types.canonical(highway_type)
    }

    fn classify(
        &self,
        name: &str,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<(String, Option<Coord<f64>>), RejectionReason> {
        let cleaned = self.check_name(name)?;
        let location = self.check_location(latitude, longitude)?;
        Ok((cleaned, location))
    }

    fn check_name(&self, name: &str) -> Result<String, RejectionReason> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(RejectionReason::EmptyName);
        }
        let visible = trimmed.chars().filter(|ch| !ch.is_whitespace()).count();
        if visible < self.config.min_name_chars {
            return Err(RejectionReason::TooShort);
        }
        let lowered = trimmed.to_lowercase();
        if self
            .config
            .blocklist
            .iter()
            .any(|marker| lowered.contains(marker))
        {
            return Err(RejectionReason::BlocklistedPattern);
        }
        Ok(collapse_whitespace(trimmed))
    }

    fn check_location(
        &self,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Option<Coord<f64>>, RejectionReason> {
        let (lat, lon) = match (latitude, longitude) {
            (None, None) => return Ok(None),
            (Some(lat), Some(lon)) => (lat, lon),
            _ => return Err(RejectionReason::InvalidCoordinate),
        };
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&lat)
            || !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&lon)
        {
            return Err(RejectionReason::InvalidCoordinate);
        }
        let coord = Coord { x: lon, y: lat };
        if rect_covers(&self.config.envelope, coord) {
            Ok(Some(coord))
        } else {
            Err(RejectionReason::OutOfBounds)
        }
    }
}

/// Trim and collapse runs of whitespace to single spaces.
fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
