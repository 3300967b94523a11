//! Canonical lookup tables for street cleaning.
//!
//! Every threshold, blocklist and bounding box used by the normalizer and the
//! area assigner lives here so that drift between copies is impossible and
//! tests can refer to the exact values by name.

/// Minimum number of non-whitespace characters a street name must carry.
pub const MIN_NAME_CHARS: usize = 3;

/// Lowercase substrings that mark a name as placeholder data.
pub const NAME_BLOCKLIST: &[&str] = &["unnamed", "unknown", "null", "tbd"];

/// Southern edge of the UK plausibility envelope, in degrees latitude.
pub const UK_SOUTH: f64 = 49.8;
/// Western edge of the UK plausibility envelope, in degrees longitude.
pub const UK_WEST: f64 = -8.0;
/// Northern edge of the UK plausibility envelope, in degrees latitude.
pub const UK_NORTH: f64 = 60.9;
/// Eastern edge of the UK plausibility envelope, in degrees longitude.
pub const UK_EAST: f64 = 2.0;

/// Largest valid WGS84 latitude, in degrees.
pub const MAX_LATITUDE: f64 = 90.0;
/// Smallest valid WGS84 latitude, in degrees.
pub const MIN_LATITUDE: f64 = -90.0;
/// Largest valid WGS84 longitude, in degrees.
pub const MAX_LONGITUDE: f64 = 180.0;
/// Smallest valid WGS84 longitude, in degrees.
pub const MIN_LONGITUDE: f64 = -180.0;

/// Highway categories that survive normalization unchanged.
///
/// Lookups are case-insensitive; anything outside this list collapses to
/// [`DEFAULT_HIGHWAY_TYPE`].
pub const HIGHWAY_TYPE_LABELS: &[&str] = &[
    "primary",
    "secondary",
    "tertiary",
    "residential",
    "unclassified",
    "trunk",
    "living_street",
    "service",
    "track",
    "path",
    "footway",
    "cycleway",
];

/// Label used when the source category is missing or unrecognised.
pub const DEFAULT_HIGHWAY_TYPE: &str = "unclassified";

/// A row of the built-in district table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistrictBounds {
    /// Postal district code.
    pub code: &'static str,
    /// Southern latitude edge.
    pub south: f64,
    /// Western longitude edge.
    pub west: f64,
    /// Northern latitude edge.
    pub north: f64,
    /// Eastern longitude edge.
    pub east: f64,
    /// Local authority covering most of the district.
    pub borough: &'static str,
}

const fn district(
    code: &'static str,
    south: f64,
    west: f64,
    north: f64,
    east: f64,
    borough: &'static str,
) -> DistrictBounds {
    DistrictBounds {
        code,
        south,
        west,
        north,
        east,
        borough,
    }
}

/// County shared by every built-in district.
pub const SE_LONDON_COUNTY: &str = "Greater London";

/// Post town shared by every built-in district.
pub const SE_LONDON_POST_TOWN: &str = "London";

/// Approximate bounds of the south-east London postal districts.
///
/// Several rectangles overlap along shared edges (for example SE1 and SE11).
/// Order is significant: the assigner returns the first containing entry.
pub const SE_LONDON_DISTRICTS: &[DistrictBounds] = &[
    district("SE1", 51.485, -0.115, 51.505, -0.085, "Southwark Council"),
    district("SE2", 51.455, 0.145, 51.475, 0.175, "Bexley Council"),
    district("SE3", 51.465, 0.010, 51.495, 0.050, "Lewisham Council"),
    district("SE4", 51.445, -0.045, 51.475, -0.015, "Lewisham Council"),
    district("SE5", 51.465, -0.105, 51.485, -0.075, "Southwark Council"),
    district("SE7", 51.475, 0.000, 51.505, 0.020, "Greenwich Council"),
    district("SE8", 51.475, -0.025, 51.505, 0.005, "Greenwich Council"),
    district("SE9", 51.435, 0.055, 51.465, 0.085, "Greenwich Council"),
    district("SE11", 51.485, -0.125, 51.505, -0.095, "Westminster Council"),
    district("SE12", 51.435, 0.015, 51.465, 0.045, "Lewisham Council"),
    district("SE13", 51.435, -0.015, 51.465, 0.015, "Lewisham Council"),
    district("SE14", 51.465, -0.065, 51.495, -0.035, "Southwark Council"),
    district("SE15", 51.465, -0.085, 51.495, -0.055, "Southwark Council"),
    district("SE16", 51.495, -0.055, 51.515, -0.025, "Southwark Council"),
    district("SE17", 51.475, -0.105, 51.495, -0.075, "Southwark Council"),
    district("SE18", 51.455, 0.035, 51.485, 0.065, "Greenwich Council"),
];
