//! Coordinate helpers shared by the extraction adapters.
//!
//! Adapters never drop a coordinate they cannot use. A point outside the
//! WGS84 domain is handed on as is so the normalizer rejects the candidate as
//! an invalid coordinate instead of accepting it without a location.

use geo::{Centroid, Coord, MultiPoint};
use streets_core::tables::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};

/// Whether the coordinate lies in the WGS84 domain.
fn is_wgs84(coord: Coord<f64>) -> bool {
    (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&coord.x)
        && (MIN_LATITUDE..=MAX_LATITUDE).contains(&coord.y)
}

/// Arithmetic mean of the points, or `None` when there are none.
fn mean_coord(points: MultiPoint<f64>) -> Option<Coord<f64>> {
    points.centroid().map(|point| point.0)
}

/// Single position standing for a run of points.
///
/// Returns the first point outside WGS84 if there is one, otherwise the
/// mean of all points.
pub(crate) fn representative_point<I>(points: I) -> Option<Coord<f64>>
where
    I: IntoIterator<Item = Coord<f64>>,
{
    let points: MultiPoint<f64> = points.into_iter().collect();
    if let Some(invalid) = points.iter().find(|point| !is_wgs84(point.0)) {
        return Some(invalid.0);
    }
    mean_coord(points)
}
