//! Map bounds calculation

use crate::app::models::{Bounds, Point};

/// Compute the axis-aligned bounding rectangle over a point collection
///
/// Returns `None` for empty input. A single linear pass tracks latitude and
/// longitude extremes independently; the result encloses every point but is
/// not a convex hull.
pub fn compute_bounds(points: &[Point]) -> Option<Bounds> {
    let first = points.first()?;
    let mut bounds = Bounds {
        min_lat: first.latitude,
        min_lon: first.longitude,
        max_lat: first.latitude,
        max_lon: first.longitude,
    };

    for point in &points[1..] {
        bounds.min_lat = bounds.min_lat.min(point.latitude);
        bounds.max_lat = bounds.max_lat.max(point.latitude);
        bounds.min_lon = bounds.min_lon.min(point.longitude);
        bounds.max_lon = bounds.max_lon.max(point.longitude);
    }

    Some(bounds)
}
