use terranav_core::GeographicPoint;
use terranav_core::constants::EARTH_MEAN_RADIUS_M;

/// Approximate enclosed area (m²) of a closed ring of vertices on the mean sphere.
///
/// Uses the spherical-excess line integral; fine for field-sized polygons, less accurate
/// for regions spanning many degrees. Fewer than three vertices yields zero.
pub fn polygon_area(points: &[GeographicPoint]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let sum: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(p1, p2)| {
            let d_lambda = (p2.longitude - p1.longitude).to_radians();
            d_lambda * (2.0 + p1.lat_rad().sin() + p2.lat_rad().sin())
        })
        .sum();
    (sum * EARTH_MEAN_RADIUS_M * EARTH_MEAN_RADIUS_M / 2.0).abs()
}
