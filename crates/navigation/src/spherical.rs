//! Great-circle primitives.

use terranav_core::GeographicPoint;
use terranav_core::angles::{normalize_degrees, wrap_longitude};
use terranav_core::constants::EARTH_MEAN_RADIUS_M;

/// Haversine great-circle distance in metres.
pub fn distance(p1: &GeographicPoint, p2: &GeographicPoint) -> f64 {
    let phi1 = p1.lat_rad();
    let phi2 = p2.lat_rad();
    let d_phi = phi2 - phi1;
    let d_lambda = (p2.longitude - p1.longitude).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Clamp guards against a > 1 from rounding on near-antipodal pairs.
    2.0 * EARTH_MEAN_RADIUS_M * a.sqrt().min(1.0).asin()
}

/// Sum of consecutive leg distances; zero for fewer than two points.
pub fn path_length(points: &[GeographicPoint]) -> f64 {
    points.windows(2).map(|w| distance(&w[0], &w[1])).sum()
}

/// Forward azimuth at `p1` toward `p2`, in degrees within `[0, 360)`.
///
/// Coincident points return 0.
pub fn initial_bearing(p1: &GeographicPoint, p2: &GeographicPoint) -> f64 {
    let phi1 = p1.lat_rad();
    let phi2 = p2.lat_rad();
    let d_lambda = (p2.longitude - p1.longitude).to_radians();

    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
    if y == 0.0 && x == 0.0 {
        return 0.0;
    }
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Point reached by travelling `distance_m` from `origin` along the great circle that
/// starts with `bearing_deg`.
pub fn destination_point(
    origin: &GeographicPoint,
    bearing_deg: f64,
    distance_m: f64,
) -> GeographicPoint {
    let phi1 = origin.lat_rad();
    let lambda1 = origin.lon_rad();
    let theta = bearing_deg.to_radians();
    let delta = distance_m / EARTH_MEAN_RADIUS_M;

    let sin_phi2 = phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos();
    let phi2 = sin_phi2.clamp(-1.0, 1.0).asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * sin_phi2);

    GeographicPoint::new(phi2.to_degrees(), wrap_longitude(lambda2.to_degrees()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn london_to_paris() {
        let london = GeographicPoint::new(51.5074, -0.1278);
        let paris = GeographicPoint::new(48.8566, 2.3522);
        let d = distance(&london, &paris);
        assert!((d - 343_500.0).abs() < 1_500.0, "d = {d}");
        let b = initial_bearing(&london, &paris);
        assert!((b - 148.0).abs() < 1.0, "b = {b}");
    }

    #[test]
    fn coincident_points() {
        let p = GeographicPoint::new(12.34, 56.78);
        assert_eq!(distance(&p, &p), 0.0);
        assert_eq!(initial_bearing(&p, &p), 0.0);
    }

    #[test]
    fn cardinal_bearings_from_equator() {
        let origin = GeographicPoint::new(0.0, 0.0);
        assert_abs_diff_eq!(
            initial_bearing(&origin, &GeographicPoint::new(1.0, 0.0)),
            0.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            initial_bearing(&origin, &GeographicPoint::new(0.0, 1.0)),
            90.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            initial_bearing(&origin, &GeographicPoint::new(-1.0, 0.0)),
            180.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            initial_bearing(&origin, &GeographicPoint::new(0.0, -1.0)),
            270.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn path_length_of_short_inputs_is_zero() {
        assert_eq!(path_length(&[]), 0.0);
        assert_eq!(path_length(&[GeographicPoint::new(1.0, 2.0)]), 0.0);
    }

    #[test]
    fn path_length_sums_legs() {
        let pts = [
            GeographicPoint::new(0.0, 0.0),
            GeographicPoint::new(0.0, 1.0),
            GeographicPoint::new(1.0, 1.0),
        ];
        let expected = distance(&pts[0], &pts[1]) + distance(&pts[1], &pts[2]);
        assert_abs_diff_eq!(path_length(&pts), expected, epsilon = 1e-9);
        // one degree of arc on the mean sphere
        assert_abs_diff_eq!(distance(&pts[0], &pts[1]), 111_194.93, epsilon = 0.01);
    }

    #[test]
    fn destination_crosses_antimeridian() {
        let origin = GeographicPoint::new(0.0, 179.5);
        let dest = destination_point(&origin, 90.0, 111_194.93);
        assert_abs_diff_eq!(dest.latitude, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(dest.longitude, -179.5, epsilon = 1e-6);
    }
}
