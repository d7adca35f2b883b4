//! Human-readable formatting for distances, areas, and bearings.

use terranav_core::angles::normalize_degrees;
use terranav_core::units::{m_to_km, m2_to_km2};

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// `"850m"` below one kilometre, `"1.25km"` from one kilometre up.
pub fn format_distance(meters: f64) -> String {
    if meters < 1_000.0 {
        format!("{meters:.0}m")
    } else {
        format!("{:.2}km", m_to_km(meters))
    }
}

/// `"640 m²"` below one hectare, `"0.125 km²"` otherwise.
pub fn format_area(square_meters: f64) -> String {
    if square_meters < 10_000.0 {
        format!("{square_meters:.0} m²")
    } else {
        format!("{:.3} km²", m2_to_km2(square_meters))
    }
}

/// 16-point compass label for a bearing in degrees.
pub fn cardinal_direction(bearing_deg: f64) -> &'static str {
    let index = (normalize_degrees(bearing_deg) / 22.5).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}

/// `"135.0° SE"`.
pub fn format_bearing(bearing_deg: f64) -> String {
    format!("{bearing_deg:.1}° {}", cardinal_direction(bearing_deg))
}
