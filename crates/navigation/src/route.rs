use terranav_core::GeographicPoint;

use crate::spherical::{distance, initial_bearing};

/// Measurements for one point of an ordered route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteLeg {
    pub point: GeographicPoint,
    /// Distance from the previous point (m); `None` for the first point.
    pub distance_from_previous_m: Option<f64>,
    /// Bearing from the previous point (degrees); `None` for the first point.
    pub bearing_from_previous_deg: Option<f64>,
    /// Running path length up to and including this point (m).
    pub total_distance_m: f64,
}

/// Per-point leg measurements for an ordered list of points.
pub fn route_legs(points: &[GeographicPoint]) -> Vec<RouteLeg> {
    let mut total = 0.0;
    let mut previous: Option<&GeographicPoint> = None;
    points
        .iter()
        .map(|point| {
            let (leg, bearing) = match previous {
                Some(prev) => (
                    Some(distance(prev, point)),
                    Some(initial_bearing(prev, point)),
                ),
                None => (None, None),
            };
            total += leg.unwrap_or(0.0);
            previous = Some(point);
            RouteLeg {
                point: *point,
                distance_from_previous_m: leg,
                bearing_from_previous_deg: bearing,
                total_distance_m: total,
            }
        })
        .collect()
}
