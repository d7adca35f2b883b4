//! Indian Grid: Lambert Conformal Conic 1SP zones on the Everest 1930 ellipsoid.
//!
//! Zones never tile uniformly by longitude, so the zone is always supplied by the
//! caller and never inferred from the point.

use std::fmt;
use std::str::FromStr;

use terranav_core::GeographicPoint;
use terranav_core::angles::wrap_longitude;

use crate::datum::INDIAN_EVEREST_1930;
use crate::ellipsoid::EVEREST_1930;
use crate::error::{ProjectionError, check_grid};
use crate::lcc::{LambertConformalConic, LccZoneParams};

/// Maximum fixed-point passes used to make the inverse agree with the forward transform.
const MAX_REFINEMENT_PASSES: usize = 8;
const REFINEMENT_TOLERANCE_DEG: f64 = 1e-12;

const COMMON_FALSE_EASTING: f64 = 2_743_196.4;
const COMMON_FALSE_NORTHING: f64 = 914_398.8;
const COMMON_SCALE: f64 = 0.998_786_4;

const fn zone(central_meridian: f64, origin_latitude: f64) -> LccZoneParams {
    LccZoneParams {
        central_meridian,
        origin_latitude,
        false_easting: COMMON_FALSE_EASTING,
        false_northing: COMMON_FALSE_NORTHING,
        scale_factor: COMMON_SCALE,
    }
}

const ZONE_0: LccZoneParams = LccZoneParams {
    central_meridian: 68.0,
    origin_latitude: 39.5,
    false_easting: 2_153_866.4,
    false_northing: 2_368_292.9,
    scale_factor: 0.998_461_5,
};
const ZONE_IA: LccZoneParams = zone(68.0, 32.5);
const ZONE_IB: LccZoneParams = zone(90.0, 32.5);
const ZONE_IIA: LccZoneParams = zone(74.0, 26.0);
const ZONE_IIB: LccZoneParams = zone(90.0, 26.0);
const ZONE_IIIA: LccZoneParams = zone(80.0, 19.0);
const ZONE_IIIB: LccZoneParams = zone(100.0, 19.0);
const ZONE_IVA: LccZoneParams = zone(80.0, 12.0);
const ZONE_IVB: LccZoneParams = zone(104.0, 12.0);

/// The nine Indian Grid zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndianGridZone {
    Zero,
    IA,
    IB,
    IIA,
    IIB,
    IIIA,
    IIIB,
    IVA,
    IVB,
}

impl IndianGridZone {
    pub const ALL: [IndianGridZone; 9] = [
        Self::Zero,
        Self::IA,
        Self::IB,
        Self::IIA,
        Self::IIB,
        Self::IIIA,
        Self::IIIB,
        Self::IVA,
        Self::IVB,
    ];

    /// Fixed projection constants for this zone.
    pub const fn params(self) -> &'static LccZoneParams {
        match self {
            Self::Zero => &ZONE_0,
            Self::IA => &ZONE_IA,
            Self::IB => &ZONE_IB,
            Self::IIA => &ZONE_IIA,
            Self::IIB => &ZONE_IIB,
            Self::IIIA => &ZONE_IIIA,
            Self::IIIB => &ZONE_IIIB,
            Self::IVA => &ZONE_IVA,
            Self::IVB => &ZONE_IVB,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::IA => "IA",
            Self::IB => "IB",
            Self::IIA => "IIA",
            Self::IIB => "IIB",
            Self::IIIA => "IIIA",
            Self::IIIB => "IIIB",
            Self::IVA => "IVA",
            Self::IVB => "IVB",
        }
    }

    fn projection(self) -> LambertConformalConic {
        LambertConformalConic::new(EVEREST_1930, *self.params())
    }
}

impl fmt::Display for IndianGridZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndianGridZone {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|z| z.name() == wanted)
            .ok_or_else(|| ProjectionError::UnknownIndianGridZone(s.to_string()))
    }
}

/// An Indian Grid reference in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndianGridCoordinate {
    pub zone: IndianGridZone,
    pub easting: f64,
    pub northing: f64,
}

impl fmt::Display for IndianGridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.0}E {:.0}N",
            self.zone, self.easting, self.northing
        )
    }
}

fn forward(
    lcc: &LambertConformalConic,
    latitude: f64,
    longitude: f64,
) -> Result<(f64, f64), ProjectionError> {
    let (phi, lambda, _) =
        INDIAN_EVEREST_1930.from_wgs84(latitude.to_radians(), longitude.to_radians());
    lcc.forward(phi.to_degrees(), lambda.to_degrees())
}

/// Single-pass inverse. The height dropped by the 2-D datum shift leaves a residual of a
/// few centimetres, which [`from_indian_grid`] removes by refinement.
fn direct_inverse(
    lcc: &LambertConformalConic,
    easting: f64,
    northing: f64,
) -> Result<(f64, f64), ProjectionError> {
    let (lat, lon) = lcc.inverse(easting, northing)?;
    let (phi, lambda, _) = INDIAN_EVEREST_1930.to_wgs84(lat.to_radians(), lon.to_radians());
    Ok((phi.to_degrees(), lambda.to_degrees()))
}

/// Project a WGS84 point into the given Indian Grid zone.
pub fn to_indian_grid(
    point: &GeographicPoint,
    zone: IndianGridZone,
) -> Result<IndianGridCoordinate, ProjectionError> {
    point
        .validate()
        .inspect_err(|err| log::warn!("to_indian_grid rejected input: {err}"))?;
    let lcc = zone.projection();
    let (easting, northing) = forward(&lcc, point.latitude, point.longitude)?;
    let coord = IndianGridCoordinate {
        zone,
        easting,
        northing,
    };
    log::debug!("{point} -> Indian Grid {coord}");
    Ok(coord)
}

/// Inverse Indian Grid transform using the coordinate's own zone constants.
pub fn from_indian_grid(coord: &IndianGridCoordinate) -> Result<GeographicPoint, ProjectionError> {
    check_grid(coord.easting, coord.northing)?;
    let lcc = coord.zone.projection();
    let target = direct_inverse(&lcc, coord.easting, coord.northing)?;

    // Fixed-point correction: nudge the estimate until the direct inverse of its own
    // forward image matches the direct inverse of the requested grid position.
    let mut estimate = target;
    for _ in 0..MAX_REFINEMENT_PASSES {
        let (e, n) = forward(&lcc, estimate.0, estimate.1)?;
        let image = direct_inverse(&lcc, e, n)?;
        let d_lat = target.0 - image.0;
        let d_lon = target.1 - image.1;
        estimate = (estimate.0 + d_lat, estimate.1 + d_lon);
        if d_lat.abs() < REFINEMENT_TOLERANCE_DEG && d_lon.abs() < REFINEMENT_TOLERANCE_DEG {
            break;
        }
    }

    Ok(GeographicPoint::new(estimate.0, wrap_longitude(estimate.1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zone_names_round_trip() {
        for zone in IndianGridZone::ALL {
            assert_eq!(zone.name().parse::<IndianGridZone>(), Ok(zone));
        }
        assert_eq!("iiia".parse::<IndianGridZone>(), Ok(IndianGridZone::IIIA));
        assert!(matches!(
            "V".parse::<IndianGridZone>(),
            Err(ProjectionError::UnknownIndianGridZone(_))
        ));
    }

    #[test]
    fn zone_zero_has_its_own_origin() {
        let p = IndianGridZone::Zero.params();
        assert_abs_diff_eq!(p.false_easting, 2_153_866.4);
        assert_abs_diff_eq!(p.origin_latitude, 39.5);
        let iia = IndianGridZone::IIA.params();
        assert_abs_diff_eq!(iia.central_meridian, 74.0);
        assert_abs_diff_eq!(iia.scale_factor, 0.998_786_4);
    }

    #[test]
    fn new_delhi_in_zone_iia() {
        let delhi = GeographicPoint::new(28.6139, 77.2090);
        let grid = to_indian_grid(&delhi, IndianGridZone::IIA).unwrap();
        assert_abs_diff_eq!(grid.easting, 3_057_027.92, epsilon = 0.05);
        assert_abs_diff_eq!(grid.northing, 1_207_614.41, epsilon = 0.05);
    }

    #[test]
    fn refined_inverse_matches_forward_to_sub_millimetre() {
        let point = GeographicPoint::new(31.7, 66.3);
        let grid = to_indian_grid(&point, IndianGridZone::IIA).unwrap();
        let back = from_indian_grid(&grid).unwrap();
        let again = to_indian_grid(&back, IndianGridZone::IIA).unwrap();
        assert_abs_diff_eq!(again.easting, grid.easting, epsilon = 1e-3);
        assert_abs_diff_eq!(again.northing, grid.northing, epsilon = 1e-3);
        assert_abs_diff_eq!(back.latitude, point.latitude, epsilon = 1e-9);
        assert_abs_diff_eq!(back.longitude, point.longitude, epsilon = 1e-9);
    }

    #[test]
    fn rejects_non_finite_grid() {
        let coord = IndianGridCoordinate {
            zone: IndianGridZone::IB,
            easting: f64::INFINITY,
            northing: 1.0,
        };
        assert!(from_indian_grid(&coord).is_err());
    }
}
