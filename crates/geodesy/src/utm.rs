//! Universal Transverse Mercator on the WGS84 ellipsoid.

use std::fmt;
use std::str::FromStr;

use terranav_core::GeographicPoint;
use terranav_core::angles::wrap_longitude;

use crate::ellipsoid::WGS84;
use crate::error::{ProjectionError, check_grid};
use crate::tmerc::TransverseMercator;

const UTM_SCALE_FACTOR: f64 = 0.9996;
const FALSE_EASTING: f64 = 500_000.0;
pub(crate) const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;
const ANTIMERIDIAN_TOLERANCE_DEG: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// Northern for latitude ≥ 0, southern otherwise.
    pub fn from_latitude(latitude: f64) -> Self {
        if latitude >= 0.0 { Self::North } else { Self::South }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::North => "N",
            Self::South => "S",
        })
    }
}

impl FromStr for Hemisphere {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "N" | "NORTH" => Ok(Self::North),
            "S" | "SOUTH" => Ok(Self::South),
            other => Err(format!("unknown hemisphere `{other}`")),
        }
    }
}

/// A UTM grid reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtmCoordinate {
    pub zone: u8,
    pub hemisphere: Hemisphere,
    pub easting: f64,
    pub northing: f64,
}

impl fmt::Display for UtmCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {:.0}E {:.0}N",
            self.zone, self.hemisphere, self.easting, self.northing
        )
    }
}

/// Longitude-derived zone number `floor((lon + 180) / 6) + 1`, with 180° folded into zone 60.
pub fn zone_for_longitude(longitude: f64) -> u8 {
    let zone = ((longitude + 180.0) / 6.0).floor() as i32 + 1;
    zone.clamp(1, 60) as u8
}

/// Central meridian (degrees) of a UTM zone.
pub fn central_meridian(zone: u8) -> f64 {
    f64::from(zone) * 6.0 - 183.0
}

fn projection(zone: u8) -> Result<TransverseMercator, ProjectionError> {
    if !(1..=60).contains(&zone) {
        return Err(ProjectionError::InvalidUtmZone(zone));
    }
    Ok(TransverseMercator::new(
        WGS84,
        UTM_SCALE_FACTOR,
        central_meridian(zone),
    ))
}

/// Project a WGS84 point to UTM.
///
/// `zone_override` is taken verbatim (only its 1..=60 range is checked) so callers can
/// keep a neighbouring zone across a boundary. The hemisphere always follows latitude.
pub fn to_utm(
    point: &GeographicPoint,
    zone_override: Option<u8>,
) -> Result<UtmCoordinate, ProjectionError> {
    point.validate().inspect_err(|err| log::warn!("to_utm rejected input: {err}"))?;
    let zone = zone_override.unwrap_or_else(|| zone_for_longitude(point.longitude));
    let tm = projection(zone)?;
    let hemisphere = Hemisphere::from_latitude(point.latitude);

    let (x, y) = tm.forward(point.latitude, point.longitude)?;
    let northing = match hemisphere {
        Hemisphere::North => y,
        Hemisphere::South => y + FALSE_NORTHING_SOUTH,
    };

    let coord = UtmCoordinate {
        zone,
        hemisphere,
        easting: x + FALSE_EASTING,
        northing,
    };
    log::debug!("{point} -> UTM {coord}");
    Ok(coord)
}

/// Wrap into [-180, 180]. The antimeridian takes the sign of the zone's central
/// meridian, so zone 60 returns +180 and zone 1 returns -180.
fn zone_longitude(longitude: f64, zone: u8) -> f64 {
    let wrapped = wrap_longitude(longitude);
    if (wrapped.abs() - 180.0).abs() < ANTIMERIDIAN_TOLERANCE_DEG {
        180.0_f64.copysign(central_meridian(zone))
    } else {
        wrapped
    }
}

/// Inverse UTM using the coordinate's own zone and hemisphere.
pub fn from_utm(coord: &UtmCoordinate) -> Result<GeographicPoint, ProjectionError> {
    check_grid(coord.easting, coord.northing)?;
    let tm = projection(coord.zone)?;
    let y = match coord.hemisphere {
        Hemisphere::North => coord.northing,
        Hemisphere::South => coord.northing - FALSE_NORTHING_SOUTH,
    };
    let (lat, lon) = tm.inverse(coord.easting - FALSE_EASTING, y)?;
    Ok(GeographicPoint::new(lat, zone_longitude(lon, coord.zone)))
}
