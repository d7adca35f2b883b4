//! Core units, constants, and shared primitives for the terranav workspace.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Physical and geodetic constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Mean Earth radius used for all spherical navigation (m).
    pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_000.0;
    /// Milliseconds per day.
    pub const MILLIS_PER_DAY: f64 = 86_400_000.0;
    /// Julian date of the Unix epoch at midnight (1970-01-01T00:00Z is JD 2440587.5).
    pub const J1970: f64 = 2_440_588.0;
    /// Julian date of the J2000.0 epoch.
    pub const J2000: f64 = 2_451_545.0;
    /// Mean Earth–Sun distance (km).
    pub const SUN_DISTANCE_KM: f64 = 149_598_000.0;

    /// WGS84 semi-major axis (m).
    pub const WGS84_A: f64 = 6_378_137.0;
    /// WGS84 inverse flattening.
    pub const WGS84_INV_F: f64 = 298.257_223_563;
    /// Everest 1930 semi-major axis (m).
    pub const EVEREST_1930_A: f64 = 6_377_276.345;
    /// Everest 1930 inverse flattening.
    pub const EVEREST_1930_INV_F: f64 = 300.8017;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert square metres to square kilometres.
    #[inline]
    pub fn m2_to_km2(v: f64) -> f64 {
        v / 1_000_000.0
    }
}

/// Angle normalisation helpers.
pub mod angles {
    /// Wrap an angle in degrees into `[0, 360)`.
    #[inline]
    pub fn normalize_degrees(deg: f64) -> f64 {
        let wrapped = deg.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if wrapped >= 360.0 { 0.0 } else { wrapped }
    }

    /// Wrap a longitude in degrees into `[-180, 180)`.
    #[inline]
    pub fn wrap_longitude(deg: f64) -> f64 {
        let wrapped = (deg + 180.0).rem_euclid(360.0) - 180.0;
        if wrapped >= 180.0 { -180.0 } else { wrapped }
    }
}

/// Errors raised when a geographic coordinate cannot be used for computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("coordinate is not finite (lat={latitude}, lon={longitude})")]
    NonFinite { latitude: f64, longitude: f64 },
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// WGS84 latitude/longitude in degrees; the interchange coordinate for every crate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeographicPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeographicPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a point, rejecting non-finite or out-of-range values.
    pub fn checked(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        let point = Self::new(latitude, longitude);
        point.validate()?;
        Ok(point)
    }

    /// Check that the point is finite and inside the geographic domain.
    pub fn validate(&self) -> Result<(), CoordinateError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(CoordinateError::NonFinite {
                latitude: self.latitude,
                longitude: self.longitude,
            });
        }
        if self.latitude.abs() > 90.0 {
            return Err(CoordinateError::LatitudeOutOfRange(self.latitude));
        }
        if self.longitude.abs() > 180.0 {
            return Err(CoordinateError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }

    /// Latitude in radians.
    #[inline]
    pub fn lat_rad(&self) -> f64 {
        self.latitude.to_radians()
    }

    /// Longitude in radians.
    #[inline]
    pub fn lon_rad(&self) -> f64 {
        self.longitude.to_radians()
    }
}

impl std::fmt::Display for GeographicPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.6}°{} {:.6}°{}",
            self.latitude.abs(),
            ns,
            self.longitude.abs(),
            ew
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn validation_rejects_nan_and_out_of_range() {
        assert!(GeographicPoint::checked(f64::NAN, 0.0).is_err());
        assert!(GeographicPoint::checked(0.0, f64::INFINITY).is_err());
        assert_eq!(
            GeographicPoint::checked(90.5, 0.0),
            Err(CoordinateError::LatitudeOutOfRange(90.5))
        );
        assert_eq!(
            GeographicPoint::checked(0.0, -180.5),
            Err(CoordinateError::LongitudeOutOfRange(-180.5))
        );
        assert!(GeographicPoint::checked(-90.0, 180.0).is_ok());
    }

    #[test]
    fn angle_wrapping() {
        assert_abs_diff_eq!(angles::normalize_degrees(-90.0), 270.0);
        assert_abs_diff_eq!(angles::normalize_degrees(720.5), 0.5);
        assert_eq!(angles::normalize_degrees(-1e-20), 0.0);
        assert_abs_diff_eq!(angles::wrap_longitude(190.0), -170.0);
        assert_abs_diff_eq!(angles::wrap_longitude(-181.0), 179.0);
        assert_abs_diff_eq!(angles::wrap_longitude(180.0), -180.0);
    }

    #[test]
    fn display_uses_hemisphere_letters() {
        let p = GeographicPoint::new(-33.8688, 151.2093);
        assert_eq!(p.to_string(), "33.868800°S 151.209300°E");
    }
}
