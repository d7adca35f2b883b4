//! Three-parameter (geocentric translation) datum shifts.

use crate::ellipsoid::{Ellipsoid, Geocentric, WGS84};

/// Translation that takes a local datum's geocentric coordinates to WGS84.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatumShift {
    pub ellipsoid: Ellipsoid,
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

/// Indian datum on Everest 1930 (`towgs84=295,736,254`).
pub const INDIAN_EVEREST_1930: DatumShift = DatumShift {
    ellipsoid: crate::ellipsoid::EVEREST_1930,
    dx: 295.0,
    dy: 736.0,
    dz: 254.0,
};

impl DatumShift {
    /// WGS84 latitude/longitude (radians, height 0) to local latitude/longitude/height.
    pub fn from_wgs84(&self, phi: f64, lambda: f64) -> (f64, f64, f64) {
        let g = WGS84.to_geocentric(phi, lambda, 0.0);
        let local = Geocentric {
            x: g.x - self.dx,
            y: g.y - self.dy,
            z: g.z - self.dz,
        };
        self.ellipsoid.from_geocentric(&local)
    }

    /// Local latitude/longitude (radians, height 0) to WGS84 latitude/longitude/height.
    pub fn to_wgs84(&self, phi: f64, lambda: f64) -> (f64, f64, f64) {
        let g = self.ellipsoid.to_geocentric(phi, lambda, 0.0);
        let shifted = Geocentric {
            x: g.x + self.dx,
            y: g.y + self.dy,
            z: g.z + self.dz,
        };
        WGS84.from_geocentric(&shifted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn shift_moves_delhi_by_expected_amount() {
        let (phi, lambda, h) =
            INDIAN_EVEREST_1930.from_wgs84(28.6139_f64.to_radians(), 77.2090_f64.to_radians());
        assert_abs_diff_eq!(phi.to_degrees(), 28.613_880_133, epsilon = 1e-8);
        assert_abs_diff_eq!(lambda.to_degrees(), 77.210_275_576, epsilon = 1e-8);
        assert_abs_diff_eq!(h, 9.567, epsilon = 1e-2);
    }
}
