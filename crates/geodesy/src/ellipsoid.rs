//! Reference ellipsoids and geodetic/geocentric conversion.

use terranav_core::constants::{EVEREST_1930_A, EVEREST_1930_INV_F, WGS84_A, WGS84_INV_F};

/// Reference ellipsoid parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    pub a: f64,
    /// Flattening
    pub f: f64,
}

pub const WGS84: Ellipsoid = Ellipsoid::from_inverse_flattening(WGS84_A, WGS84_INV_F);
pub const EVEREST_1930: Ellipsoid =
    Ellipsoid::from_inverse_flattening(EVEREST_1930_A, EVEREST_1930_INV_F);

/// Earth-centred Cartesian position (metres).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geocentric {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Ellipsoid {
    pub const fn from_inverse_flattening(a: f64, inv_f: f64) -> Self {
        Self { a, f: 1.0 / inv_f }
    }

    /// First eccentricity squared.
    #[inline]
    pub const fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// First eccentricity.
    #[inline]
    pub fn e(&self) -> f64 {
        self.e2().sqrt()
    }

    /// Third flattening `f / (2 - f)`.
    #[inline]
    pub const fn n(&self) -> f64 {
        self.f / (2.0 - self.f)
    }

    /// Radius of curvature in the prime vertical at geodetic latitude `phi` (radians).
    #[inline]
    pub fn prime_vertical_radius(&self, phi: f64) -> f64 {
        let s = phi.sin();
        self.a / (1.0 - self.e2() * s * s).sqrt()
    }

    /// Geodetic latitude/longitude (radians) and height (m) to geocentric XYZ.
    pub fn to_geocentric(&self, phi: f64, lambda: f64, h: f64) -> Geocentric {
        let n = self.prime_vertical_radius(phi);
        let (sp, cp) = phi.sin_cos();
        let (sl, cl) = lambda.sin_cos();
        Geocentric {
            x: (n + h) * cp * cl,
            y: (n + h) * cp * sl,
            z: (n * (1.0 - self.e2()) + h) * sp,
        }
    }

    /// Geocentric XYZ to geodetic latitude/longitude (radians) and height (m).
    ///
    /// Fixed-point iteration on latitude; converges to machine precision within a
    /// handful of passes for points near the surface.
    pub fn from_geocentric(&self, g: &Geocentric) -> (f64, f64, f64) {
        const MAX_ITER: usize = 30;
        let e2 = self.e2();
        let lambda = g.y.atan2(g.x);
        let p = g.x.hypot(g.y);
        let mut phi = g.z.atan2(p * (1.0 - e2));
        for _ in 0..MAX_ITER {
            let n = self.prime_vertical_radius(phi);
            let next = (g.z + e2 * n * phi.sin()).atan2(p);
            let done = (next - phi).abs() < 1e-15;
            phi = next;
            if done {
                break;
            }
        }
        let n = self.prime_vertical_radius(phi);
        let h = if phi.cos().abs() > 1e-10 {
            p / phi.cos() - n
        } else {
            g.z.abs() / phi.sin().abs() - n * (1.0 - e2)
        };
        (phi, lambda, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn wgs84_derived_constants() {
        assert_abs_diff_eq!(WGS84.e(), 0.081_819_190_842_622, epsilon = 1e-12);
        assert_abs_diff_eq!(WGS84.n(), 0.001_679_220_386_383_705, epsilon = 1e-12);
        assert!(EVEREST_1930.a < WGS84.a);
    }

    #[test]
    fn geocentric_round_trip() {
        for &(lat, lon, h) in &[
            (28.6139_f64, 77.2090_f64, 216.0),
            (-33.9, 18.4, 0.0),
            (89.9, -45.0, 1200.0),
            (0.0, 179.9, -30.0),
        ] {
            let g = EVEREST_1930.to_geocentric(lat.to_radians(), lon.to_radians(), h);
            let (phi, lambda, hh) = EVEREST_1930.from_geocentric(&g);
            assert_abs_diff_eq!(phi.to_degrees(), lat, epsilon = 1e-10);
            assert_abs_diff_eq!(lambda.to_degrees(), lon, epsilon = 1e-10);
            assert_abs_diff_eq!(hh, h, epsilon = 1e-4);
        }
    }
}
