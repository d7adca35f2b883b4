//! Lambert Conformal Conic with one standard parallel (LCC 1SP).

use std::f64::consts::FRAC_PI_2;

use crate::ellipsoid::Ellipsoid;
use crate::error::{ProjectionError, ensure_finite};

/// Constants defining a single LCC 1SP zone. Angles in degrees, offsets in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LccZoneParams {
    pub central_meridian: f64,
    pub origin_latitude: f64,
    pub false_easting: f64,
    pub false_northing: f64,
    pub scale_factor: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct LambertConformalConic {
    ellipsoid: Ellipsoid,
    params: LccZoneParams,
    /// Cone constant; equals `sin(origin_latitude)` for the one-parallel case.
    n: f64,
    big_f: f64,
    rho0: f64,
}

/// Isometric helper `t(φ)` from Snyder (15-9).
fn tsfn(e: f64, phi: f64) -> f64 {
    let s = phi.sin();
    (std::f64::consts::FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - e * s) / (1.0 + e * s)).powf(e / 2.0)
}

impl LambertConformalConic {
    pub fn new(ellipsoid: Ellipsoid, params: LccZoneParams) -> Self {
        let e = ellipsoid.e();
        let phi1 = params.origin_latitude.to_radians();
        let (s1, c1) = phi1.sin_cos();
        let m1 = c1 / (1.0 - ellipsoid.e2() * s1 * s1).sqrt();
        let t1 = tsfn(e, phi1);
        let n = s1;
        let big_f = m1 / (n * t1.powf(n));
        let rho0 = ellipsoid.a * big_f * t1.powf(n);
        Self {
            ellipsoid,
            params,
            n,
            big_f,
            rho0,
        }
    }

    /// Latitude/longitude (degrees, on this projection's ellipsoid) to easting/northing.
    pub fn forward(&self, lat: f64, lon: f64) -> Result<(f64, f64), ProjectionError> {
        // The pole opposite the cone apex maps to infinity.
        if (lat + 90.0 * self.n.signum()).abs() < 1e-10 {
            return Err(ProjectionError::Singular {
                system: "lambert conformal conic",
            });
        }
        let p = &self.params;
        let e = self.ellipsoid.e();
        let rho = self.ellipsoid.a * self.big_f * tsfn(e, lat.to_radians()).powf(self.n);
        let theta = self.n * (lon - p.central_meridian).to_radians();
        let easting = p.false_easting + p.scale_factor * rho * theta.sin();
        let northing = p.false_northing + p.scale_factor * (self.rho0 - rho * theta.cos());
        ensure_finite("lambert conformal conic", &[easting, northing])?;
        Ok((easting, northing))
    }

    /// Easting/northing to latitude/longitude (degrees, on this projection's ellipsoid).
    pub fn inverse(&self, easting: f64, northing: f64) -> Result<(f64, f64), ProjectionError> {
        const MAX_ITER: usize = 30;
        let p = &self.params;
        let e = self.ellipsoid.e();
        let dx = (easting - p.false_easting) / p.scale_factor;
        let dy = self.rho0 - (northing - p.false_northing) / p.scale_factor;

        let rho = dx.hypot(dy).copysign(self.n);
        let theta = if self.n > 0.0 {
            dx.atan2(dy)
        } else {
            (-dx).atan2(-dy)
        };

        let t = (rho / (self.ellipsoid.a * self.big_f)).powf(1.0 / self.n);
        let mut phi = FRAC_PI_2 - 2.0 * t.atan();
        for _ in 0..MAX_ITER {
            let s = phi.sin();
            let conformal = ((1.0 - e * s) / (1.0 + e * s)).powf(e / 2.0);
            let next = FRAC_PI_2 - 2.0 * (t * conformal).atan();
            let done = (next - phi).abs() < 1e-15;
            phi = next;
            if done {
                break;
            }
        }

        let lat = phi.to_degrees();
        let lon = p.central_meridian + (theta / self.n).to_degrees();
        ensure_finite("lambert conformal conic", &[lat, lon])?;
        Ok((lat, lon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoid::EVEREST_1930;
    use approx::assert_abs_diff_eq;

    const PARAMS: LccZoneParams = LccZoneParams {
        central_meridian: 74.0,
        origin_latitude: 26.0,
        false_easting: 2_743_196.4,
        false_northing: 914_398.8,
        scale_factor: 0.998_786_4,
    };

    #[test]
    fn natural_origin_maps_to_false_origin() {
        let lcc = LambertConformalConic::new(EVEREST_1930, PARAMS);
        let (e, n) = lcc.forward(26.0, 74.0).unwrap();
        assert_abs_diff_eq!(e, PARAMS.false_easting, epsilon = 1e-6);
        assert_abs_diff_eq!(n, PARAMS.false_northing, epsilon = 1e-6);
    }

    #[test]
    fn inverse_undoes_forward() {
        let lcc = LambertConformalConic::new(EVEREST_1930, PARAMS);
        for &(lat, lon) in &[(28.6, 77.2), (20.0, 70.0), (32.0, 66.0), (22.5, 81.5)] {
            let (e, n) = lcc.forward(lat, lon).unwrap();
            let (lat2, lon2) = lcc.inverse(e, n).unwrap();
            assert_abs_diff_eq!(lat2, lat, epsilon = 1e-10);
            assert_abs_diff_eq!(lon2, lon, epsilon = 1e-10);
        }
    }

    #[test]
    fn far_pole_is_singular() {
        let lcc = LambertConformalConic::new(EVEREST_1930, PARAMS);
        assert!(lcc.forward(-90.0, 74.0).is_err());
    }
}
