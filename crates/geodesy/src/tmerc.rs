//! Ellipsoidal Transverse Mercator using the 6th-order Krüger series.
//!
//! Accurate to well below a millimetre within several thousand kilometres of the
//! central meridian, which covers every UTM zone with a wide margin.

use std::f64::consts::FRAC_PI_2;

use crate::ellipsoid::Ellipsoid;
use crate::error::{ProjectionError, ensure_finite};

const ORDER: usize = 6;
const SYSTEM: &str = "transverse mercator";
/// Largest |η′| accepted, about 84° of longitude from the central meridian on the equator.
/// The series diverges well before the singularity at 90°.
const MAX_ETA_PRIME: f64 = 3.0;
/// Slack on |ξ′| ≤ π/2 for grid inputs that land on a pole after rounding.
const POLE_SLACK: f64 = 1e-12;

/// Whether conformal-sphere coordinates lie inside the region the series handles.
/// NaN falls outside.
fn in_domain(xi_p: f64, eta_p: f64) -> bool {
    eta_p.abs() <= MAX_ETA_PRIME && xi_p.abs() <= FRAC_PI_2 + POLE_SLACK
}

fn singular(xi_p: f64, eta_p: f64) -> ProjectionError {
    log::warn!("{SYSTEM} input outside the projection domain (xi'={xi_p}, eta'={eta_p})");
    ProjectionError::Singular { system: SYSTEM }
}

/// Transverse Mercator parameterisation (no false origin applied).
#[derive(Debug, Clone, Copy)]
pub struct TransverseMercator {
    ellipsoid: Ellipsoid,
    lon0: f64,
    /// Rectifying radius scaled by the central scale factor.
    scaled_radius: f64,
    alpha: [f64; ORDER],
    beta: [f64; ORDER],
}

impl TransverseMercator {
    /// `lon0` is the central meridian in degrees.
    pub fn new(ellipsoid: Ellipsoid, k0: f64, lon0: f64) -> Self {
        let n = ellipsoid.n();
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let n6 = n5 * n;

        let a_rect = ellipsoid.a / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0 + n6 / 256.0);

        let alpha = [
            n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0
                - 127.0 * n5 / 288.0
                + 7891.0 * n6 / 37800.0,
            13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0 + 281.0 * n5 / 630.0
                - 1_983_433.0 * n6 / 1_935_360.0,
            61.0 * n3 / 240.0 - 103.0 * n4 / 140.0 + 15061.0 * n5 / 26880.0
                + 167_603.0 * n6 / 181_440.0,
            49561.0 * n4 / 161_280.0 - 179.0 * n5 / 168.0 + 6_601_661.0 * n6 / 7_257_600.0,
            34729.0 * n5 / 80640.0 - 3_418_889.0 * n6 / 1_995_840.0,
            212_378_941.0 * n6 / 319_334_400.0,
        ];
        let beta = [
            n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0 - n4 / 360.0 - 81.0 * n5 / 512.0
                + 96199.0 * n6 / 604_800.0,
            n2 / 48.0 + n3 / 15.0 - 437.0 * n4 / 1440.0 + 46.0 * n5 / 105.0
                - 1_118_711.0 * n6 / 3_870_720.0,
            17.0 * n3 / 480.0 - 37.0 * n4 / 840.0 - 209.0 * n5 / 4480.0
                + 5569.0 * n6 / 90720.0,
            4397.0 * n4 / 161_280.0 - 11.0 * n5 / 504.0 - 830_251.0 * n6 / 7_257_600.0,
            4583.0 * n5 / 161_280.0 - 108_847.0 * n6 / 3_991_680.0,
            20_648_693.0 * n6 / 638_668_800.0,
        ];

        Self {
            ellipsoid,
            lon0,
            scaled_radius: k0 * a_rect,
            alpha,
            beta,
        }
    }

    /// Project latitude/longitude (degrees) to (x, y) metres relative to the
    /// central meridian and the equator.
    ///
    /// Points 90° or more from the central meridian, and equatorial points close to it,
    /// are [`ProjectionError::Singular`].
    pub fn forward(&self, lat: f64, lon: f64) -> Result<(f64, f64), ProjectionError> {
        let e = self.ellipsoid.e();
        let phi = lat.to_radians();
        let lambda = (lon - self.lon0).to_radians();
        let (sin_l, cos_l) = lambda.sin_cos();

        let tau = phi.tan();
        let sigma = (e * (e * tau / (1.0 + tau * tau).sqrt()).atanh()).sinh();
        let tau_p = tau * (1.0 + sigma * sigma).sqrt() - sigma * (1.0 + tau * tau).sqrt();

        let xi_p = tau_p.atan2(cos_l);
        let eta_p = (sin_l / (tau_p * tau_p + cos_l * cos_l).sqrt()).asinh();
        if cos_l <= 0.0 || !in_domain(xi_p, eta_p) {
            return Err(singular(xi_p, eta_p));
        }

        let mut xi = xi_p;
        let mut eta = eta_p;
        for (j, a) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi += a * (k * xi_p).sin() * (k * eta_p).cosh();
            eta += a * (k * xi_p).cos() * (k * eta_p).sinh();
        }

        let x = self.scaled_radius * eta;
        let y = self.scaled_radius * xi;
        ensure_finite(SYSTEM, &[x, y])?;
        Ok((x, y))
    }

    /// Inverse of [`forward`](Self::forward): (x, y) metres to latitude/longitude degrees.
    /// Grid positions outside the image of the forward domain are rejected.
    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        const MAX_ITER: usize = 20;
        let e = self.ellipsoid.e();
        let e2 = self.ellipsoid.e2();

        let xi = y / self.scaled_radius;
        let eta = x / self.scaled_radius;
        let mut xi_p = xi;
        let mut eta_p = eta;
        for (j, b) in self.beta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi_p -= b * (k * xi).sin() * (k * eta).cosh();
            eta_p -= b * (k * xi).cos() * (k * eta).sinh();
        }
        if !in_domain(xi_p, eta_p) {
            return Err(singular(xi_p, eta_p));
        }

        let sinh_eta = eta_p.sinh();
        let (sin_xi, cos_xi) = xi_p.sin_cos();
        let tau_p = sin_xi / (sinh_eta * sinh_eta + cos_xi * cos_xi).sqrt();
        let lambda = sinh_eta.atan2(cos_xi);

        // Newton iteration for tau from tau' (Karney 2011, eq. 19-21)
        let mut tau = tau_p;
        for _ in 0..MAX_ITER {
            let sigma = (e * (e * tau / (1.0 + tau * tau).sqrt()).atanh()).sinh();
            let tau_i = tau * (1.0 + sigma * sigma).sqrt() - sigma * (1.0 + tau * tau).sqrt();
            let d_tau = (tau_p - tau_i) / (1.0 + tau_i * tau_i).sqrt()
                * (1.0 + (1.0 - e2) * tau * tau)
                / ((1.0 - e2) * (1.0 + tau * tau).sqrt());
            tau += d_tau;
            if d_tau.abs() < 1e-12 * tau.abs().max(1.0) {
                break;
            }
        }

        let lat = tau.atan().to_degrees();
        let lon = self.lon0 + lambda.to_degrees();
        ensure_finite(SYSTEM, &[lat, lon])?;
        Ok((lat, lon))
    }
}
