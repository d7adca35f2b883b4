//! Shared low-order solar/lunar series and coordinate transforms (all angles in radians).

use std::f64::consts::PI;

const RAD: f64 = PI / 180.0;
/// Obliquity of the ecliptic at J2000.
const OBLIQUITY: f64 = RAD * 23.4397;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Equatorial {
    pub right_ascension: f64,
    pub declination: f64,
}

pub(crate) fn rad(deg: f64) -> f64 {
    deg * RAD
}

pub(crate) fn right_ascension(l: f64, b: f64) -> f64 {
    (l.sin() * OBLIQUITY.cos() - b.tan() * OBLIQUITY.sin()).atan2(l.cos())
}

pub(crate) fn declination(l: f64, b: f64) -> f64 {
    (b.sin() * OBLIQUITY.cos() + b.cos() * OBLIQUITY.sin() * l.sin()).asin()
}

/// Azimuth measured from south, positive westward.
pub(crate) fn azimuth(hour_angle: f64, phi: f64, dec: f64) -> f64 {
    hour_angle
        .sin()
        .atan2(hour_angle.cos() * phi.sin() - dec.tan() * phi.cos())
}

pub(crate) fn altitude(hour_angle: f64, phi: f64, dec: f64) -> f64 {
    (phi.sin() * dec.sin() + phi.cos() * dec.cos() * hour_angle.cos()).asin()
}

/// Local sidereal time for days since J2000 and west longitude `lw`.
pub(crate) fn sidereal_time(days: f64, lw: f64) -> f64 {
    rad(280.4606 + 360.985_647_37 * days) - lw
}

/// Empirical atmospheric refraction for an apparent altitude above the horizon.
pub(crate) fn astro_refraction(h: f64) -> f64 {
    0.000_296_7 / (h + 0.003_125_36 / (h + 0.089_011_7)).tan()
}

pub(crate) fn solar_mean_anomaly(days: f64) -> f64 {
    rad(357.5291 + 0.985_600_28 * days)
}

pub(crate) fn ecliptic_longitude(mean_anomaly: f64) -> f64 {
    let m = mean_anomaly;
    let center = rad(1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin());
    let perihelion = rad(102.9372);
    m + center + perihelion + PI
}

pub(crate) fn sun_coords(days: f64) -> Equatorial {
    let l = ecliptic_longitude(solar_mean_anomaly(days));
    Equatorial {
        right_ascension: right_ascension(l, 0.0),
        declination: declination(l, 0.0),
    }
}

/// Geocentric lunar coordinates plus Earth-Moon distance in km.
pub(crate) fn moon_coords(days: f64) -> (Equatorial, f64) {
    let mean_longitude = rad(218.316 + 13.176_396 * days);
    let mean_anomaly = rad(134.963 + 13.064_993 * days);
    let argument_of_latitude = rad(93.272 + 13.229_350 * days);

    let l = mean_longitude + rad(6.289) * mean_anomaly.sin();
    let b = rad(5.128) * argument_of_latitude.sin();
    let distance_km = 385_001.0 - 20_905.0 * mean_anomaly.cos();

    let coords = Equatorial {
        right_ascension: right_ascension(l, b),
        declination: declination(l, b),
    };
    (coords, distance_km)
}
