//! Lunar position, illumination, and named phases.

use std::f64::consts::PI;
use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use terranav_core::constants::SUN_DISTANCE_KM;

use crate::astro::{self, rad};
use crate::error::check_observer;
use crate::time::days_since_j2000;
use crate::EphemerisError;

/// Topocentric moon position. Angles in radians; altitude includes refraction when the
/// moon is above the horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonPosition {
    pub azimuth: f64,
    pub altitude: f64,
    pub distance_km: f64,
    pub parallactic_angle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonIllumination {
    /// Illuminated fraction of the disc, 0 (new) to 1 (full).
    pub fraction: f64,
    /// Position in the synodic cycle: 0 new, 0.25 first quarter, 0.5 full, 0.75 last quarter.
    pub phase: f64,
    /// Midpoint angle of the bright limb (radians, eastward from north).
    pub angle: f64,
}

impl MoonIllumination {
    pub fn phase_name(&self) -> MoonPhase {
        MoonPhase::from_cycle(self.phase)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// Named phase for a cycle value in `[0, 1)`.
    pub fn from_cycle(phase: f64) -> Self {
        match phase {
            p if !(0.03..=0.97).contains(&p) => MoonPhase::New,
            p if p < 0.22 => MoonPhase::WaxingCrescent,
            p if p < 0.28 => MoonPhase::FirstQuarter,
            p if p < 0.47 => MoonPhase::WaxingGibbous,
            p if p < 0.53 => MoonPhase::Full,
            p if p < 0.72 => MoonPhase::WaningGibbous,
            p if p < 0.78 => MoonPhase::LastQuarter,
            _ => MoonPhase::WaningCrescent,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MoonPhase::New => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::Full => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The moon as seen from one observer, before refraction.
struct LocalMoon {
    hour_angle: f64,
    phi: f64,
    dec: f64,
    distance_km: f64,
}

impl LocalMoon {
    fn at(instant: &DateTime<Utc>, latitude: f64, longitude: f64) -> Result<Self, EphemerisError> {
        check_observer(latitude, longitude)?;
        let lw = rad(-longitude);
        let days = days_since_j2000(instant);
        let (coords, distance_km) = astro::moon_coords(days);
        Ok(Self {
            hour_angle: astro::sidereal_time(days, lw) - coords.right_ascension,
            phi: rad(latitude),
            dec: coords.declination,
            distance_km,
        })
    }

    fn geometric_altitude(&self) -> f64 {
        astro::altitude(self.hour_angle, self.phi, self.dec)
    }
}

/// Moon azimuth, altitude, distance and parallactic angle for an observer.
pub fn moon_position(
    instant: &DateTime<Utc>,
    latitude: f64,
    longitude: f64,
) -> Result<MoonPosition, EphemerisError> {
    let moon = LocalMoon::at(instant, latitude, longitude)?;
    let mut altitude = moon.geometric_altitude();
    let LocalMoon {
        hour_angle,
        phi,
        dec,
        distance_km,
    } = moon;

    if altitude > 0.0 {
        altitude += astro::astro_refraction(altitude);
    }
    let parallactic_angle = hour_angle
        .sin()
        .atan2(phi.tan() * dec.cos() - dec.sin() * hour_angle.cos());

    Ok(MoonPosition {
        azimuth: astro::azimuth(hour_angle, phi, dec),
        altitude,
        distance_km,
        parallactic_angle,
    })
}

/// Altitude sampled by [`moon_times`](crate::moon_times). Below the horizon the
/// refraction term is held at its horizon value so the samples stay continuous.
pub(crate) fn sampled_altitude(
    instant: &DateTime<Utc>,
    latitude: f64,
    longitude: f64,
) -> Result<f64, EphemerisError> {
    let h = LocalMoon::at(instant, latitude, longitude)?.geometric_altitude();
    Ok(h + astro::astro_refraction(h.max(0.0)))
}

/// Illuminated fraction, cycle phase and bright-limb angle at an instant (geocentric).
pub fn moon_illumination(instant: &DateTime<Utc>) -> MoonIllumination {
    let days = days_since_j2000(instant);
    let sun = astro::sun_coords(days);
    let (moon, moon_distance_km) = astro::moon_coords(days);

    let (s_dec, s_ra) = (sun.declination, sun.right_ascension);
    let (m_dec, m_ra) = (moon.declination, moon.right_ascension);

    let elongation = (s_dec.sin() * m_dec.sin() + s_dec.cos() * m_dec.cos() * (s_ra - m_ra).cos())
        .clamp(-1.0, 1.0)
        .acos();
    let inc = (SUN_DISTANCE_KM * elongation.sin())
        .atan2(moon_distance_km - SUN_DISTANCE_KM * elongation.cos());
    let angle = (s_dec.cos() * (s_ra - m_ra).sin()).atan2(
        s_dec.sin() * m_dec.cos() - s_dec.cos() * m_dec.sin() * (s_ra - m_ra).cos(),
    );

    let sign = if angle < 0.0 { -1.0 } else { 1.0 };
    MoonIllumination {
        fraction: ((1.0 + inc.cos()) / 2.0).clamp(0.0, 1.0),
        phase: (0.5 + 0.5 * inc * sign / PI).rem_euclid(1.0),
        angle,
    }
}

/// Illumination for every day of a calendar month, sampled at 12:00 UTC.
pub fn phase_calendar(
    year: i32,
    month: u32,
) -> Result<Vec<(NaiveDate, MoonIllumination)>, EphemerisError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(EphemerisError::InvalidCalendarMonth { year, month })?;
    Ok(first
        .iter_days()
        .take_while(|day| day.month() == month)
        .filter_map(|day| {
            let noon = day.and_hms_opt(12, 0, 0)?.and_utc();
            Some((day, moon_illumination(&noon)))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;

    fn reference_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2013, 3, 5, 0, 0, 0).unwrap()
    }

    #[test]
    fn position_matches_reference() {
        let pos = moon_position(&reference_instant(), 50.5, 30.5).unwrap();
        assert_abs_diff_eq!(pos.azimuth, -0.972_781_709_0, epsilon = 1e-9);
        assert_abs_diff_eq!(pos.altitude, 0.017_912_593_0, epsilon = 1e-9);
        assert_abs_diff_eq!(pos.distance_km, 364_121.372_6, epsilon = 1e-3);
        assert_abs_diff_eq!(pos.parallactic_angle, -0.595_735_119_2, epsilon = 1e-9);
    }

    #[test]
    fn refraction_applies_only_above_the_horizon() {
        let below = Utc.with_ymd_and_hms(2013, 3, 4, 15, 0, 0).unwrap();
        let geometric = LocalMoon::at(&below, 50.5, 30.5).unwrap().geometric_altitude();
        assert!(geometric < 0.0);
        let pos = moon_position(&below, 50.5, 30.5).unwrap();
        assert_eq!(pos.altitude, geometric);

        let above = LocalMoon::at(&reference_instant(), 50.5, 30.5).unwrap();
        let pos = moon_position(&reference_instant(), 50.5, 30.5).unwrap();
        assert!(above.geometric_altitude() > 0.0);
        assert!(pos.altitude > above.geometric_altitude());
    }

    #[test]
    fn sampled_altitude_is_continuous_across_the_horizon() {
        let below = Utc.with_ymd_and_hms(2013, 3, 4, 15, 0, 0).unwrap();
        let geometric = LocalMoon::at(&below, 50.5, 30.5).unwrap().geometric_altitude();
        let sampled = sampled_altitude(&below, 50.5, 30.5).unwrap();
        assert_abs_diff_eq!(sampled - geometric, astro::astro_refraction(0.0), epsilon = 1e-15);
        // Refraction at the horizon, about 0.484°.
        assert_abs_diff_eq!(astro::astro_refraction(0.0), 0.008_45, epsilon = 1e-5);
    }

    #[test]
    fn illumination_matches_reference() {
        let illum = moon_illumination(&reference_instant());
        assert_abs_diff_eq!(illum.fraction, 0.484_806_820_2, epsilon = 1e-9);
        assert_abs_diff_eq!(illum.phase, 0.754_836_883_9, epsilon = 1e-9);
        assert_abs_diff_eq!(illum.angle, 1.673_294_267_9, epsilon = 1e-9);
        assert_eq!(illum.phase_name(), MoonPhase::LastQuarter);
    }

    #[test]
    fn new_and_full_moon() {
        let new = moon_illumination(&Utc.with_ymd_and_hms(2024, 1, 11, 11, 57, 0).unwrap());
        assert!(new.fraction < 0.02);
        assert_eq!(new.phase_name(), MoonPhase::New);
        let full = moon_illumination(&Utc.with_ymd_and_hms(2024, 1, 25, 17, 54, 0).unwrap());
        assert!(full.fraction > 0.98);
        assert_eq!(full.phase_name(), MoonPhase::Full);
    }

    #[test]
    fn phase_boundaries() {
        assert_eq!(MoonPhase::from_cycle(0.0), MoonPhase::New);
        assert_eq!(MoonPhase::from_cycle(0.98), MoonPhase::New);
        assert_eq!(MoonPhase::from_cycle(0.03), MoonPhase::WaxingCrescent);
        assert_eq!(MoonPhase::from_cycle(0.25), MoonPhase::FirstQuarter);
        assert_eq!(MoonPhase::from_cycle(0.4), MoonPhase::WaxingGibbous);
        assert_eq!(MoonPhase::from_cycle(0.5), MoonPhase::Full);
        assert_eq!(MoonPhase::from_cycle(0.6), MoonPhase::WaningGibbous);
        assert_eq!(MoonPhase::from_cycle(0.75), MoonPhase::LastQuarter);
        assert_eq!(MoonPhase::from_cycle(0.9), MoonPhase::WaningCrescent);
        assert_eq!(MoonPhase::Full.to_string(), "Full Moon");
    }

    #[test]
    fn calendar_covers_the_month() {
        let feb = phase_calendar(2024, 2).unwrap();
        assert_eq!(feb.len(), 29);
        assert_eq!(feb[0].0, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(feb[9].1.phase_name(), MoonPhase::New);
        assert_eq!(feb[23].1.phase_name(), MoonPhase::Full);
        assert_eq!(
            phase_calendar(2024, 13),
            Err(EphemerisError::InvalidCalendarMonth {
                year: 2024,
                month: 13
            })
        );
    }
}
