//! Solar position and daily event times.

use std::f64::consts::PI;
use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use terranav_core::constants::J2000;

use crate::astro::{self, rad};
use crate::error::check_observer;
use crate::time::{days_since_j2000, from_julian};
use crate::EphemerisError;

/// Sun position in horizontal coordinates (radians, azimuth from south, westward positive).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    pub azimuth: f64,
    pub altitude: f64,
}

/// Named solar instants within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SunEvent {
    SolarNoon,
    Nadir,
    Sunrise,
    Sunset,
    SunriseEnd,
    SunsetStart,
    Dawn,
    Dusk,
    NauticalDawn,
    NauticalDusk,
    NightEnd,
    Night,
    GoldenHourEnd,
    GoldenHour,
}

impl SunEvent {
    pub const ALL: [SunEvent; 14] = [
        SunEvent::SolarNoon,
        SunEvent::Nadir,
        SunEvent::Sunrise,
        SunEvent::Sunset,
        SunEvent::SunriseEnd,
        SunEvent::SunsetStart,
        SunEvent::Dawn,
        SunEvent::Dusk,
        SunEvent::NauticalDawn,
        SunEvent::NauticalDusk,
        SunEvent::NightEnd,
        SunEvent::Night,
        SunEvent::GoldenHourEnd,
        SunEvent::GoldenHour,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SunEvent::SolarNoon => "solar noon",
            SunEvent::Nadir => "nadir",
            SunEvent::Sunrise => "sunrise",
            SunEvent::Sunset => "sunset",
            SunEvent::SunriseEnd => "sunrise end",
            SunEvent::SunsetStart => "sunset start",
            SunEvent::Dawn => "dawn",
            SunEvent::Dusk => "dusk",
            SunEvent::NauticalDawn => "nautical dawn",
            SunEvent::NauticalDusk => "nautical dusk",
            SunEvent::NightEnd => "night end",
            SunEvent::Night => "night",
            SunEvent::GoldenHourEnd => "golden hour end",
            SunEvent::GoldenHour => "golden hour",
        }
    }
}

impl fmt::Display for SunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Altitude thresholds (degrees) with the morning and evening event they bound.
const THRESHOLDS: [(f64, SunEvent, SunEvent); 6] = [
    (-0.833, SunEvent::Sunrise, SunEvent::Sunset),
    (-0.3, SunEvent::SunriseEnd, SunEvent::SunsetStart),
    (-6.0, SunEvent::Dawn, SunEvent::Dusk),
    (-12.0, SunEvent::NauticalDawn, SunEvent::NauticalDusk),
    (-18.0, SunEvent::NightEnd, SunEvent::Night),
    (6.0, SunEvent::GoldenHourEnd, SunEvent::GoldenHour),
];

const J0: f64 = 0.0009;

/// Solar event times for one day. Threshold events the sun never reaches are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SunTimes {
    pub solar_noon: DateTime<Utc>,
    pub nadir: DateTime<Utc>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub sunrise_end: Option<DateTime<Utc>>,
    pub sunset_start: Option<DateTime<Utc>>,
    pub dawn: Option<DateTime<Utc>>,
    pub dusk: Option<DateTime<Utc>>,
    pub nautical_dawn: Option<DateTime<Utc>>,
    pub nautical_dusk: Option<DateTime<Utc>>,
    pub night_end: Option<DateTime<Utc>>,
    pub night: Option<DateTime<Utc>>,
    pub golden_hour_end: Option<DateTime<Utc>>,
    pub golden_hour: Option<DateTime<Utc>>,
}

impl SunTimes {
    fn new(solar_noon: DateTime<Utc>, nadir: DateTime<Utc>) -> Self {
        Self {
            solar_noon,
            nadir,
            sunrise: None,
            sunset: None,
            sunrise_end: None,
            sunset_start: None,
            dawn: None,
            dusk: None,
            nautical_dawn: None,
            nautical_dusk: None,
            night_end: None,
            night: None,
            golden_hour_end: None,
            golden_hour: None,
        }
    }

    fn slot(&mut self, event: SunEvent) -> Option<&mut Option<DateTime<Utc>>> {
        match event {
            SunEvent::SolarNoon | SunEvent::Nadir => None,
            SunEvent::Sunrise => Some(&mut self.sunrise),
            SunEvent::Sunset => Some(&mut self.sunset),
            SunEvent::SunriseEnd => Some(&mut self.sunrise_end),
            SunEvent::SunsetStart => Some(&mut self.sunset_start),
            SunEvent::Dawn => Some(&mut self.dawn),
            SunEvent::Dusk => Some(&mut self.dusk),
            SunEvent::NauticalDawn => Some(&mut self.nautical_dawn),
            SunEvent::NauticalDusk => Some(&mut self.nautical_dusk),
            SunEvent::NightEnd => Some(&mut self.night_end),
            SunEvent::Night => Some(&mut self.night),
            SunEvent::GoldenHourEnd => Some(&mut self.golden_hour_end),
            SunEvent::GoldenHour => Some(&mut self.golden_hour),
        }
    }

    /// Instant of a named event, if it occurs this day.
    pub fn get(&self, event: SunEvent) -> Option<DateTime<Utc>> {
        match event {
            SunEvent::SolarNoon => Some(self.solar_noon),
            SunEvent::Nadir => Some(self.nadir),
            SunEvent::Sunrise => self.sunrise,
            SunEvent::Sunset => self.sunset,
            SunEvent::SunriseEnd => self.sunrise_end,
            SunEvent::SunsetStart => self.sunset_start,
            SunEvent::Dawn => self.dawn,
            SunEvent::Dusk => self.dusk,
            SunEvent::NauticalDawn => self.nautical_dawn,
            SunEvent::NauticalDusk => self.nautical_dusk,
            SunEvent::NightEnd => self.night_end,
            SunEvent::Night => self.night,
            SunEvent::GoldenHourEnd => self.golden_hour_end,
            SunEvent::GoldenHour => self.golden_hour,
        }
    }

    /// Defined events in chronological order.
    pub fn ordered(&self) -> Vec<(SunEvent, DateTime<Utc>)> {
        let mut events: Vec<_> = SunEvent::ALL
            .iter()
            .filter_map(|&event| self.get(event).map(|at| (event, at)))
            .collect();
        events.sort_by_key(|&(_, at)| at);
        events
    }

    /// Time between sunrise and sunset, when both happen.
    pub fn daylight(&self) -> Option<TimeDelta> {
        Some(self.sunset? - self.sunrise?)
    }
}

/// Sun azimuth and altitude for an observer. No refraction correction is applied.
pub fn sun_position(
    instant: &DateTime<Utc>,
    latitude: f64,
    longitude: f64,
) -> Result<SunPosition, EphemerisError> {
    check_observer(latitude, longitude)?;
    let lw = rad(-longitude);
    let phi = rad(latitude);
    let days = days_since_j2000(instant);

    let coords = astro::sun_coords(days);
    let hour_angle = astro::sidereal_time(days, lw) - coords.right_ascension;

    Ok(SunPosition {
        azimuth: astro::azimuth(hour_angle, phi, coords.declination),
        altitude: astro::altitude(hour_angle, phi, coords.declination),
    })
}

/// Horizon dip in degrees for an observer `height_m` above the surface.
pub fn dip(height_m: f64) -> f64 {
    -2.076 * height_m.sqrt() / 60.0
}

fn approx_transit(hour_angle: f64, lw: f64, cycle: f64) -> f64 {
    J0 + (hour_angle + lw) / (2.0 * PI) + cycle
}

fn solar_transit_j(ds: f64, mean_anomaly: f64, ecliptic_longitude: f64) -> f64 {
    J2000 + ds + 0.0053 * mean_anomaly.sin() - 0.0069 * (2.0 * ecliptic_longitude).sin()
}

/// Solar noon, nadir and the rise/set pair of every altitude threshold for the day
/// containing `instant` at the observer's longitude.
pub fn sun_times(
    instant: &DateTime<Utc>,
    latitude: f64,
    longitude: f64,
    height_m: f64,
) -> Result<SunTimes, EphemerisError> {
    check_observer(latitude, longitude)?;
    if !height_m.is_finite() || height_m < 0.0 {
        log::warn!("rejecting observer height {height_m}");
        return Err(EphemerisError::InvalidObserverHeight(height_m));
    }

    let lw = rad(-longitude);
    let phi = rad(latitude);
    let dh = dip(height_m);
    let days = days_since_j2000(instant);

    let cycle = (days - J0 - lw / (2.0 * PI)).round();
    let ds = approx_transit(0.0, lw, cycle);
    let m = astro::solar_mean_anomaly(ds);
    let l = astro::ecliptic_longitude(m);
    let dec = astro::declination(l, 0.0);
    let j_noon = solar_transit_j(ds, m, l);

    let mut times = SunTimes::new(from_julian(j_noon)?, from_julian(j_noon - 0.5)?);

    for (h0, morning, evening) in THRESHOLDS {
        let x = (rad(h0 + dh).sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos());
        // |x| > 1: the sun never crosses this altitude today
        if x.is_nan() || x.abs() > 1.0 {
            continue;
        }
        let w = x.acos();
        let j_set = solar_transit_j(approx_transit(w, lw, cycle), m, l);
        let j_rise = j_noon - (j_set - j_noon);
        if let Some(slot) = times.slot(morning) {
            *slot = Some(from_julian(j_rise)?);
        }
        if let Some(slot) = times.slot(evening) {
            *slot = Some(from_julian(j_set)?);
        }
    }

    log::debug!(
        "sun times at ({latitude}, {longitude}): noon {}, sunrise {:?}, sunset {:?}",
        times.solar_noon,
        times.sunrise,
        times.sunset
    );
    Ok(times)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;

    fn reference_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2013, 3, 5, 0, 0, 0).unwrap()
    }

    fn assert_close(actual: Option<DateTime<Utc>>, h: u32, m: u32, s: u32) {
        let expected = Utc.with_ymd_and_hms(2013, 3, 5, h, m, s).unwrap();
        let actual = actual.expect("event should occur");
        assert!(
            (actual - expected).num_seconds().abs() <= 1,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn position_matches_reference() {
        let pos = sun_position(&reference_instant(), 50.5, 30.5).unwrap();
        assert_abs_diff_eq!(pos.azimuth, -2.491_628_126_7, epsilon = 1e-9);
        assert_abs_diff_eq!(pos.altitude, -0.697_265_555_9, epsilon = 1e-9);
    }

    #[test]
    fn times_match_reference() {
        let times = sun_times(&reference_instant(), 50.5, 30.5, 0.0).unwrap();
        assert_close(Some(times.solar_noon), 10, 10, 57);
        assert_close(times.sunrise, 4, 34, 56);
        assert_close(times.sunset, 15, 46, 57);
        assert_close(times.sunrise_end, 4, 38, 19);
        assert_close(times.sunset_start, 15, 43, 34);
        assert_close(times.dawn, 4, 2, 17);
        assert_close(times.dusk, 16, 19, 36);
        assert_close(times.nautical_dawn, 3, 24, 31);
        assert_close(times.nautical_dusk, 16, 57, 22);
        assert_close(times.night_end, 2, 46, 17);
        assert_close(times.night, 17, 35, 36);
        assert_close(times.golden_hour_end, 5, 19, 1);
        assert_close(times.golden_hour, 15, 2, 52);
        assert_eq!(times.nadir, times.solar_noon - TimeDelta::hours(12));
    }

    #[test]
    fn observer_height_brings_sunrise_forward() {
        let sea = sun_times(&reference_instant(), 50.5, 30.5, 0.0).unwrap();
        let high = sun_times(&reference_instant(), 50.5, 30.5, 2_000.0).unwrap();
        assert!(high.sunrise.unwrap() < sea.sunrise.unwrap());
        assert!(high.sunset.unwrap() > sea.sunset.unwrap());
        assert_close(high.sunrise, 4, 25, 7);
    }

    #[test]
    fn polar_day_has_no_threshold_events() {
        let solstice = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
        let times = sun_times(&solstice, 80.0, 15.0, 0.0).unwrap();
        assert!(times.sunrise.is_none() && times.sunset.is_none());
        assert!(times.golden_hour.is_none());
        assert!(times.night.is_none());
        assert!(times.daylight().is_none());
        let ordered = times.ordered();
        assert_eq!(ordered.len(), 2);
        assert_eq!(ordered[0].0, SunEvent::Nadir);
    }

    #[test]
    fn ordered_events_are_chronological() {
        let times = sun_times(&reference_instant(), 50.5, 30.5, 0.0).unwrap();
        let ordered = times.ordered();
        assert_eq!(ordered.len(), 14);
        assert!(ordered.windows(2).all(|w| w[0].1 <= w[1].1));
        assert_eq!(ordered[0].0, SunEvent::Nadir);
        assert_eq!(ordered[1].0, SunEvent::NightEnd);
        assert_eq!(times.get(SunEvent::Dusk), times.dusk);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let t = reference_instant();
        assert_eq!(
            sun_position(&t, 91.0, 0.0),
            Err(EphemerisError::InvalidLatitude(91.0))
        );
        assert!(matches!(
            sun_times(&t, 0.0, f64::NAN, 0.0),
            Err(EphemerisError::InvalidLongitude(_))
        ));
        assert_eq!(
            sun_times(&t, 0.0, 0.0, -5.0),
            Err(EphemerisError::InvalidObserverHeight(-5.0))
        );
    }
}
