//! Moonrise and moonset by hourly sampling with a quadratic fit per three-hour window.

use chrono::{DateTime, NaiveTime, Offset, TimeDelta, TimeZone, Utc};

use crate::astro::rad;
use crate::error::check_observer;
use crate::moon::sampled_altitude;
use crate::time::{from_julian, to_julian};
use crate::EphemerisError;

/// Moon rise/set for one civil day. When neither occurs, exactly one of the flags is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoonTimes {
    pub rise: Option<DateTime<Utc>>,
    pub set: Option<DateTime<Utc>>,
    pub always_up: bool,
    pub always_down: bool,
}

/// Effective horizon for the moon's centre (degrees).
const HORIZON_OFFSET_DEG: f64 = 0.133;

/// Start of the civil day containing `date`, in UTC.
fn local_midnight<Tz: TimeZone>(date: &DateTime<Tz>) -> DateTime<Utc> {
    let midnight = date.date_naive().and_time(NaiveTime::MIN);
    match date.timezone().from_local_datetime(&midnight).earliest() {
        Some(start) => start.with_timezone(&Utc),
        // midnight skipped by a DST jump: fall back to the instant's own offset
        None => {
            let offset = TimeDelta::seconds(date.offset().fix().local_minus_utc().into());
            (midnight - offset).and_utc()
        }
    }
}

fn hours_later(start: &DateTime<Utc>, hours: f64) -> Result<DateTime<Utc>, EphemerisError> {
    from_julian(to_julian(start) + hours / 24.0)
}

/// Moonrise and moonset during the civil day (in `date`'s time zone) that contains `date`.
///
/// Altitudes are sampled at each hour from local midnight through the next midnight,
/// with refraction held at its horizon value while the moon is below it.
/// Every window of three samples is fitted with a parabola; a root inside the window is a
/// crossing of the effective horizon. The search stops once both a rise and a set have
/// been found.
pub fn moon_times<Tz: TimeZone>(
    date: &DateTime<Tz>,
    latitude: f64,
    longitude: f64,
) -> Result<MoonTimes, EphemerisError> {
    check_observer(latitude, longitude)?;
    let start = local_midnight(date);
    let hc = rad(HORIZON_OFFSET_DEG);

    let altitude_at = |hour: u32| -> Result<f64, EphemerisError> {
        let at = start + TimeDelta::hours(hour.into());
        Ok(sampled_altitude(&at, latitude, longitude)? - hc)
    };

    let mut h0 = altitude_at(0)?;
    let mut rise: Option<f64> = None;
    let mut set: Option<f64> = None;

    for i in (1..=23).step_by(2) {
        let h1 = altitude_at(i)?;
        let h2 = altitude_at(i + 1)?;
        let hour = f64::from(i);

        let a = (h0 + h2) / 2.0 - h1;
        let b = (h2 - h0) / 2.0;
        let xe = -b / (2.0 * a);
        let ye = (a * xe + b) * xe + h1;
        let d = b * b - 4.0 * a * h1;

        let mut roots = 0;
        let mut x1 = 0.0;
        let mut x2 = 0.0;
        if d >= 0.0 {
            let dx = d.sqrt() / (a.abs() * 2.0);
            x1 = xe - dx;
            x2 = xe + dx;
            if x1.abs() <= 1.0 {
                roots += 1;
            }
            if x2.abs() <= 1.0 {
                roots += 1;
            }
            if x1 < -1.0 {
                x1 = x2;
            }
        }

        match roots {
            1 if h0 < 0.0 => rise = Some(hour + x1),
            1 => set = Some(hour + x1),
            2 => {
                let (r, s) = if ye < 0.0 { (x2, x1) } else { (x1, x2) };
                rise = Some(hour + r);
                set = Some(hour + s);
            }
            _ => {}
        }

        if rise.is_some() && set.is_some() {
            break;
        }
        h0 = h2;
    }

    let never_crosses = rise.is_none() && set.is_none();
    let times = MoonTimes {
        rise: rise.map(|h| hours_later(&start, h)).transpose()?,
        set: set.map(|h| hours_later(&start, h)).transpose()?,
        always_up: never_crosses && h0 > 0.0,
        always_down: never_crosses && h0 <= 0.0,
    };
    log::debug!(
        "moon times from {start} at ({latitude}, {longitude}): rise {:?}, set {:?}, up {}, down {}",
        times.rise,
        times.set,
        times.always_up,
        times.always_down
    );
    Ok(times)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn assert_near(actual: Option<DateTime<Utc>>, expected: DateTime<Utc>) {
        let actual = actual.expect("event should occur");
        assert!(
            (actual - expected).num_seconds().abs() <= 2,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn rise_and_set_match_reference() {
        let day = Utc.with_ymd_and_hms(2013, 3, 4, 15, 0, 0).unwrap();
        let times = moon_times(&day, 50.5, 30.5).unwrap();
        assert_near(times.rise, Utc.with_ymd_and_hms(2013, 3, 4, 23, 52, 56).unwrap());
        assert_near(times.set, Utc.with_ymd_and_hms(2013, 3, 4, 7, 46, 11).unwrap());
        assert!(!times.always_up && !times.always_down);
    }

    #[test]
    fn civil_day_follows_the_callers_time_zone() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let day = ist.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
        let times = moon_times(&day, 28.6139, 77.2090).unwrap();
        assert_near(times.rise, Utc.with_ymd_and_hms(2024, 3, 10, 1, 6, 45).unwrap());
        assert_near(times.set, Utc.with_ymd_and_hms(2024, 3, 10, 13, 4, 11).unwrap());
    }

    #[test]
    fn polar_observer_sees_moon_always_up_or_down() {
        let up = Utc.with_ymd_and_hms(2024, 6, 5, 0, 0, 0).unwrap();
        let times = moon_times(&up, 80.0, 15.0).unwrap();
        assert!(times.always_up && !times.always_down);
        assert!(times.rise.is_none() && times.set.is_none());

        let down = Utc.with_ymd_and_hms(2024, 6, 20, 0, 0, 0).unwrap();
        let times = moon_times(&down, 80.0, 15.0).unwrap();
        assert!(times.always_down && !times.always_up);
    }

    #[test]
    fn local_midnight_of_fixed_offset() {
        let ist = FixedOffset::east_opt(19_800).unwrap();
        let t = ist.with_ymd_and_hms(2024, 3, 10, 0, 30, 0).unwrap();
        assert_eq!(
            local_midnight(&t),
            Utc.with_ymd_and_hms(2024, 3, 9, 18, 30, 0).unwrap()
        );
    }

    #[test]
    fn invalid_latitude_is_rejected() {
        let day = Utc.with_ymd_and_hms(2024, 6, 5, 0, 0, 0).unwrap();
        assert_eq!(
            moon_times(&day, -95.0, 0.0),
            Err(EphemerisError::InvalidLatitude(-95.0))
        );
    }
}
