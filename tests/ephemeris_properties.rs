use chrono::{TimeDelta, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use terranav::ephemeris::{moon_illumination, moon_times, sun_times};

#[test]
fn spring_daylight_grows_every_day() {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let mut previous = None;
    for day in 0..40 {
        let instant = start + TimeDelta::days(day);
        let times = sun_times(&instant, 40.7128, -74.0060, 0.0).unwrap();
        let daylight = times.daylight().expect("mid-latitude sunrise and sunset");
        if let Some(prev) = previous {
            assert!(daylight > prev, "day {day}: {daylight} <= {prev}");
        }
        previous = Some(daylight);
    }
}

#[test]
fn arctic_summer_has_always_up_and_always_down_days() {
    let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let mut up_days = 0;
    let mut down_days = 0;
    for day in 0..40 {
        let times = moon_times(&(start + TimeDelta::days(day)), 80.0, 15.0).unwrap();
        assert!(!(times.always_up && times.always_down));
        if times.always_up || times.always_down {
            assert!(times.rise.is_none() && times.set.is_none());
        }
        up_days += usize::from(times.always_up);
        down_days += usize::from(times.always_down);
    }
    assert!(up_days >= 10, "only {up_days} always-up days");
    assert!(down_days >= 10, "only {down_days} always-down days");
}

#[test]
fn illuminated_fraction_stays_in_bounds() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..5_000 {
        let secs = rng.gen_range(0..4_102_444_800_i64);
        let instant = Utc.timestamp_opt(secs, 0).unwrap();
        let illum = moon_illumination(&instant);
        assert!((0.0..=1.0).contains(&illum.fraction));
        assert!((0.0..1.0).contains(&illum.phase));
    }
}

#[test]
fn known_new_and_full_moons() {
    let new_moons = [
        Utc.with_ymd_and_hms(2000, 1, 6, 18, 14, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 11, 11, 57, 0).unwrap(),
    ];
    let full_moons = [
        Utc.with_ymd_and_hms(2000, 1, 21, 4, 40, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 25, 17, 54, 0).unwrap(),
    ];
    for t in new_moons {
        assert!(moon_illumination(&t).fraction < 0.02, "new moon at {t}");
    }
    for t in full_moons {
        assert!(moon_illumination(&t).fraction > 0.98, "full moon at {t}");
    }
}

#[test]
fn polar_night_and_day_never_fail() {
    let winter = Utc.with_ymd_and_hms(2024, 12, 21, 12, 0, 0).unwrap();
    let summer = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
    for lat in [-90.0, -85.0, 85.0, 90.0] {
        for instant in [winter, summer] {
            let times = sun_times(&instant, lat, 0.0, 0.0).unwrap();
            assert!(times.sunrise.is_none() && times.sunset.is_none());
            moon_times(&instant, lat, 0.0).unwrap();
        }
    }
}
