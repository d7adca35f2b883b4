//! Julian date conversions anchored on the Unix epoch.

use chrono::{DateTime, Utc};
use terranav_core::constants::{J1970, J2000, MILLIS_PER_DAY};

use crate::EphemerisError;

/// Julian date of an instant.
pub fn to_julian(instant: &DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / MILLIS_PER_DAY - 0.5 + J1970
}

/// Instant for a Julian date, rounded to the millisecond.
pub fn from_julian(julian: f64) -> Result<DateTime<Utc>, EphemerisError> {
    let millis = ((julian + 0.5 - J1970) * MILLIS_PER_DAY).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return Err(EphemerisError::InstantOutOfRange(julian));
    }
    DateTime::from_timestamp_millis(millis as i64).ok_or(EphemerisError::InstantOutOfRange(julian))
}

/// Days since J2000.0 (fractional).
pub fn days_since_j2000(instant: &DateTime<Utc>) -> f64 {
    to_julian(instant) - J2000
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;

    #[test]
    fn unix_epoch_and_j2000() {
        let epoch = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert_abs_diff_eq!(to_julian(&epoch), 2_440_587.5);
        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_abs_diff_eq!(days_since_j2000(&j2000), 0.0);
    }

    #[test]
    fn julian_round_trip_is_millisecond_exact() {
        let t = Utc.with_ymd_and_hms(2013, 3, 5, 10, 10, 57).unwrap();
        assert_eq!(from_julian(to_julian(&t)).unwrap(), t);
    }

    #[test]
    fn unrepresentable_dates_are_rejected() {
        assert!(matches!(
            from_julian(f64::NAN),
            Err(EphemerisError::InstantOutOfRange(_))
        ));
        assert!(from_julian(1e15).is_err());
    }
}
