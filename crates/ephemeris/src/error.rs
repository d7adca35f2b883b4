use thiserror::Error;

/// Invalid observer or time input rejected before any computation.
///
/// Astronomical non-events (polar day, twilight never reached, moon always up) are not
/// errors; they surface as `None` fields or flags on the result types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EphemerisError {
    #[error("latitude {0} is not a finite value in [-90, 90]")]
    InvalidLatitude(f64),
    #[error("longitude {0} is not finite")]
    InvalidLongitude(f64),
    #[error("observer height {0} m must be finite and non-negative")]
    InvalidObserverHeight(f64),
    #[error("Julian date {0} cannot be represented as a calendar instant")]
    InstantOutOfRange(f64),
    #[error("{year}-{month:02} is not a valid calendar month")]
    InvalidCalendarMonth { year: i32, month: u32 },
}

pub(crate) fn check_observer(latitude: f64, longitude: f64) -> Result<(), EphemerisError> {
    if !latitude.is_finite() || latitude.abs() > 90.0 {
        log::warn!("rejecting observer latitude {latitude}");
        return Err(EphemerisError::InvalidLatitude(latitude));
    }
    if !longitude.is_finite() {
        log::warn!("rejecting observer longitude {longitude}");
        return Err(EphemerisError::InvalidLongitude(longitude));
    }
    Ok(())
}
