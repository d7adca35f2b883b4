use terranav_core::CoordinateError;
use thiserror::Error;

/// Reasons a forward or inverse projection could not produce a usable coordinate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("invalid geographic input: {0}")]
    InvalidPoint(#[from] CoordinateError),
    #[error("grid coordinate is not finite (E={easting}, N={northing})")]
    NonFiniteGrid { easting: f64, northing: f64 },
    #[error("UTM zone {0} is outside 1..=60")]
    InvalidUtmZone(u8),
    #[error("unknown Indian Grid zone `{0}`")]
    UnknownIndianGridZone(String),
    #[error("{system} projection has no finite result at this location")]
    Singular { system: &'static str },
    #[error("grid spacing is too fine for this view ({lines} lines on one axis)")]
    GridTooDense { lines: usize },
}

/// Reject non-finite projected inputs before any inverse computation.
pub(crate) fn check_grid(easting: f64, northing: f64) -> Result<(), ProjectionError> {
    if easting.is_finite() && northing.is_finite() {
        Ok(())
    } else {
        Err(ProjectionError::NonFiniteGrid { easting, northing })
    }
}

/// Turn a non-finite projection output into a typed failure.
pub(crate) fn ensure_finite(
    system: &'static str,
    values: &[f64],
) -> Result<(), ProjectionError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        log::warn!("{system} projection produced a non-finite value: {values:?}");
        Err(ProjectionError::Singular { system })
    }
}
