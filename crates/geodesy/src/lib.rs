//! Geodetic transform engine: WGS84 latitude/longitude to and from projected grids.
//!
//! Two systems are supported and deliberately kept as separate functions:
//! UTM on the WGS84 ellipsoid, and the Indian Grid (Lambert Conformal Conic, one
//! standard parallel) on Everest 1930 with a fixed translation from WGS84. Every
//! transform is pure; failures come back as [`ProjectionError`].

pub mod datum;
pub mod ellipsoid;
pub mod error;
pub mod grid;
pub mod indian_grid;
pub mod lcc;
pub mod tmerc;
pub mod utm;

pub use error::ProjectionError;
pub use grid::{GeoBounds, GridAxis, GridLabel, GridOverlay, GridSpacing, GridSystem, grid_overlay};
pub use indian_grid::{IndianGridCoordinate, IndianGridZone, from_indian_grid, to_indian_grid};
pub use terranav_core::GeographicPoint;
pub use utm::{Hemisphere, UtmCoordinate, from_utm, to_utm, zone_for_longitude};

/// A projected coordinate in one of the supported grid systems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectedCoordinate {
    Utm(UtmCoordinate),
    IndianGrid(IndianGridCoordinate),
}

impl ProjectedCoordinate {
    pub fn easting(&self) -> f64 {
        match self {
            Self::Utm(c) => c.easting,
            Self::IndianGrid(c) => c.easting,
        }
    }

    pub fn northing(&self) -> f64 {
        match self {
            Self::Utm(c) => c.northing,
            Self::IndianGrid(c) => c.northing,
        }
    }

    /// Short zone label, e.g. `43N` or `IIA`.
    pub fn zone_label(&self) -> String {
        match self {
            Self::Utm(c) => format!("{}{}", c.zone, c.hemisphere),
            Self::IndianGrid(c) => c.zone.to_string(),
        }
    }

    /// Run the inverse transform matching this coordinate's system.
    pub fn to_geographic(&self) -> Result<GeographicPoint, ProjectionError> {
        match self {
            Self::Utm(c) => from_utm(c),
            Self::IndianGrid(c) => from_indian_grid(c),
        }
    }
}

impl From<UtmCoordinate> for ProjectedCoordinate {
    fn from(value: UtmCoordinate) -> Self {
        Self::Utm(value)
    }
}

impl From<IndianGridCoordinate> for ProjectedCoordinate {
    fn from(value: IndianGridCoordinate) -> Self {
        Self::IndianGrid(value)
    }
}
