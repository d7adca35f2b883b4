//! Geodetic and astronomical computation core for map navigation.
//!
//! The computational crates are independent of each other: grid projections
//! ([`geodesy`]), spherical measurement ([`navigation`]) and sun/moon ephemeris
//! ([`ephemeris`]). Front-ends compose them; [`config`] and [`export`] cover the
//! file formats the command-line tools read and write.

pub use terranav_config as config;
pub use terranav_core::{CoordinateError, GeographicPoint, angles, constants, units};
pub use terranav_ephemeris as ephemeris;
pub use terranav_export as export;
pub use terranav_geodesy as geodesy;
pub use terranav_navigation as navigation;

/// Library version, shown by the command-line tools' `--version`.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
