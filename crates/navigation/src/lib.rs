//! Spherical navigation math on a sphere of Earth's mean radius.
//!
//! All on-screen measurement (route legs, crosshair distance, bearing arrows) goes
//! through these functions. They are independent of any projected grid.

pub mod area;
pub mod format;
pub mod route;
pub mod spherical;

pub use area::polygon_area;
pub use format::{cardinal_direction, format_area, format_bearing, format_distance};
pub use route::{RouteLeg, route_legs};
pub use spherical::{destination_point, distance, initial_bearing, path_length};
