//! Sun and moon ephemeris for an observer on the ground.
//!
//! Low-order solar and lunar series referenced to J2000, accurate to a fraction of a
//! degree. Angles are radians; azimuth is measured from south, positive toward the west.
//! All functions are pure and may be called concurrently.

mod astro;
mod error;
pub mod moon;
pub mod moon_times;
pub mod sun;
pub mod time;

pub use error::EphemerisError;
pub use moon::{
    MoonIllumination, MoonPhase, MoonPosition, moon_illumination, moon_position, phase_calendar,
};
pub use moon_times::{MoonTimes, moon_times};
pub use sun::{SunEvent, SunPosition, SunTimes, dip, sun_position, sun_times};
