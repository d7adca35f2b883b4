//! Grid overlay geometry for a map view.
//!
//! Given the visible bounding box and a line spacing, [`grid_overlay`] returns the
//! easting and northing lines of a UTM or Indian Grid frame as geographic segments,
//! plus the labels a map draws where those lines cross the middle of the view. One
//! zone and one hemisphere are used for the whole view so the lines stay straight in
//! grid space. Drawing is left to the caller.

use std::fmt;
use std::str::FromStr;

use terranav_core::GeographicPoint;

use crate::error::ProjectionError;
use crate::indian_grid::{IndianGridCoordinate, IndianGridZone, from_indian_grid, to_indian_grid};
use crate::utm::{
    FALSE_NORTHING_SOUTH, Hemisphere, UtmCoordinate, from_utm, to_utm, zone_for_longitude,
};

/// Share of the view's extent added on every side so lines run past the edges.
const EDGE_MARGIN: f64 = 0.1;
/// Most lines generated along one axis.
pub const MAX_LINES_PER_AXIS: usize = 500;

/// Requested distance between grid lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GridSpacing {
    /// Chosen from the zoom level.
    #[default]
    Auto,
    Km1,
    Km5,
    Km10,
}

impl GridSpacing {
    pub const ALL: [Self; 4] = [Self::Auto, Self::Km1, Self::Km5, Self::Km10];

    /// Fixed spacing in metres; `None` for [`GridSpacing::Auto`].
    pub fn metres(self) -> Option<f64> {
        match self {
            Self::Auto => None,
            Self::Km1 => Some(1_000.0),
            Self::Km5 => Some(5_000.0),
            Self::Km10 => Some(10_000.0),
        }
    }

    /// Line interval in metres at a web-map zoom level, or `None` when the grid would
    /// be too dense to draw at that zoom.
    pub fn step_at_zoom(self, zoom: f64) -> Option<f64> {
        match self {
            Self::Auto if zoom < 8.0 => None,
            Self::Auto if zoom > 14.0 => Some(1_000.0),
            Self::Auto if zoom > 11.0 => Some(10_000.0),
            Self::Auto => Some(100_000.0),
            Self::Km1 if zoom < 12.0 => None,
            Self::Km5 if zoom < 10.0 => None,
            Self::Km10 if zoom < 8.0 => None,
            fixed => fixed.metres(),
        }
    }
}

impl fmt::Display for GridSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Km1 => "1000",
            Self::Km5 => "5000",
            Self::Km10 => "10000",
        })
    }
}

impl FromStr for GridSpacing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "1000" | "1km" => Ok(Self::Km1),
            "5000" | "5km" => Ok(Self::Km5),
            "10000" | "10km" => Ok(Self::Km10),
            other => Err(format!("unknown grid spacing `{other}`")),
        }
    }
}

/// Which projected grid to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSystem {
    /// UTM in `zone`, or the zone under the view's centre.
    Utm { zone: Option<u8> },
    IndianGrid(IndianGridZone),
}

/// A latitude/longitude rectangle. Views crossing the antimeridian are not supported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub south_west: GeographicPoint,
    pub north_east: GeographicPoint,
}

impl GeoBounds {
    /// Bounds spanned by two opposite corners, in either order.
    pub fn new(a: GeographicPoint, b: GeographicPoint) -> Result<Self, ProjectionError> {
        a.validate()?;
        b.validate()?;
        Ok(Self {
            south_west: GeographicPoint::new(
                a.latitude.min(b.latitude),
                a.longitude.min(b.longitude),
            ),
            north_east: GeographicPoint::new(
                a.latitude.max(b.latitude),
                a.longitude.max(b.longitude),
            ),
        })
    }

    pub fn center(&self) -> GeographicPoint {
        GeographicPoint::new(
            (self.south_west.latitude + self.north_east.latitude) / 2.0,
            (self.south_west.longitude + self.north_east.longitude) / 2.0,
        )
    }

    pub fn contains(&self, point: &GeographicPoint) -> bool {
        (self.south_west.latitude..=self.north_east.latitude).contains(&point.latitude)
            && (self.south_west.longitude..=self.north_east.longitude).contains(&point.longitude)
    }

    /// Grow every side by `fraction` of the extent, clamped to valid coordinates.
    fn expanded(&self, fraction: f64) -> Self {
        let d_lat = (self.north_east.latitude - self.south_west.latitude) * fraction;
        let d_lon = (self.north_east.longitude - self.south_west.longitude) * fraction;
        Self {
            south_west: GeographicPoint::new(
                (self.south_west.latitude - d_lat).max(-90.0),
                (self.south_west.longitude - d_lon).max(-180.0),
            ),
            north_east: GeographicPoint::new(
                (self.north_east.latitude + d_lat).min(90.0),
                (self.north_east.longitude + d_lon).min(180.0),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridAxis {
    /// A line of constant easting, labelled with its easting.
    Easting,
    /// A line of constant northing, labelled with its northing.
    Northing,
}

/// Label for one grid line, placed where it crosses the middle of the view.
///
/// Map grids print the kilometre digits large and the 100 km figure small and raised,
/// so the two parts are kept apart. UTM labels carry both; Indian Grid labels only the
/// kilometres.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLabel {
    pub position: GeographicPoint,
    pub axis: GridAxis,
    /// Grid value of the line in metres.
    pub value_m: f64,
    /// Whole hundreds of kilometres, drawn as a superscript.
    pub hundred_km: Option<i64>,
    /// Kilometres within the 100 km square, always two digits.
    pub km: String,
}

impl GridLabel {
    fn new(position: GeographicPoint, axis: GridAxis, value_m: f64, with_hundreds: bool) -> Self {
        let km = (value_m / 1_000.0).floor() as i64;
        Self {
            position,
            axis,
            value_m,
            hundred_km: with_hundreds.then(|| (value_m / 100_000.0).floor() as i64),
            km: format!("{:02}", km.rem_euclid(100)),
        }
    }
}

impl fmt::Display for GridLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(hundreds) = self.hundred_km {
            write!(f, "{hundreds}")?;
        }
        f.write_str(&self.km)
    }
}

/// Lines and labels for one view.
#[derive(Debug, Clone, PartialEq)]
pub struct GridOverlay {
    pub step_m: f64,
    /// Northing lines first (south to north), then easting lines (west to east).
    pub lines: Vec<[GeographicPoint; 2]>,
    pub labels: Vec<GridLabel>,
}

/// The projected frame every line of one overlay is expressed in.
#[derive(Debug, Clone, Copy)]
enum Frame {
    Utm { zone: u8, hemisphere: Hemisphere },
    Indian(IndianGridZone),
}

impl Frame {
    fn for_view(system: GridSystem, center: &GeographicPoint) -> Self {
        match system {
            GridSystem::Utm { zone } => Frame::Utm {
                zone: zone.unwrap_or_else(|| zone_for_longitude(center.longitude)),
                hemisphere: Hemisphere::from_latitude(center.latitude),
            },
            GridSystem::IndianGrid(zone) => Frame::Indian(zone),
        }
    }

    fn project(&self, point: &GeographicPoint) -> Result<(f64, f64), ProjectionError> {
        match *self {
            Frame::Utm { zone, hemisphere } => {
                let c = to_utm(point, Some(zone))?;
                // Keep the view's hemisphere even for corners across the equator.
                let northing = match (c.hemisphere, hemisphere) {
                    (Hemisphere::South, Hemisphere::North) => c.northing - FALSE_NORTHING_SOUTH,
                    (Hemisphere::North, Hemisphere::South) => c.northing + FALSE_NORTHING_SOUTH,
                    _ => c.northing,
                };
                Ok((c.easting, northing))
            }
            Frame::Indian(zone) => {
                let c = to_indian_grid(point, zone)?;
                Ok((c.easting, c.northing))
            }
        }
    }

    fn unproject(&self, easting: f64, northing: f64) -> Result<GeographicPoint, ProjectionError> {
        match *self {
            Frame::Utm { zone, hemisphere } => from_utm(&UtmCoordinate {
                zone,
                hemisphere,
                easting,
                northing,
            }),
            Frame::Indian(zone) => from_indian_grid(&IndianGridCoordinate {
                zone,
                easting,
                northing,
            }),
        }
    }

    fn labels_with_hundreds(&self) -> bool {
        matches!(self, Frame::Utm { .. })
    }
}

/// Multiples of `step` from the one at or below `from` through `to`.
fn multiples(from: f64, to: f64, step: f64) -> Result<Vec<f64>, ProjectionError> {
    let start = (from / step).floor() * step;
    let count = ((to - start) / step).floor() + 1.0;
    if count > MAX_LINES_PER_AXIS as f64 {
        return Err(ProjectionError::GridTooDense {
            lines: count as usize,
        });
    }
    let count = count.max(0.0) as usize;
    Ok((0..count).map(|i| start + i as f64 * step).collect())
}

/// Grid lines and labels for `view` at `zoom`, or `None` when `spacing` is too fine to
/// draw at that zoom.
///
/// Lines whose end points cannot be unprojected are left out. A corner or centre of the
/// view that cannot be projected fails the whole overlay.
pub fn grid_overlay(
    system: GridSystem,
    view: &GeoBounds,
    zoom: f64,
    spacing: GridSpacing,
) -> Result<Option<GridOverlay>, ProjectionError> {
    let Some(step) = spacing.step_at_zoom(zoom) else {
        log::debug!("no {spacing} grid at zoom {zoom}");
        return Ok(None);
    };

    let center = view.center();
    let frame = Frame::for_view(system, &center);
    let (center_e, center_n) = frame.project(&center)?;
    let outer = view.expanded(EDGE_MARGIN);
    let (west, south) = frame.project(&outer.south_west)?;
    let (east, north) = frame.project(&outer.north_east)?;

    let northings = multiples(south, north, step)?;
    let eastings = multiples(west, east, step)?;
    let hundreds = frame.labels_with_hundreds();
    let mut overlay = GridOverlay {
        step_m: step,
        lines: Vec::with_capacity(northings.len() + eastings.len()),
        labels: Vec::new(),
    };

    let mut add = |axis: GridAxis, value: f64, ends: [(f64, f64); 2], anchor: (f64, f64)| {
        let (Ok(a), Ok(b)) = (
            frame.unproject(ends[0].0, ends[0].1),
            frame.unproject(ends[1].0, ends[1].1),
        ) else {
            log::debug!("{axis:?} line at {value} m has no geographic image");
            return;
        };
        overlay.lines.push([a, b]);
        let position = frame.unproject(anchor.0, anchor.1).ok();
        if let Some(position) = position.filter(|p| view.contains(p)) {
            overlay
                .labels
                .push(GridLabel::new(position, axis, value, hundreds));
        }
    };

    for &n in &northings {
        add(GridAxis::Northing, n, [(west, n), (east, n)], (center_e, n));
    }
    for &e in &eastings {
        add(GridAxis::Easting, e, [(e, south), (e, north)], (e, center_n));
    }

    log::debug!(
        "{} grid lines every {step} m over {}..{}",
        overlay.lines.len(),
        view.south_west,
        view.north_east
    );
    Ok(Some(overlay))
}
