use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::{ArgAction, Parser};
use serde::Deserialize;
use terranav::config::load_waypoints;
use terranav::GeographicPoint;
use terranav::export::waypoints::{self as export_waypoints, Record};
use terranav::geodesy::{IndianGridZone, ProjectedCoordinate, to_indian_grid, to_utm};
use terranav::navigation::{
    format_area, format_bearing, format_distance, polygon_area, route_legs,
};
use terranav_cli::init_logging;

/// Measure an ordered list of points and export per-leg distances with grid readouts.
#[derive(Parser, Debug)]
#[command(
    author,
    version = terranav::version(),
    about = "Route legs and grid coordinates for marked points"
)]
struct Cli {
    /// `name,latitude,longitude` CSV, or a waypoint catalogue (YAML, TOML, or a directory)
    #[arg(long)]
    input: PathBuf,

    /// CSV output path (`-` for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,

    /// Add Indian Grid coordinates in this zone
    #[arg(long)]
    indian_zone: Option<IndianGridZone>,

    /// Force a UTM zone for every point
    #[arg(long)]
    utm_zone: Option<u8>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Deserialize)]
struct PointRow {
    name: String,
    latitude: f64,
    longitude: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(cli.verbose)?;

    let rows = read_points(&cli.input)?;
    if rows.is_empty() {
        return Err(anyhow!("no points found in {}", cli.input.display()));
    }
    let points: Vec<GeographicPoint> = rows
        .iter()
        .map(|row| {
            GeographicPoint::checked(row.latitude, row.longitude)
                .map_err(|err| anyhow!("point `{}`: {err}", row.name))
        })
        .collect::<anyhow::Result<_>>()?;

    let legs = route_legs(&points);
    let mut writer = export_waypoints::writer_for_path(&cli.output)?;
    export_waypoints::write_header(writer.as_mut())?;

    for (row, leg) in rows.iter().zip(&legs) {
        let utm = to_utm(&leg.point, cli.utm_zone)
            .inspect_err(|err| log::warn!("UTM unavailable for `{}`: {err}", row.name))
            .ok()
            .map(ProjectedCoordinate::from);
        let indian_grid = cli.indian_zone.and_then(|zone| {
            to_indian_grid(&leg.point, zone)
                .inspect_err(|err| {
                    log::warn!("Indian Grid unavailable for `{}`: {err}", row.name)
                })
                .ok()
                .map(ProjectedCoordinate::from)
        });
        let record = Record {
            name: &row.name,
            point: leg.point,
            utm,
            indian_grid,
            leg_distance_m: leg.distance_from_previous_m,
            leg_bearing_deg: leg.bearing_from_previous_deg,
            total_distance_m: leg.total_distance_m,
        };
        record.write_to(writer.as_mut())?;
    }
    writer.flush()?;

    let total = legs.last().map(|leg| leg.total_distance_m).unwrap_or_default();
    eprintln!("{} points, total {}", points.len(), format_distance(total));
    if let Some(bearing) = legs.last().and_then(|leg| leg.bearing_from_previous_deg) {
        eprintln!("final leg heading {}", format_bearing(bearing));
    }
    if points.len() >= 3 {
        eprintln!("enclosed area {}", format_area(polygon_area(&points)));
    }

    Ok(())
}

fn read_points(path: &Path) -> anyhow::Result<Vec<PointRow>> {
    if path.extension().map(|ext| ext == "csv").unwrap_or(false) {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<PointRow>, _>>()
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(rows)
    } else {
        Ok(load_waypoints(path)?
            .into_iter()
            .map(|w| PointRow {
                name: w.name,
                latitude: w.latitude,
                longitude: w.longitude,
            })
            .collect())
    }
}
