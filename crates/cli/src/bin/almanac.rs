use std::path::PathBuf;

use anyhow::{anyhow, bail};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use clap::{ArgAction, Parser};
use terranav::config::load_settings;
use terranav::GeographicPoint;
use terranav::ephemeris::{
    SunEvent, moon_illumination, moon_position, moon_times, sun_position, sun_times,
};
use terranav::export::almanac::{AlmanacReport, Observer, write_report};
use terranav_cli::{init_logging, or_na};

/// Print sun and moon events for one civil day at an observer location.
#[derive(Parser, Debug)]
#[command(
    author,
    version = terranav::version(),
    about = "Sun/moon almanac for an observer"
)]
struct Cli {
    /// Civil date (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,

    /// Observer latitude in degrees
    #[arg(
        long,
        allow_negative_numbers = true,
        requires = "lon",
        conflicts_with = "settings"
    )]
    lat: Option<f64>,

    /// Observer longitude in degrees
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    lon: Option<f64>,

    /// Settings file providing the observer (TOML or YAML)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Observer height above the surrounding terrain (m); overrides the settings file
    #[arg(long)]
    height: Option<f64>,

    /// UTC offset of the civil day in hours (e.g. 5.5)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    utc_offset: f64,

    /// Also write the report as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(cli.verbose)?;

    let observer = resolve_observer(&cli)?;
    let point = GeographicPoint::checked(observer.latitude, observer.longitude)
        .map_err(|err| anyhow!("invalid observer location: {err}"))?;
    let offset = FixedOffset::east_opt((cli.utc_offset * 3600.0).round() as i32)
        .ok_or_else(|| anyhow!("UTC offset {} h is out of range", cli.utc_offset))?;

    // noon UTC on the date selects that date's solar transit at every longitude
    let noon = cli.date.and_time(NaiveTime::MIN + TimeDelta::hours(12));
    let noon_utc = noon.and_utc();
    let local_noon = offset
        .from_local_datetime(&noon)
        .single()
        .ok_or_else(|| anyhow!("{noon} does not exist at UTC{offset}"))?;

    let sun = sun_times(&noon_utc, point.latitude, point.longitude, observer.height_m)?;
    let moon = moon_times(&local_noon, point.latitude, point.longitude)?;
    let illumination = moon_illumination(&sun.solar_noon);
    let sun_at_noon = sun_position(&sun.solar_noon, point.latitude, point.longitude)?;
    let moon_at_noon = moon_position(&sun.solar_noon, point.latitude, point.longitude)?;

    let clock = |at: DateTime<Utc>| at.with_timezone(&offset).format("%H:%M:%S").to_string();

    println!(
        "Almanac for {} ({point}) on {}, UTC{}",
        observer.name, cli.date, offset
    );
    println!("Sun");
    for (event, at) in sun.ordered() {
        println!("  {:<16} {}", event.label(), clock(at));
    }
    for event in SunEvent::ALL {
        if sun.get(event).is_none() {
            println!("  {:<16} n/a", event.label());
        }
    }
    println!(
        "  {:<16} {}",
        "daylight",
        or_na(
            sun.daylight()
                .map(|d| format!("{}h {:02}m", d.num_hours(), d.num_minutes() % 60))
        )
    );
    println!(
        "  {:<16} {:.1}°",
        "noon altitude",
        sun_at_noon.altitude.to_degrees()
    );

    println!("Moon");
    println!("  {:<16} {}", "rise", or_na(moon.rise.map(clock)));
    println!("  {:<16} {}", "set", or_na(moon.set.map(clock)));
    if moon.always_up {
        println!("  above the horizon all day");
    } else if moon.always_down {
        println!("  below the horizon all day");
    }
    println!(
        "  {:<16} {:.1}% ({}, phase {:.3})",
        "illumination",
        illumination.fraction * 100.0,
        illumination.phase_name(),
        illumination.phase
    );
    println!(
        "  {:<16} alt {:.1}°, {:.0} km",
        "at solar noon",
        moon_at_noon.altitude.to_degrees(),
        moon_at_noon.distance_km
    );

    if let Some(path) = &cli.json {
        let report = AlmanacReport::new(cli.date, observer, &sun, &moon, &illumination);
        write_report(path, &report)?;
        println!("JSON report written to {}", path.display());
    }

    Ok(())
}

fn resolve_observer(cli: &Cli) -> anyhow::Result<Observer> {
    let mut observer = match (cli.lat, cli.lon, &cli.settings) {
        (Some(latitude), Some(longitude), _) => Observer {
            name: "observer".to_string(),
            latitude,
            longitude,
            height_m: 0.0,
        },
        (_, _, Some(path)) => {
            let settings = load_settings(path)?;
            Observer {
                name: settings.observer.name,
                latitude: settings.observer.latitude,
                longitude: settings.observer.longitude,
                height_m: settings.observer.height_m,
            }
        }
        _ => bail!("provide --lat/--lon or --settings"),
    };
    if let Some(height) = cli.height {
        observer.height_m = height;
    }
    Ok(observer)
}
