//! Export helpers for CSV and JSON artifacts.

pub mod waypoints {
    use std::borrow::Cow;
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    use terranav_core::GeographicPoint;
    use terranav_geodesy::ProjectedCoordinate;

    const HEADER: &str = "name,latitude,longitude,utm_zone,utm_easting,utm_northing,indian_zone,indian_easting,indian_northing,leg_distance_m,leg_bearing_deg,total_distance_m";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Write the waypoint CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row for one waypoint. Unavailable values are written as empty fields.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub name: &'a str,
        pub point: GeographicPoint,
        pub utm: Option<ProjectedCoordinate>,
        pub indian_grid: Option<ProjectedCoordinate>,
        pub leg_distance_m: Option<f64>,
        pub leg_bearing_deg: Option<f64>,
        pub total_distance_m: f64,
    }

    impl<'a> Record<'a> {
        /// Serialize the record to CSV, matching the header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            let (utm_zone, utm_e, utm_n) = grid_fields(self.utm.as_ref());
            let (ig_zone, ig_e, ig_n) = grid_fields(self.indian_grid.as_ref());
            writeln!(
                writer,
                "{},{:.7},{:.7},{},{},{},{},{},{},{},{},{:.3}",
                escape(self.name),
                self.point.latitude,
                self.point.longitude,
                utm_zone,
                utm_e,
                utm_n,
                ig_zone,
                ig_e,
                ig_n,
                optional(self.leg_distance_m, 3),
                optional(self.leg_bearing_deg, 2),
                self.total_distance_m,
            )
        }
    }

    fn grid_fields(coord: Option<&ProjectedCoordinate>) -> (String, String, String) {
        match coord {
            Some(c) => (
                c.zone_label(),
                format!("{:.3}", c.easting()),
                format!("{:.3}", c.northing()),
            ),
            None => (String::new(), String::new(), String::new()),
        }
    }

    fn optional(value: Option<f64>, precision: usize) -> String {
        value
            .map(|v| format!("{v:.precision$}"))
            .unwrap_or_default()
    }

    fn escape(field: &str) -> Cow<'_, str> {
        if field.contains([',', '"', '\n']) {
            Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
        } else {
            Cow::Borrowed(field)
        }
    }

}

pub mod almanac {
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use terranav_ephemeris::{MoonIllumination, MoonTimes, SunTimes};

    /// Observer block of an almanac report.
    #[derive(Debug, Clone, Serialize)]
    pub struct Observer {
        pub name: String,
        pub latitude: f64,
        pub longitude: f64,
        pub height_m: f64,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct SunEventEntry {
        pub event: String,
        pub utc: String,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct MoonSection {
        pub rise: Option<String>,
        pub set: Option<String>,
        pub always_up: bool,
        pub always_down: bool,
        pub illuminated_fraction: f64,
        pub phase: f64,
        pub bright_limb_angle_rad: f64,
        pub phase_name: String,
    }

    /// One day of sun and moon events for an observer.
    #[derive(Debug, Clone, Serialize)]
    pub struct AlmanacReport {
        pub date: String,
        pub observer: Observer,
        pub daylight_minutes: Option<i64>,
        pub sun: Vec<SunEventEntry>,
        pub moon: MoonSection,
    }

    fn stamp(at: &DateTime<Utc>) -> String {
        at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    impl AlmanacReport {
        pub fn new(
            date: NaiveDate,
            observer: Observer,
            sun: &SunTimes,
            moon: &MoonTimes,
            illumination: &MoonIllumination,
        ) -> Self {
            Self {
                date: date.to_string(),
                observer,
                daylight_minutes: sun.daylight().map(|d| d.num_minutes()),
                sun: sun
                    .ordered()
                    .into_iter()
                    .map(|(event, at)| SunEventEntry {
                        event: event.label().to_string(),
                        utc: stamp(&at),
                    })
                    .collect(),
                moon: MoonSection {
                    rise: moon.rise.as_ref().map(stamp),
                    set: moon.set.as_ref().map(stamp),
                    always_up: moon.always_up,
                    always_down: moon.always_down,
                    illuminated_fraction: illumination.fraction,
                    phase: illumination.phase,
                    bright_limb_angle_rad: illumination.angle,
                    phase_name: illumination.phase_name().to_string(),
                },
            }
        }
    }

    /// Write the report as pretty-printed JSON, creating parent directories as needed.
    pub fn write_report(output: &Path, report: &AlmanacReport) -> io::Result<()> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        to_writer_pretty(File::create(output)?, report)?;
        Ok(())
    }

}
