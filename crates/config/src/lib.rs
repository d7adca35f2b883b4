//! Configuration models and loaders for terranav.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use terranav_core::{CoordinateError, GeographicPoint};
use terranav_geodesy::IndianGridZone;
use thiserror::Error;

/// User settings: where the observer stands and which grid readout to show.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub observer: ObserverConfig,
    #[serde(default)]
    pub grid: GridConfig,
}

/// Observer location used for almanac queries.
#[derive(Debug, Deserialize, Clone)]
pub struct ObserverConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub height_m: f64,
}

/// Projected grid shown next to geographic coordinates.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct GridConfig {
    #[serde(default)]
    pub system: CoordSystem,
    #[serde(default)]
    pub indian_grid_zone: Option<String>,
    #[serde(default)]
    pub utm_zone: Option<u8>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CoordSystem {
    #[default]
    Utm,
    IndianGrid,
}

/// A named point from a waypoint catalogue.
#[derive(Debug, Deserialize, Clone)]
pub struct WaypointConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("`{name}` has an invalid location: {source}")]
    InvalidPoint {
        name: String,
        #[source]
        source: CoordinateError,
    },
    #[error("unknown Indian Grid zone `{0}`")]
    InvalidZone(String),
    #[error("UTM zone {0} is outside 1..=60")]
    InvalidUtmZone(u8),
}

impl ObserverConfig {
    pub fn observer_point(&self) -> Result<GeographicPoint, ConfigError> {
        GeographicPoint::checked(self.latitude, self.longitude).map_err(|source| {
            ConfigError::InvalidPoint {
                name: self.name.clone(),
                source,
            }
        })
    }
}

impl Settings {
    pub fn observer_point(&self) -> Result<GeographicPoint, ConfigError> {
        self.observer.observer_point()
    }

    /// Configured Indian Grid zone, if any. Zone names are case-insensitive.
    pub fn indian_grid_zone(&self) -> Result<Option<IndianGridZone>, ConfigError> {
        self.grid
            .indian_grid_zone
            .as_deref()
            .map(|name| {
                name.parse::<IndianGridZone>()
                    .map_err(|_| ConfigError::InvalidZone(name.to_string()))
            })
            .transpose()
    }

    pub fn utm_zone_override(&self) -> Result<Option<u8>, ConfigError> {
        match self.grid.utm_zone {
            Some(zone) if !(1..=60).contains(&zone) => Err(ConfigError::InvalidUtmZone(zone)),
            other => Ok(other),
        }
    }
}

impl WaypointConfig {
    pub fn point(&self) -> Result<GeographicPoint, ConfigError> {
        GeographicPoint::checked(self.latitude, self.longitude).map_err(|source| {
            ConfigError::InvalidPoint {
                name: self.name.clone(),
                source,
            }
        })
    }
}

/// Load settings from a TOML file (by extension) or YAML otherwise.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
    let path = path.as_ref();
    let settings: Settings = if has_toml_extension(path) {
        toml::from_str(&std::fs::read_to_string(path)?)?
    } else {
        serde_yaml::from_reader(File::open(path)?)?
    };
    // fail early on bad values rather than at first use
    settings.observer_point()?;
    settings.indian_grid_zone()?;
    settings.utm_zone_override()?;
    log::debug!(
        "loaded settings from {} for observer `{}`",
        path.display(),
        settings.observer.name
    );
    Ok(settings)
}

/// Load waypoints from a YAML list, a single TOML record, or a directory of TOML records.
pub fn load_waypoints<P: AsRef<Path>>(path: P) -> Result<Vec<WaypointConfig>, ConfigError> {
    let waypoints: Vec<WaypointConfig> = load_records(path)?;
    for waypoint in &waypoints {
        waypoint.point()?;
    }
    Ok(waypoints)
}

fn has_toml_extension(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if has_toml_extension(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| has_toml_extension(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
