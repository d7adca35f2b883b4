use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
use terranav::geodesy::{
    GeographicPoint, Hemisphere, IndianGridCoordinate, IndianGridZone, UtmCoordinate,
    from_indian_grid, from_utm, to_indian_grid, to_utm,
};
use terranav_cli::{init_logging, or_na};

/// Convert points between WGS84 latitude/longitude, UTM, and the Indian Grid.
#[derive(Parser, Debug)]
#[command(
    author,
    version = terranav::version(),
    about = "Geographic <-> UTM / Indian Grid converter"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project a latitude/longitude onto UTM and, optionally, an Indian Grid zone
    ToGrid {
        /// Latitude in degrees (north positive)
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in degrees (east positive)
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Force a UTM zone instead of deriving it from longitude
        #[arg(long)]
        utm_zone: Option<u8>,
        /// Indian Grid zone (0, IA, IB, IIA, IIB, IIIA, IIIB, IVA, IVB)
        #[arg(long)]
        indian_zone: Option<IndianGridZone>,
    },
    /// Convert a UTM coordinate back to latitude/longitude
    FromUtm {
        #[arg(long)]
        zone: u8,
        /// N or S
        #[arg(long)]
        hemisphere: Hemisphere,
        #[arg(long)]
        easting: f64,
        #[arg(long)]
        northing: f64,
    },
    /// Convert an Indian Grid coordinate back to latitude/longitude
    FromIndian {
        #[arg(long)]
        zone: IndianGridZone,
        #[arg(long)]
        easting: f64,
        #[arg(long)]
        northing: f64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(cli.verbose)?;

    match cli.command {
        Command::ToGrid {
            lat,
            lon,
            utm_zone,
            indian_zone,
        } => {
            let point = GeographicPoint::checked(lat, lon)
                .map_err(|err| anyhow!("invalid point: {err}"))?;
            println!("Point: {point}");

            let utm = to_utm(&point, utm_zone)
                .inspect_err(|err| log::warn!("UTM unavailable: {err}"))
                .ok();
            println!("UTM: {}", or_na(utm));

            if let Some(zone) = indian_zone {
                let grid = to_indian_grid(&point, zone)
                    .inspect_err(|err| log::warn!("Indian Grid unavailable: {err}"))
                    .ok();
                println!("Indian Grid: {}", or_na(grid));
            }
        }
        Command::FromUtm {
            zone,
            hemisphere,
            easting,
            northing,
        } => {
            let coord = UtmCoordinate {
                zone,
                hemisphere,
                easting,
                northing,
            };
            let point = from_utm(&coord)?;
            print_point(&point);
        }
        Command::FromIndian {
            zone,
            easting,
            northing,
        } => {
            let coord = IndianGridCoordinate {
                zone,
                easting,
                northing,
            };
            let point = from_indian_grid(&coord)?;
            print_point(&point);
        }
    }

    Ok(())
}

fn print_point(point: &GeographicPoint) {
    println!("Latitude: {:.7}", point.latitude);
    println!("Longitude: {:.7}", point.longitude);
    println!("Point: {point}");
}
