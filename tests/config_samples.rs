use terranav::config::{CoordSystem, load_settings, load_waypoints};
use terranav::geodesy::{IndianGridZone, to_indian_grid};
use terranav::navigation::{format_distance, path_length};

fn sample(name: &str) -> String {
    format!("{}/configs/{}", env!("CARGO_MANIFEST_DIR"), name)
}

#[test]
fn shipped_settings_describe_new_delhi_on_indian_grid() {
    let settings = load_settings(sample("settings.toml")).expect("settings");
    assert_eq!(settings.observer.name, "New Delhi");
    assert_eq!(settings.grid.system, CoordSystem::IndianGrid);
    let zone = settings.indian_grid_zone().unwrap().expect("zone configured");
    assert_eq!(zone, IndianGridZone::IIA);

    let point = settings.observer_point().unwrap();
    let grid = to_indian_grid(&point, zone).unwrap();
    assert!((grid.easting - 3_057_027.9).abs() < 1.0);
}

#[test]
fn shipped_waypoints_form_a_city_route() {
    let waypoints = load_waypoints(sample("waypoints.yaml")).expect("waypoints");
    assert_eq!(waypoints.len(), 4);
    assert_eq!(waypoints[0].name, "India Gate");

    let points: Vec<_> = waypoints.iter().map(|w| w.point().unwrap()).collect();
    let total = path_length(&points);
    assert!(total > 10_000.0 && total < 40_000.0, "total {total}");
    assert!(format_distance(total).ends_with("km"));
}
