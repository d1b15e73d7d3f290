//! End-to-end scenarios through the public API: parsed sample lines feed a
//! monitor and the resulting events are checked in order.

use chrono::{DateTime, Utc};
use geofencer::stream::parse_sample_line;
use geofencer::{Coordinate, GeofenceError, GeofenceMonitor, Region, TransitionKind, distance};

const HOME: Coordinate = Coordinate {
    latitude: -1.894114,
    longitude: 30.056424,
};

fn home_region() -> Region {
    Region::new("home", HOME, 10.0).with_label("Home")
}

/// Run CSV sample lines through a monitor and collect (region, kind) pairs.
fn run_track(monitor: &mut GeofenceMonitor, lines: &[&str]) -> Vec<(String, TransitionKind)> {
    let mut seen = Vec::new();
    for line in lines {
        let Some(sample) = parse_sample_line(line).unwrap() else {
            continue;
        };
        let timestamp = sample
            .timestamp
            .expect("scenario samples carry timestamps");
        for event in monitor
            .process_sample_at(sample.coordinate, timestamp)
            .unwrap()
        {
            seen.push((event.region_id.clone(), event.kind));
        }
    }
    seen
}

#[test]
fn test_walk_out_of_home_and_back() {
    let mut monitor = GeofenceMonitor::new(vec![home_region()]).unwrap();

    let lines = [
        "# leaving the house",
        "-1.894114,30.056424,2024-05-01T08:00:00Z",
        "-1.894150,30.056424,2024-05-01T08:00:05Z",
        "",
        "-1.894400,30.056424,2024-05-01T08:00:30Z",
        "-1.894500,30.056424,2024-05-01T08:01:00Z",
        "-1.894114,30.056430,2024-05-01T18:00:00Z",
    ];

    let seen = run_track(&mut monitor, &lines);

    assert_eq!(
        seen,
        vec![
            ("home".to_string(), TransitionKind::Entered),
            ("home".to_string(), TransitionKind::Exited),
            ("home".to_string(), TransitionKind::Entered),
        ]
    );
    assert_eq!(monitor.samples_processed(), 5);
    assert_eq!(monitor.inside_regions(), vec!["home"]);
}

#[test]
fn test_events_carry_sample_time_and_distance() {
    let mut monitor = GeofenceMonitor::new(vec![home_region()]).unwrap();
    let sample = parse_sample_line("-1.894114, 30.056424, 2024-05-01T08:00:00+02:00")
        .unwrap()
        .unwrap();

    let events = monitor
        .process_sample_at(sample.coordinate, sample.timestamp.unwrap())
        .unwrap();

    let expected: DateTime<Utc> = "2024-05-01T06:00:00Z".parse().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].timestamp, expected);
    assert_eq!(events[0].region_label.as_deref(), Some("Home"));
    assert!(events[0].distance < 1e-6);
}

#[test]
fn test_overlapping_regions_report_in_declaration_order() {
    let office = Coordinate::new(-1.9536, 30.0605);
    let campus = Region::new("campus", office, 2_000.0);
    let building = Region::new("office", office, 50.0);
    let mut monitor = GeofenceMonitor::new(vec![campus, building, home_region()]).unwrap();

    let seen = run_track(
        &mut monitor,
        &[
            "-1.9536,30.0605,2024-05-01T09:00:00Z",
            "-1.894114,30.056424,2024-05-01T17:00:00Z",
        ],
    );

    assert_eq!(
        seen,
        vec![
            ("campus".to_string(), TransitionKind::Entered),
            ("office".to_string(), TransitionKind::Entered),
            ("campus".to_string(), TransitionKind::Exited),
            ("office".to_string(), TransitionKind::Exited),
            ("home".to_string(), TransitionKind::Entered),
        ]
    );
}

#[test]
fn test_invalid_region_sets_are_rejected() {
    let duplicate = GeofenceMonitor::new(vec![home_region(), home_region()]).unwrap_err();
    assert_eq!(duplicate, GeofenceError::DuplicateRegion("home".to_string()));

    let zero = GeofenceMonitor::new(vec![Region::new("a", HOME, 0.0)]).unwrap_err();
    assert!(matches!(zero, GeofenceError::InvalidRadius { .. }));

    let nan_center = Region::new("a", Coordinate::new(f64::NAN, 0.0), 5.0);
    assert!(matches!(
        GeofenceMonitor::new(vec![nan_center]).unwrap_err(),
        GeofenceError::InvalidCenter { .. }
    ));
}

#[test]
fn test_rejected_sample_leaves_membership_alone() {
    let mut monitor = GeofenceMonitor::new(vec![home_region()]).unwrap();
    monitor.process_sample(HOME).unwrap();

    let err = monitor
        .process_sample(Coordinate::new(f64::INFINITY, 30.0))
        .unwrap_err();

    assert!(matches!(err, GeofenceError::NonFiniteCoordinate { .. }));
    assert_eq!(monitor.is_inside("home"), Some(true));
    assert_eq!(monitor.samples_processed(), 1);
}

#[test]
fn test_radius_boundary_is_outside() {
    let east = Coordinate::new(0.0, 0.001);
    let edge = distance(Coordinate::new(0.0, 0.0), east);
    let mut monitor =
        GeofenceMonitor::new(vec![Region::new("edge", Coordinate::new(0.0, 0.0), edge)]).unwrap();

    assert!(monitor.process_sample(east).unwrap().is_empty());
    assert_eq!(monitor.is_inside("edge"), Some(false));
}
