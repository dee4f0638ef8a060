//! Loading a data directory from disk and querying timetables.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tempfile::TempDir;
use timetable_server::catalog::{CatalogError, CatalogLoader};
use timetable_server::config::ServerConfig;
use timetable_server::directory::StopDirectory;
use timetable_server::domain::{GroupId, StopId};
use timetable_server::timetable::{TimetableBuilder, TimetableRow};

const BUS_STOPS: &str = r#"[
    {"id": 1, "name": "Station North", "lat": 35.5, "lng": 139.25},
    {"id": 2, "name": "Campus"},
    {"id": 3, "name": "Station South"}
]"#;

const BUS_STOP_GROUPS: &str = r#"[
    {"id": 10, "name": "Station", "bus_stops": [
        {"id": 1, "name": "Station North"},
        {"id": 3, "name": "Station South"}
    ]}
]"#;

const NORTH_TO_CAMPUS: &str = r#"{
    "id": "north-campus",
    "name": "Station North to Campus",
    "from": {"stopId": 1, "displayName": "Station North"},
    "to": {"stopId": 2, "displayName": "Campus"},
    "direction": "outbound",
    "validityPeriods": [{"from": "2024-04-01", "to": "2024-07-31"}],
    "segments": [
        {
            "segmentType": "fixed",
            "condition": {"type": "dayType", "value": "weekday"},
            "times": [
                {"departure": "08:00", "arrival": "08:20"},
                {"departure": "08:30", "arrival": "08:50"}
            ]
        },
        {
            "segmentType": "shuttle",
            "condition": {"type": "specificDate", "value": "2024-06-15"},
            "startTime": "9:00",
            "endTime": "11:30",
            "intervalRange": {"min": 5, "max": 10},
            "note": "open campus"
        }
    ]
}"#;

const SOUTH_TO_CAMPUS: &str = r#"{
    "id": "south-campus",
    "name": "Station South to Campus",
    "from": {"stopId": 3, "displayName": "Station South"},
    "to": {"stopId": 2, "displayName": "Campus"},
    "direction": "outbound",
    "segments": [
        {
            "segmentType": "fixed",
            "condition": {"value": "weekday"},
            "times": [{"departure": "09:00", "arrival": "09:15"}]
        }
    ]
}"#;

fn write_data_dir(services: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bus_stops.json"), BUS_STOPS).unwrap();
    fs::write(dir.path().join("bus_stop_groups.json"), BUS_STOP_GROUPS).unwrap();
    fs::create_dir(dir.path().join("services")).unwrap();
    for (name, contents) in services {
        fs::write(dir.path().join("services").join(name), contents).unwrap();
    }
    dir
}

fn config_for(data_path: &Path) -> ServerConfig {
    let data_path = data_path.to_string_lossy().into_owned();
    ServerConfig::from_lookup(|name| (name == "DATA_PATH").then(|| data_path.clone())).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn stop_and_group_timetables_from_disk() {
    let dir = write_data_dir(&[
        ("north-campus.json", NORTH_TO_CAMPUS),
        ("south-campus.json", SOUTH_TO_CAMPUS),
        ("README.md", "not a service"),
    ]);
    let config = config_for(dir.path());

    let directory =
        StopDirectory::load(&config.bus_stops_path(), &config.bus_stop_groups_path()).unwrap();
    let loader = CatalogLoader::new();
    let catalog = loader.load_from_dir(&config.data_path).unwrap();
    assert_eq!(catalog.len(), 2);

    let builder = TimetableBuilder::new(&catalog, &directory, &directory);

    // Monday inside the validity period: fixed departures only.
    let monday = builder.stop_timetable(StopId(1), date("2024-06-10")).unwrap();
    assert_eq!(monday.name, "Station North");
    assert_eq!(monday.segments.len(), 1);
    let TimetableRow::Fixed(fixed) = &monday.segments[0] else {
        panic!("expected a fixed row");
    };
    assert_eq!(fixed.destination.name, "Campus");
    assert_eq!(fixed.times.len(), 2);

    // The open campus Saturday: the shuttle only.
    let saturday = builder.stop_timetable(StopId(1), date("2024-06-15")).unwrap();
    assert_eq!(saturday.segments.len(), 1);
    let TimetableRow::Shuttle(shuttle) = &saturday.segments[0] else {
        panic!("expected a shuttle row");
    };
    assert_eq!(shuttle.start_time.to_string(), "09:00");
    assert_eq!(shuttle.note.as_deref(), Some("open campus"));

    // Outside the validity period only the unrestricted service remains.
    let group = builder.group_timetable(GroupId(10), date("2024-09-02")).unwrap();
    assert_eq!(group.segments.len(), 1);
    assert_eq!(group.segments[0].destination().stop_id, StopId(2));

    // Both members contribute inside the period.
    let group = builder.group_timetable(GroupId(10), date("2024-06-10")).unwrap();
    assert_eq!(group.segments.len(), 2);
}

#[test]
fn malformed_service_fails_the_load() {
    let dir = write_data_dir(&[
        ("north-campus.json", NORTH_TO_CAMPUS),
        (
            "broken.json",
            r#"{
                "id": "broken", "name": "broken",
                "from": {"stopId": 1, "displayName": ""},
                "to": {"stopId": 2, "displayName": ""},
                "direction": "inbound",
                "segments": [{"segmentType": "ferry"}]
            }"#,
        ),
    ]);

    let loader = CatalogLoader::new();
    let err = loader.load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CatalogError::Malformed { .. }));
    assert!(!loader.is_loaded());

    // Fixing the data lets a later load succeed.
    fs::remove_file(dir.path().join("services").join("broken.json")).unwrap();
    assert_eq!(loader.load_from_dir(dir.path()).unwrap().len(), 1);
    assert!(loader.is_loaded());
}

#[test]
fn missing_services_directory_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CatalogLoader::new().load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CatalogError::Read { .. }));
}
