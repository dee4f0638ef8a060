//! Error bodies over a real HTTP connection.

use std::sync::Arc;

use serde_json::Value;
use timetable_server::cache::TimetableCacheConfig;
use timetable_server::catalog::ServiceCatalog;
use timetable_server::directory::StopDirectory;
use timetable_server::domain::{BusStop, StopId};
use timetable_server::web::{AppState, create_router};

/// Serve the router on an ephemeral port and return its base URL.
async fn spawn_server() -> String {
    let directory = StopDirectory::new(
        vec![BusStop {
            id: StopId(1),
            name: "Station".to_string(),
            lat: None,
            lng: None,
        }],
        Vec::new(),
    );
    let catalog = Arc::new(ServiceCatalog::default());
    let state = AppState::new(catalog, directory, &TimetableCacheConfig::default());
    let app = create_router(state, &["*".to_string()]);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn get(url: &str) -> (reqwest::StatusCode, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn non_numeric_ids_get_the_json_error_shape() {
    let base = spawn_server().await;

    for path in [
        "/api/bus-stops/abc",
        "/api/bus-stops/abc/timetable",
        "/api/bus-stops/groups/x",
        "/api/bus-stops/groups/x/timetable?date=2024-06-10",
    ] {
        let (status, body) = get(&format!("{base}{path}")).await;
        assert_eq!(status, reqwest::StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(body["code"], "BadRequest", "{path}");
        assert_eq!(body["message"], "InvalidId", "{path}");
        assert!(body["detail"].as_str().is_some_and(|d| !d.is_empty()), "{path}");
    }
}

#[tokio::test]
async fn numeric_ids_still_route() {
    let base = spawn_server().await;

    let (status, body) = get(&format!("{base}/api/bus-stops/1")).await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body["name"], "Station");

    let (status, body) = get(&format!("{base}/api/bus-stops/2")).await;
    assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "BusStopNotFound");
}
