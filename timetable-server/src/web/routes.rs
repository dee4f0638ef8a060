//! HTTP route handlers.

use axum::{
    Json, Router, async_trait,
    extract::{FromRequestParts, Path, Query, State, rejection::PathRejection},
    http::{HeaderValue, Method, StatusCode, request::Parts},
    response::IntoResponse,
    routing::get,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::calendar::{InvalidDate, resolve_query_date};
use crate::domain::{GroupId, StopId};
use crate::timetable::{GroupLookup, StopLookup, TimetableError, TimetableTarget};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `allowed_origins` are the origins accepted by CORS; `*` allows any.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/bus-stops", get(list_bus_stops))
        .route("/api/bus-stops/groups", get(list_bus_stop_groups))
        .route("/api/bus-stops/groups/:id", get(bus_stop_group_details))
        .route("/api/bus-stops/groups/:id/timetable", get(bus_stop_group_timetable))
        .route("/api/bus-stops/:id", get(bus_stop_details))
        .route("/api/bus-stops/:id/timetable", get(bus_stop_timetable))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_origin = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET])
}

/// The numeric `:id` of a stop or group.
///
/// Rejects with an [`AppError`] so a malformed id gets the JSON error body.
struct IdPath(i32);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state).await?;
        Ok(IdPath(id))
    }
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List all stops, or the stops of one group.
async fn list_bus_stops(
    State(state): State<AppState>,
    Query(query): Query<BusStopsQuery>,
) -> Result<Json<Vec<BusStopResult>>, AppError> {
    let stops = match query.group_id {
        Some(id) => {
            let group_id = GroupId(id);
            let stops = state
                .directory
                .stops_in_group(group_id)
                .ok_or(TimetableError::GroupNotFound(group_id))?;
            if stops.is_empty() {
                warn!(group = %group_id, "no bus stops found in group");
            }
            stops
        }
        None => state.directory.stops(),
    };

    Ok(Json(stops.iter().map(BusStopResult::from_stop).collect()))
}

/// List all stop groups.
async fn list_bus_stop_groups(State(state): State<AppState>) -> Json<Vec<BusStopGroupResult>> {
    Json(
        state
            .directory
            .groups()
            .iter()
            .map(BusStopGroupResult::from_group)
            .collect(),
    )
}

async fn bus_stop_details(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<BusStopResult>, AppError> {
    let stop_id = StopId(id);
    let stop = state
        .directory
        .stop_by_id(stop_id)
        .ok_or(TimetableError::StopNotFound(stop_id))?;

    Ok(Json(BusStopResult::from_stop(stop)))
}

async fn bus_stop_group_details(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<BusStopGroupResult>, AppError> {
    let group_id = GroupId(id);
    let group = state
        .directory
        .group_by_id(group_id)
        .ok_or(TimetableError::GroupNotFound(group_id))?;

    Ok(Json(BusStopGroupResult::from_group(group)))
}

/// Timetable of services departing a stop on the requested date.
async fn bus_stop_timetable(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    Query(query): Query<TimetableQuery>,
) -> Result<Json<StopTimetableResponse>, AppError> {
    let stop_id = StopId(id);
    // An unknown stop is reported before a bad date.
    if state.directory.stop_by_id(stop_id).is_none() {
        return Err(TimetableError::StopNotFound(stop_id).into());
    }
    let date = resolve_query_date(query.date.as_deref())?;

    let timetable = state.timetable(TimetableTarget::Stop(stop_id), date).await?;
    Ok(Json(StopTimetableResponse::from_timetable(&timetable)))
}

/// Timetable of services departing any stop of a group.
async fn bus_stop_group_timetable(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    Query(query): Query<TimetableQuery>,
) -> Result<Json<GroupTimetableResponse>, AppError> {
    let group_id = GroupId(id);
    if state.directory.group_by_id(group_id).is_none() {
        return Err(TimetableError::GroupNotFound(group_id).into());
    }
    let date = resolve_query_date(query.date.as_deref())?;

    let timetable = state.timetable(TimetableTarget::Group(group_id), date).await?;
    Ok(Json(GroupTimetableResponse::from_timetable(&timetable)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String, detail: String },
    NotFound { message: String, detail: String },
}

impl From<InvalidDate> for AppError {
    fn from(_: InvalidDate) -> Self {
        AppError::BadRequest {
            message: "InvalidDate".to_string(),
            detail: "The 'date' query must be in YYYY-MM-DD format.".to_string(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        AppError::BadRequest {
            message: "InvalidId".to_string(),
            detail: e.body_text(),
        }
    }
}

impl From<TimetableError> for AppError {
    fn from(e: TimetableError) -> Self {
        match e {
            TimetableError::StopNotFound(_) => AppError::NotFound {
                message: "BusStopNotFound".to_string(),
                detail: "The requested bus stop does not exist.".to_string(),
            },
            TimetableError::GroupNotFound(_) => AppError::NotFound {
                message: "BusStopGroupNotFound".to_string(),
                detail: "The requested bus stop group does not exist.".to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message, detail) = match self {
            AppError::BadRequest { message, detail } => {
                (StatusCode::BAD_REQUEST, "BadRequest", message, detail)
            }
            AppError::NotFound { message, detail } => {
                (StatusCode::NOT_FOUND, "NotFound", message, detail)
            }
        };

        warn!(status = %status, message = %message, "request failed");

        let body = Json(ErrorResponse {
            code: code.to_string(),
            message,
            detail,
        });
        (status, body).into_response()
    }
}
