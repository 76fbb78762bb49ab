use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::geo::Coordinates;
use crate::qibla::{
    qibla_bearing_deg, HeadingStatus, OrientationSample, SensorState, TrackerStatus,
};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::api::resolve_location;
use crate::web::server::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct BearingQuery {
    pub latitude_deg: Option<f64>,
    pub longitude_deg: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BearingResponse {
    pub coordinates: Coordinates,
    pub bearing_deg: f64,
    pub approximate_location: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SessionRequest {
    pub latitude_deg: Option<f64>,
    pub longitude_deg: Option<f64>,
    #[serde(default = "default_sensor")]
    pub sensor: SensorState,
}

fn default_sensor() -> SensorState {
    SensorState::Active
}

#[utoipa::path(
    get,
    path = "/api/qibla/bearing",
    tag = "qibla",
    params(
        ("latitude_deg" = Option<f64>, Query, description = "Latitude, decimal degrees"),
        ("longitude_deg" = Option<f64>, Query, description = "Longitude, decimal degrees")
    ),
    responses(
        (status = 200, description = "Great-circle bearing toward the Kaaba", body = BearingResponse)
    )
)]
pub async fn bearing(
    State(state): State<AppState>,
    Query(query): Query<BearingQuery>,
) -> Json<BearingResponse> {
    let (coords, approximate) = resolve_location(&state, query.latitude_deg, query.longitude_deg);
    Json(BearingResponse {
        coordinates: coords,
        bearing_deg: qibla_bearing_deg(coords),
        approximate_location: approximate,
    })
}

#[utoipa::path(
    post,
    path = "/api/qibla/session",
    tag = "qibla",
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Session started; smoothing state reset", body = TrackerStatus)
    )
)]
pub async fn start_session(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> Json<TrackerStatus> {
    let (coords, _) = resolve_location(&state, request.latitude_deg, request.longitude_deg);
    let mut tracker = state.qibla.lock().await;
    Json(tracker.start(coords, request.sensor))
}

#[utoipa::path(
    post,
    path = "/api/qibla/sample",
    tag = "qibla",
    request_body = OrientationSample,
    responses(
        (status = 200, description = "Smoothed heading after the sample", body = HeadingStatus),
        (status = 400, description = "Sample carries no usable angle", body = ErrorResponse),
        (status = 409, description = "No session, or sensor unavailable for this session", body = ErrorResponse)
    )
)]
pub async fn sample(
    State(state): State<AppState>,
    Json(sample): Json<OrientationSample>,
) -> ApiResult<Json<HeadingStatus>> {
    let mut tracker = state.qibla.lock().await;
    let status = tracker.apply(sample)?;
    Ok(Json(status))
}

#[utoipa::path(
    get,
    path = "/api/qibla/status",
    tag = "qibla",
    responses(
        (status = 200, description = "Tracker mode and current heading", body = TrackerStatus)
    )
)]
pub async fn status(State(state): State<AppState>) -> Json<TrackerStatus> {
    let tracker = state.qibla.lock().await;
    Json(tracker.status())
}

#[utoipa::path(
    post,
    path = "/api/qibla/stop",
    tag = "qibla",
    responses(
        (status = 200, description = "Session released", body = TrackerStatus)
    )
)]
pub async fn stop(State(state): State<AppState>) -> Json<TrackerStatus> {
    let mut tracker = state.qibla.lock().await;
    tracker.stop();
    Json(tracker.status())
}
