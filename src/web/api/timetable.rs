use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::geo::Coordinates;
use crate::schedule::{
    civil_date_at, compute_progress, compute_window, DaySet, Method, Prayer, PrayerWindow,
    Progress, TickerStatus, Timetable,
};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::api::{resolve_location, resolve_method};
use crate::web::server::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ScheduleQuery {
    pub latitude_deg: Option<f64>,
    pub longitude_deg: Option<f64>,
    pub method: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PrayerTimeEntry {
    pub name: Prayer,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TimetableResponse {
    pub date: NaiveDate,
    pub coordinates: Coordinates,
    pub method: Method,
    pub approximate_location: bool,
    pub times: Vec<PrayerTimeEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WindowResponse {
    pub coordinates: Coordinates,
    pub method: Method,
    pub approximate_location: bool,
    pub now: DateTime<Utc>,
    pub window: PrayerWindow,
    pub progress: Progress,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TickerRunRequest {
    pub latitude_deg: Option<f64>,
    pub longitude_deg: Option<f64>,
    pub method: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/timetable",
    tag = "schedule",
    params(
        ("latitude_deg" = Option<f64>, Query, description = "Latitude, decimal degrees"),
        ("longitude_deg" = Option<f64>, Query, description = "Longitude, decimal degrees"),
        ("method" = Option<String>, Query, description = "Calculation method id"),
        ("date" = Option<String>, Query, description = "Civil date (YYYY-MM-DD), default today at the location")
    ),
    responses(
        (status = 200, description = "Six prayer instants for the date", body = TimetableResponse),
        (status = 400, description = "Timetable unavailable for the date/latitude", body = ErrorResponse)
    )
)]
pub async fn timetable(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> ApiResult<Json<TimetableResponse>> {
    let (coords, approximate) = resolve_location(&state, query.latitude_deg, query.longitude_deg);
    let method = resolve_method(&state, query.method.as_deref()).await;
    let date = query
        .date
        .unwrap_or_else(|| civil_date_at(coords, Utc::now()));

    let table = Timetable::compute(coords, date, method)?;

    Ok(Json(TimetableResponse {
        date,
        coordinates: coords,
        method,
        approximate_location: approximate,
        times: table
            .instants()
            .into_iter()
            .map(|(name, time)| PrayerTimeEntry { name, time })
            .collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/window",
    tag = "schedule",
    params(
        ("latitude_deg" = Option<f64>, Query, description = "Latitude, decimal degrees"),
        ("longitude_deg" = Option<f64>, Query, description = "Longitude, decimal degrees"),
        ("method" = Option<String>, Query, description = "Calculation method id")
    ),
    responses(
        (status = 200, description = "Window containing now, with progress and countdown", body = WindowResponse),
        (status = 400, description = "Timetable unavailable", body = ErrorResponse)
    )
)]
pub async fn window(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> ApiResult<Json<WindowResponse>> {
    let (coords, approximate) = resolve_location(&state, query.latitude_deg, query.longitude_deg);
    let method = resolve_method(&state, query.method.as_deref()).await;

    let now = Utc::now();
    let days = DaySet::compute(coords, now, method)?;
    let window = compute_window(&days, now);
    let progress = compute_progress(&window, now);

    Ok(Json(WindowResponse {
        coordinates: coords,
        method,
        approximate_location: approximate,
        now,
        window,
        progress,
    }))
}

#[utoipa::path(
    post,
    path = "/api/ticker/run",
    tag = "schedule",
    request_body = TickerRunRequest,
    responses(
        (status = 200, description = "Ticker restarted for the location", body = TickerStatus)
    )
)]
pub async fn ticker_run(
    State(state): State<AppState>,
    Json(request): Json<TickerRunRequest>,
) -> ApiResult<Json<TickerStatus>> {
    let (coords, _) = resolve_location(&state, request.latitude_deg, request.longitude_deg);
    let method = resolve_method(&state, request.method.as_deref()).await;

    // A new geolocation fix replaces the running loop.
    let mut ticker = state.ticker.lock().await;
    ticker.stop().await;
    ticker.run(coords, method)?;

    Ok(Json(ticker.status()))
}

#[utoipa::path(
    post,
    path = "/api/ticker/stop",
    tag = "schedule",
    responses(
        (status = 200, description = "Ticker stopped", body = TickerStatus)
    )
)]
pub async fn ticker_stop(State(state): State<AppState>) -> Json<TickerStatus> {
    let mut ticker = state.ticker.lock().await;
    ticker.stop().await;
    Json(ticker.status())
}

#[utoipa::path(
    get,
    path = "/api/ticker/status",
    tag = "schedule",
    responses(
        (status = 200, description = "Live window and countdown snapshot", body = TickerStatus)
    )
)]
pub async fn ticker_status(State(state): State<AppState>) -> Json<TickerStatus> {
    let ticker = state.ticker.lock().await;
    Json(ticker.status())
}
