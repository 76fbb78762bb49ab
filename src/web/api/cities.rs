use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::providers::{monthly_schedule, City, CitySchedule};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::server::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CitySearchQuery {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CityScheduleQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/cities",
    tag = "cities",
    params(
        ("query" = Option<String>, Query, description = "Substring filter, case-insensitive")
    ),
    responses(
        (status = 200, description = "Matching cities", body = Vec<City>),
        (status = 502, description = "City directory unavailable", body = ErrorResponse)
    )
)]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<CitySearchQuery>,
) -> ApiResult<Json<Vec<City>>> {
    {
        let directory = state.cities.read().await;
        if directory.is_loaded() {
            return Ok(Json(directory.filter(&query.query)));
        }
    }

    // First use: fetch the directory once, then filter from the cache.
    let mut directory = state.cities.write().await;
    if !directory.is_loaded() {
        let count = directory.load(&state.http).await?;
        log::info!("loaded {} cities from the directory provider", count);
    }
    Ok(Json(directory.filter(&query.query)))
}

#[utoipa::path(
    get,
    path = "/api/cities/{id}/schedule",
    tag = "cities",
    params(
        ("id" = String, Path, description = "City id from the directory"),
        ("year" = Option<i32>, Query, description = "Gregorian year, default current"),
        ("month" = Option<u32>, Query, description = "Gregorian month, default current")
    ),
    responses(
        (status = 200, description = "Published monthly schedule for the city", body = CitySchedule),
        (status = 502, description = "Schedule provider unavailable", body = ErrorResponse)
    )
)]
pub async fn city_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<CityScheduleQuery>,
) -> ApiResult<Json<CitySchedule>> {
    let now = Utc::now();
    let year = query.year.unwrap_or_else(|| now.year());
    let month = query.month.unwrap_or_else(|| now.month());

    let schedule = monthly_schedule(&state.http, &id, year, month).await?;
    Ok(Json(schedule))
}
