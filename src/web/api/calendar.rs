use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::providers::{holidays_by_hijri_year, month_calendar, HijriDay};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::server::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct HijriMonthQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct HolidaysQuery {
    pub hijri_year: u32,
}

#[utoipa::path(
    get,
    path = "/api/calendar/hijri",
    tag = "calendar",
    params(
        ("month" = Option<u32>, Query, description = "Gregorian month (1-12), default current"),
        ("year" = Option<i32>, Query, description = "Gregorian year, default current")
    ),
    responses(
        (status = 200, description = "Hijri date for each day of the month", body = Vec<HijriDay>),
        (status = 502, description = "Calendar provider unavailable", body = ErrorResponse)
    )
)]
pub async fn hijri_month(
    State(state): State<AppState>,
    Query(query): Query<HijriMonthQuery>,
) -> ApiResult<Json<Vec<HijriDay>>> {
    let now = Utc::now();
    let month = query.month.unwrap_or_else(|| now.month());
    let year = query.year.unwrap_or_else(|| now.year());

    let days = month_calendar(&state.http, month, year).await?;
    Ok(Json(days))
}

#[utoipa::path(
    get,
    path = "/api/calendar/holidays",
    tag = "calendar",
    params(
        ("hijri_year" = u32, Query, description = "Hijri year")
    ),
    responses(
        (status = 200, description = "Islamic holidays in the Hijri year", body = Vec<HijriDay>),
        (status = 502, description = "Calendar provider unavailable", body = ErrorResponse)
    )
)]
pub async fn holidays(
    State(state): State<AppState>,
    Query(query): Query<HolidaysQuery>,
) -> ApiResult<Json<Vec<HijriDay>>> {
    let days = holidays_by_hijri_year(&state.http, query.hijri_year).await?;
    Ok(Json(days))
}
