use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::geo::Coordinates;
use crate::providers::{reverse_geocode, PlaceName};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::api::resolve_location;
use crate::web::server::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LocationQuery {
    pub latitude_deg: Option<f64>,
    pub longitude_deg: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LocationResponse {
    pub coordinates: Coordinates,
    pub place: PlaceName,
    pub label: String,
    pub approximate_location: bool,
}

#[utoipa::path(
    get,
    path = "/api/location",
    tag = "location",
    params(
        ("latitude_deg" = Option<f64>, Query, description = "Latitude, decimal degrees"),
        ("longitude_deg" = Option<f64>, Query, description = "Longitude, decimal degrees")
    ),
    responses(
        (status = 200, description = "Place name for the coordinate", body = LocationResponse),
        (status = 502, description = "Geocoding provider unavailable", body = ErrorResponse)
    )
)]
pub async fn resolve(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> ApiResult<Json<LocationResponse>> {
    let (coords, approximate) = resolve_location(&state, query.latitude_deg, query.longitude_deg);
    let place = reverse_geocode(&state.http, coords).await?;
    let label = place.label();
    Ok(Json(LocationResponse {
        coordinates: coords,
        place,
        label,
        approximate_location: approximate,
    }))
}
