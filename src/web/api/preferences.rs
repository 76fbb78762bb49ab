use axum::{extract::State, Json};

use crate::store::Preferences;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::server::AppState;

#[utoipa::path(
    get,
    path = "/api/preferences",
    tag = "preferences",
    responses(
        (status = 200, description = "Current preferences", body = Preferences)
    )
)]
pub async fn get_preferences(State(state): State<AppState>) -> Json<Preferences> {
    Json(state.preferences.read().await.clone())
}

#[utoipa::path(
    put,
    path = "/api/preferences",
    tag = "preferences",
    request_body = Preferences,
    responses(
        (status = 200, description = "Preferences saved", body = Preferences),
        (status = 500, description = "Preferences could not be written", body = ErrorResponse)
    )
)]
pub async fn put_preferences(
    State(state): State<AppState>,
    Json(updated): Json<Preferences>,
) -> ApiResult<Json<Preferences>> {
    state.store.save(&updated)?;
    let mut preferences = state.preferences.write().await;
    *preferences = updated.clone();
    Ok(Json(updated))
}
