use axum::{
    extract::{Path, State},
    Json,
};

use crate::providers::{surah_detail, surah_directory, Surah, SurahDetail};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::server::AppState;

#[utoipa::path(
    get,
    path = "/api/quran/surah",
    tag = "quran",
    responses(
        (status = 200, description = "Directory of all 114 surahs", body = Vec<Surah>),
        (status = 502, description = "Quran provider unavailable", body = ErrorResponse)
    )
)]
pub async fn directory(State(state): State<AppState>) -> ApiResult<Json<Vec<Surah>>> {
    let surahs = surah_directory(&state.http).await?;
    Ok(Json(surahs))
}

#[utoipa::path(
    get,
    path = "/api/quran/surah/{number}",
    tag = "quran",
    params(
        ("number" = u32, Path, description = "Surah number (1-114)")
    ),
    responses(
        (status = 200, description = "Full text of the surah, verse by verse", body = SurahDetail),
        (status = 400, description = "Surah number out of range", body = ErrorResponse),
        (status = 502, description = "Quran provider unavailable", body = ErrorResponse)
    )
)]
pub async fn detail(
    State(state): State<AppState>,
    Path(number): Path<u32>,
) -> ApiResult<Json<SurahDetail>> {
    if !(1..=114).contains(&number) {
        return Err(ApiError::Validation(format!(
            "surah number {number} out of range 1..=114"
        )));
    }

    let detail = surah_detail(&state.http, number).await?;
    Ok(Json(detail))
}
