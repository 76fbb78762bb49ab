use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::providers::ProviderError;
use crate::qibla::QiblaError;
use crate::schedule::ScheduleError;
use crate::store::StoreError;

pub enum ApiError {
    Validation(String),
    Conflict(&'static str),
    /// An upstream provider is degraded; the client keeps its cached state.
    Upstream(ProviderError),
    Store(StoreError),
}

impl From<ProviderError> for ApiError {
    fn from(e: ProviderError) -> Self {
        ApiError::Upstream(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e)
    }
}

impl From<ScheduleError> for ApiError {
    fn from(e: ScheduleError) -> Self {
        match e {
            ScheduleError::TickerRunning => ApiError::Conflict("ticker_running"),
            other => ApiError::Validation(other.to_string()),
        }
    }
}

impl From<QiblaError> for ApiError {
    fn from(e: QiblaError) -> Self {
        match e {
            QiblaError::NoSession => ApiError::Conflict("no_session"),
            QiblaError::SensorUnavailable(_) => ApiError::Conflict("sensor_unavailable"),
            QiblaError::EmptySample => ApiError::Validation(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_message("validation_failed", &msg)),
            )
                .into_response(),
            ApiError::Conflict(reason) => {
                (StatusCode::CONFLICT, Json(ErrorResponse::new(reason))).into_response()
            }
            ApiError::Upstream(e) => (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::with_message("upstream_unavailable", &e.to_string())),
            )
                .into_response(),
            ApiError::Store(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_message("store_error", &e.to_string())),
            )
                .into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: None,
        }
    }

    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}
