use axum::{extract::State, response::IntoResponse};

use crate::web::server::AppState;

use super::templates::{DashboardTemplate, QiblaTemplate};

pub async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    let preferences = state.preferences.read().await;
    DashboardTemplate {
        user_name: preferences.user_name.clone(),
        location_label: state
            .config
            .location
            .name
            .clone()
            .unwrap_or_else(|| "Jakarta, ID".to_string()),
        method_label: preferences.calculation_method.to_string(),
    }
}

pub async fn qibla(State(_state): State<AppState>) -> impl IntoResponse {
    QiblaTemplate {}
}
