pub mod calendar;
pub mod cities;
pub mod error;
pub mod location;
pub mod preferences;
pub mod qibla;
pub mod quran;
pub mod timetable;

use crate::geo::Coordinates;
use crate::schedule::Method;
use crate::web::server::AppState;

/// Substitute the configured default location for requests without a
/// geolocation fix, flagging the result as approximate.
pub fn resolve_location(
    state: &AppState,
    latitude_deg: Option<f64>,
    longitude_deg: Option<f64>,
) -> (Coordinates, bool) {
    match (latitude_deg, longitude_deg) {
        (Some(lat), Some(lon)) => (Coordinates::new(lat, lon), false),
        _ => (state.config.default_coordinates(), true),
    }
}

/// Method from the query when given, otherwise the saved preference.
pub async fn resolve_method(state: &AppState, query_method: Option<&str>) -> Method {
    match query_method {
        Some(id) => Method::from_id(id),
        None => state.preferences.read().await.calculation_method,
    }
}
