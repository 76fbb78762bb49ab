use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::providers::CityDirectory;
use crate::qibla::HeadingTracker;
use crate::schedule::ScheduleTicker;
use crate::store::{PreferenceStore, Preferences};

use super::api::calendar as calendar_handlers;
use super::api::cities as city_handlers;
use super::api::location as location_handlers;
use super::api::preferences as preference_handlers;
use super::api::qibla as qibla_handlers;
use super::api::quran as quran_handlers;
use super::api::timetable as timetable_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::ui::handlers as ui_handlers;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: reqwest::Client,
    pub store: Arc<PreferenceStore>,
    pub preferences: Arc<RwLock<Preferences>>,
    pub ticker: Arc<Mutex<ScheduleTicker>>,
    pub qibla: Arc<Mutex<HeadingTracker>>,
    pub cities: Arc<RwLock<CityDirectory>>,
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();

    let store = PreferenceStore::new(config.store.base_folder.clone());
    let preferences = store.load();

    // The live countdown starts immediately for the configured default
    // location; clients with a geolocation fix restart it with real
    // coordinates.
    let mut ticker = ScheduleTicker::new();
    if let Err(e) = ticker.run(config.default_coordinates(), preferences.calculation_method) {
        log::warn!("failed to start schedule ticker: {}", e);
    }

    let state = AppState {
        config: Arc::new(config),
        http: reqwest::Client::new(),
        store: Arc::new(store),
        preferences: Arc::new(RwLock::new(preferences)),
        ticker: Arc::new(Mutex::new(ticker)),
        qibla: Arc::new(Mutex::new(HeadingTracker::new())),
        cities: Arc::new(RwLock::new(CityDirectory::new())),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        // UI routes
        .route("/", get(ui_handlers::dashboard))
        .route("/qibla", get(ui_handlers::qibla))
        // Schedule API endpoints
        .route("/api/timetable", get(timetable_handlers::timetable))
        .route("/api/window", get(timetable_handlers::window))
        .route("/api/ticker/run", post(timetable_handlers::ticker_run))
        .route("/api/ticker/stop", post(timetable_handlers::ticker_stop))
        .route("/api/ticker/status", get(timetable_handlers::ticker_status))
        // Qibla API endpoints
        .route("/api/qibla/bearing", get(qibla_handlers::bearing))
        .route("/api/qibla/session", post(qibla_handlers::start_session))
        .route("/api/qibla/sample", post(qibla_handlers::sample))
        .route("/api/qibla/status", get(qibla_handlers::status))
        .route("/api/qibla/stop", post(qibla_handlers::stop))
        // Location
        .route("/api/location", get(location_handlers::resolve))
        // Calendar API endpoints
        .route("/api/calendar/hijri", get(calendar_handlers::hijri_month))
        .route("/api/calendar/holidays", get(calendar_handlers::holidays))
        // Quran text endpoints
        .route("/api/quran/surah", get(quran_handlers::directory))
        .route("/api/quran/surah/{number}", get(quran_handlers::detail))
        // City directory endpoints
        .route("/api/cities", get(city_handlers::search))
        .route(
            "/api/cities/{id}/schedule",
            get(city_handlers::city_schedule),
        )
        // Preferences
        .route(
            "/api/preferences",
            get(preference_handlers::get_preferences).put(preference_handlers::put_preferences),
        )
        // Static files
        .nest_service("/static", ServeDir::new("static"))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
