use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::location::{LocationQuery, LocationResponse};
use super::api::qibla::{BearingQuery, BearingResponse, SessionRequest};
use super::api::timetable::{
    PrayerTimeEntry, ScheduleQuery, TickerRunRequest, TimetableResponse, WindowResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::timetable::timetable,
        super::api::timetable::window,
        super::api::timetable::ticker_run,
        super::api::timetable::ticker_stop,
        super::api::timetable::ticker_status,
        super::api::qibla::bearing,
        super::api::qibla::start_session,
        super::api::qibla::sample,
        super::api::qibla::status,
        super::api::qibla::stop,
        super::api::location::resolve,
        super::api::calendar::hijri_month,
        super::api::calendar::holidays,
        super::api::quran::directory,
        super::api::quran::detail,
        super::api::cities::search,
        super::api::cities::city_schedule,
        super::api::preferences::get_preferences,
        super::api::preferences::put_preferences,
    ),
    components(
        schemas(
            ErrorResponse,
            ScheduleQuery,
            PrayerTimeEntry,
            TimetableResponse,
            WindowResponse,
            TickerRunRequest,
            BearingQuery,
            BearingResponse,
            SessionRequest,
            LocationQuery,
            LocationResponse,
            crate::geo::Coordinates,
            crate::schedule::Prayer,
            crate::schedule::Method,
            crate::schedule::PrayerWindow,
            crate::schedule::Progress,
            crate::schedule::Countdown,
            crate::schedule::TickerMode,
            crate::schedule::TickerStatus,
            crate::qibla::SensorState,
            crate::qibla::OrientationSample,
            crate::qibla::HeadingState,
            crate::qibla::HeadingStatus,
            crate::qibla::TrackerMode,
            crate::qibla::TrackerStatus,
            crate::providers::City,
            crate::providers::CitySchedule,
            crate::providers::ScheduleRow,
            crate::providers::HijriDay,
            crate::providers::HijriDate,
            crate::providers::HijriMonth,
            crate::providers::GregorianDate,
            crate::providers::PlaceName,
            crate::providers::Surah,
            crate::providers::Ayah,
            crate::providers::SurahDetail,
            crate::store::Preferences,
            crate::store::LastRead,
        )
    ),
    info(
        title = "Salat-O-Mat API",
        description = "Prayer schedule, qibla heading and Islamic calendar API",
        version = "0.1.0"
    ),
    tags(
        (name = "schedule", description = "Prayer timetable, window and live countdown"),
        (name = "qibla", description = "Qibla bearing and heading tracker"),
        (name = "location", description = "Reverse geocoding"),
        (name = "calendar", description = "Hijri calendar conversion"),
        (name = "quran", description = "Quran surah directory and text"),
        (name = "cities", description = "City directory and published schedules"),
        (name = "preferences", description = "Persisted user preferences")
    )
)]
pub struct ApiDoc;
