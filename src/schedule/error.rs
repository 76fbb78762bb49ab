use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("sun does not reach {altitude_deg}° at latitude {latitude_deg}° on {date}")]
    SunNeverReaches {
        altitude_deg: f64,
        latitude_deg: f64,
        date: NaiveDate,
    },
    #[error("date out of supported range")]
    DateRange,
    #[error("ticker already running")]
    TickerRunning,
}
