mod error;
mod method;
mod solar;
mod ticker;
mod timetable;
mod window;

pub use error::ScheduleError;
pub use method::{Method, Parameters};
pub use ticker::{ScheduleTicker, TickerMode, TickerStatus};
pub use timetable::{civil_date_at, DaySet, Prayer, Timetable};
pub use window::{compute_progress, compute_window, Countdown, PrayerWindow, Progress};
