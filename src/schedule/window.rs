use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::schedule::timetable::{DaySet, Prayer};

/// The active interval between two adjacent prayer instants.
///
/// Pre-Fajr the window runs from yesterday's isha to today's fajr with no
/// current prayer; after isha it runs to tomorrow's fajr with no next one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct PrayerWindow {
    pub current: Option<Prayer>,
    pub next: Option<Prayer>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Elapsed fraction of the window plus the remaining time, re-derived on
/// every tick rather than accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Progress {
    pub ratio: f64,
    pub countdown: Countdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Countdown {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// Resolve the window containing `now`. An instant hit exactly counts as
/// current (`<=`, not `<`).
pub fn compute_window(days: &DaySet, now: DateTime<Utc>) -> PrayerWindow {
    let mut current = None;
    for (prayer, time) in days.today.instants() {
        if time <= now {
            current = Some(prayer);
        }
    }

    match current {
        None => PrayerWindow {
            current: None,
            next: Some(Prayer::Fajr),
            start: days.yesterday.isha,
            end: days.today.fajr,
        },
        Some(prayer) => match prayer.successor() {
            Some(next) => PrayerWindow {
                current: Some(prayer),
                next: Some(next),
                start: days.today.time(prayer),
                end: days.today.time(next),
            },
            None => PrayerWindow {
                current: Some(Prayer::Isha),
                next: None,
                start: days.today.isha,
                end: days.tomorrow.fajr,
            },
        },
    }
}

pub fn compute_progress(window: &PrayerWindow, now: DateTime<Utc>) -> Progress {
    let total_ms = (window.end - window.start).num_milliseconds();
    let ratio = if total_ms <= 0 {
        1.0
    } else {
        let elapsed_ms = (now - window.start).num_milliseconds() as f64;
        (elapsed_ms / total_ms as f64).clamp(0.0, 1.0)
    };

    let remaining = (window.end - now).num_seconds().max(0);
    Progress {
        ratio,
        countdown: Countdown {
            hours: remaining / 3600,
            minutes: remaining % 3600 / 60,
            seconds: remaining % 60,
        },
    }
}
