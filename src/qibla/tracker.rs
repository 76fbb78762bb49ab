use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::geo::Coordinates;
use crate::qibla::bearing::{normalize_deg, qibla_bearing_deg, shortest_diff_deg};
use crate::qibla::error::QiblaError;

/// Exponential smoothing gain applied to each raw heading sample.
const SMOOTHING_GAIN: f64 = 0.1;
/// Half-width of the alignment cone around the qibla bearing.
const ALIGNMENT_CONE_DEG: f64 = 5.0;

/// Sensor availability reported by the client when the session starts.
/// Denied/unsupported is terminal for the session; samples are rejected
/// rather than silently retried.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SensorState {
    Active,
    Denied,
    Unsupported,
}

/// One device-orientation event. Platform compass heading wins when present;
/// otherwise the heading is derived from the orientation alpha angle.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema)]
pub struct OrientationSample {
    pub compass_heading_deg: Option<f64>,
    pub alpha_deg: Option<f64>,
}

impl OrientationSample {
    pub fn raw_heading_deg(&self) -> Option<f64> {
        match (self.compass_heading_deg, self.alpha_deg) {
            (Some(heading), _) => Some(normalize_deg(heading)),
            (None, Some(alpha)) => Some(normalize_deg(360.0 - alpha)),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct HeadingState {
    pub raw_deg: f64,
    pub smoothed_deg: f64,
}

/// Snapshot returned after every accepted sample.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct HeadingStatus {
    pub session: Uuid,
    pub bearing_deg: f64,
    pub heading: HeadingState,
    pub aligned: bool,
    pub samples: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub enum TrackerMode {
    Idle,
    Tracking {
        session: Uuid,
        started: DateTime<Utc>,
        origin: Coordinates,
        bearing_deg: f64,
        sensor: SensorState,
    },
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TrackerStatus {
    pub mode: TrackerMode,
    pub heading: Option<HeadingStatus>,
}

#[derive(Debug)]
struct Session {
    id: Uuid,
    started: DateTime<Utc>,
    origin: Coordinates,
    bearing_deg: f64,
    sensor: SensorState,
    state: HeadingState,
    samples: u64,
}

/// Owns the smoothed heading across an unbounded sample stream. The bearing
/// is computed once per session (a new geolocation fix means a new session);
/// smoothing memory resets only on re-initialization.
#[derive(Debug, Default)]
pub struct HeadingTracker {
    session: Option<Session>,
}

impl HeadingTracker {
    pub fn new() -> Self {
        Self { session: None }
    }

    /// Begin a session for a fresh origin fix. Replaces any previous session
    /// and resets the smoothing state.
    pub fn start(&mut self, origin: Coordinates, sensor: SensorState) -> TrackerStatus {
        self.session = Some(Session {
            id: Uuid::new_v4(),
            started: Utc::now(),
            origin,
            bearing_deg: qibla_bearing_deg(origin),
            sensor,
            state: HeadingState {
                raw_deg: 0.0,
                smoothed_deg: 0.0,
            },
            samples: 0,
        });
        self.status()
    }

    pub fn stop(&mut self) {
        self.session = None;
    }

    /// Fold one orientation sample into the smoothed heading.
    pub fn apply(&mut self, sample: OrientationSample) -> Result<HeadingStatus, QiblaError> {
        let session = self.session.as_mut().ok_or(QiblaError::NoSession)?;
        if session.sensor != SensorState::Active {
            return Err(QiblaError::SensorUnavailable(session.sensor));
        }
        let raw = sample.raw_heading_deg().ok_or(QiblaError::EmptySample)?;

        // Blend along the shortest rotation so a 359° -> 1° step does not
        // drag the needle the long way around.
        let diff = shortest_diff_deg(session.state.smoothed_deg, raw);
        session.state.raw_deg = raw;
        session.state.smoothed_deg =
            normalize_deg(session.state.smoothed_deg + SMOOTHING_GAIN * diff);
        session.samples += 1;

        Ok(heading_status(session))
    }

    pub fn status(&self) -> TrackerStatus {
        match &self.session {
            None => TrackerStatus {
                mode: TrackerMode::Idle,
                heading: None,
            },
            Some(session) => TrackerStatus {
                mode: TrackerMode::Tracking {
                    session: session.id,
                    started: session.started,
                    origin: session.origin,
                    bearing_deg: session.bearing_deg,
                    sensor: session.sensor,
                },
                heading: (session.sensor == SensorState::Active)
                    .then(|| heading_status(session)),
            },
        }
    }
}

fn heading_status(session: &Session) -> HeadingStatus {
    HeadingStatus {
        session: session.id,
        bearing_deg: session.bearing_deg,
        heading: session.state,
        aligned: is_aligned(session.bearing_deg, session.state.smoothed_deg),
        samples: session.samples,
    }
}

/// Within the 10°-wide cone centered on the bearing.
pub fn is_aligned(bearing_deg: f64, smoothed_heading_deg: f64) -> bool {
    let diff = normalize_deg(bearing_deg - smoothed_heading_deg);
    diff < ALIGNMENT_CONE_DEG || diff > 360.0 - ALIGNMENT_CONE_DEG
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qibla::bearing::KAABA;

    fn compass(deg: f64) -> OrientationSample {
        OrientationSample {
            compass_heading_deg: Some(deg),
            alpha_deg: None,
        }
    }

    fn started_tracker() -> HeadingTracker {
        let mut tracker = HeadingTracker::new();
        tracker.start(Coordinates::new(-6.2088, 106.8456), SensorState::Active);
        tracker
    }

    #[test]
    fn alpha_fallback_inverts_the_angle() {
        let sample = OrientationSample {
            compass_heading_deg: None,
            alpha_deg: Some(90.0),
        };
        assert_eq!(sample.raw_heading_deg(), Some(270.0));

        let empty = OrientationSample {
            compass_heading_deg: None,
            alpha_deg: None,
        };
        assert_eq!(empty.raw_heading_deg(), None);
    }

    #[test]
    fn each_sample_blends_exactly_one_tenth_of_the_difference() {
        let mut tracker = started_tracker();
        // From 0° toward 100°: one blend moves 10°, a second moves 9° more.
        // A duplicated sample would land at 19° after the first event.
        let status = tracker.apply(compass(100.0)).unwrap();
        assert!((status.heading.smoothed_deg - 10.0).abs() < 1e-9);
        let status = tracker.apply(compass(100.0)).unwrap();
        assert!((status.heading.smoothed_deg - 19.0).abs() < 1e-9);
    }

    #[test]
    fn smoothing_converges_toward_a_steady_heading() {
        let mut tracker = started_tracker();
        let mut last = 0.0;
        for _ in 0..100 {
            last = tracker.apply(compass(90.0)).unwrap().heading.smoothed_deg;
        }
        assert!((last - 90.0).abs() < 1.0, "smoothed {last}");
    }

    #[test]
    fn wrap_around_never_jumps_farther_than_the_raw_step() {
        let mut tracker = started_tracker();
        // Settle near 358° first.
        for _ in 0..200 {
            tracker.apply(compass(358.0)).unwrap();
        }
        let mut previous = tracker.status().heading.unwrap().heading.smoothed_deg;

        for raw in [358.0, 2.0, 6.0] {
            let status = tracker.apply(compass(raw)).unwrap();
            let step = shortest_diff_deg(previous, status.heading.smoothed_deg).abs();
            let raw_step = shortest_diff_deg(previous, raw).abs();
            assert!(step <= raw_step + 1e-9, "step {step} exceeds raw {raw_step}");
            assert!(step < 180.0);
            previous = status.heading.smoothed_deg;
        }
    }

    #[test]
    fn alignment_cone_is_ten_degrees_wide() {
        assert!(is_aligned(295.0, 295.0));
        assert!(is_aligned(295.0, 291.1));
        assert!(is_aligned(295.0, 298.9));
        assert!(!is_aligned(295.0, 90.0));
        assert!(!is_aligned(295.0, 300.1));
        // Cone crossing the wrap.
        assert!(is_aligned(2.0, 358.5));
    }

    #[test]
    fn denied_sensor_is_terminal() {
        let mut tracker = HeadingTracker::new();
        tracker.start(KAABA, SensorState::Denied);

        let err = tracker.apply(compass(10.0)).unwrap_err();
        assert!(matches!(err, QiblaError::SensorUnavailable(SensorState::Denied)));
        assert!(tracker.status().heading.is_none());
    }

    #[test]
    fn sampling_without_a_session_is_rejected() {
        let mut tracker = HeadingTracker::new();
        assert!(matches!(
            tracker.apply(compass(10.0)),
            Err(QiblaError::NoSession)
        ));
    }

    #[test]
    fn restart_resets_the_smoothing_memory() {
        let mut tracker = started_tracker();
        for _ in 0..50 {
            tracker.apply(compass(180.0)).unwrap();
        }
        let first = tracker.status().heading.unwrap().session;

        let status = tracker.start(Coordinates::new(51.5, -0.13), SensorState::Active);
        match status.mode {
            TrackerMode::Tracking { session, .. } => assert_ne!(session, first),
            TrackerMode::Idle => panic!("tracker should be running"),
        }
        let heading = tracker.status().heading.unwrap();
        assert_eq!(heading.heading.smoothed_deg, 0.0);
        assert_eq!(heading.samples, 0);
    }
}
