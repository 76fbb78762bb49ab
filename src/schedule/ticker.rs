use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration as TickDuration};

use crate::geo::Coordinates;
use crate::schedule::error::ScheduleError;
use crate::schedule::method::Method;
use crate::schedule::timetable::{civil_date_at, DaySet};
use crate::schedule::window::{compute_progress, compute_window, PrayerWindow, Progress};

const TICK: TickDuration = TickDuration::from_secs(1);

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub enum TickerMode {
    Idle,
    Running {
        start: DateTime<Utc>,
        coordinates: Coordinates,
        method: Method,
    },
}

/// Snapshot of the live countdown. `window`/`progress` are absent while the
/// provider is degraded (timetable unavailable for the current date).
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct TickerStatus {
    pub mode: TickerMode,
    pub window: Option<PrayerWindow>,
    pub progress: Option<Progress>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct Shared {
    status: TickerStatus,
}

#[derive(Debug)]
struct WorkerHandle {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

/// One-second recomputation loop behind the live dashboard. Owns its worker
/// task; dropping through `stop` releases the timer so nothing mutates the
/// shared status after teardown.
pub struct ScheduleTicker {
    shared: Arc<StdMutex<Shared>>,
    worker: Option<WorkerHandle>,
}

impl ScheduleTicker {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(StdMutex::new(Shared {
                status: TickerStatus {
                    mode: TickerMode::Idle,
                    window: None,
                    progress: None,
                    updated_at: None,
                },
            })),
            worker: None,
        }
    }

    pub fn status(&self) -> TickerStatus {
        self.shared.lock().unwrap().status.clone()
    }

    pub async fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(());
            let _ = worker.join.await;
        }
        let mut locked = self.shared.lock().unwrap();
        locked.status.mode = TickerMode::Idle;
        locked.status.window = None;
        locked.status.progress = None;
    }

    pub fn run(&mut self, coordinates: Coordinates, method: Method) -> Result<(), ScheduleError> {
        if self.worker.is_some() {
            return Err(ScheduleError::TickerRunning);
        }

        let shared = self.shared.clone();
        let (stop_tx, stop_rx) = oneshot::channel();

        {
            let mut locked = shared.lock().unwrap();
            locked.status.mode = TickerMode::Running {
                start: Utc::now(),
                coordinates,
                method,
            };
        }

        let join = tokio::spawn(run_ticker_loop(
            self.shared.clone(),
            coordinates,
            method,
            stop_rx,
        ));
        self.worker = Some(WorkerHandle { stop_tx, join });

        Ok(())
    }
}

impl Default for ScheduleTicker {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_ticker_loop(
    shared: Arc<StdMutex<Shared>>,
    coordinates: Coordinates,
    method: Method,
    mut stop_rx: oneshot::Receiver<()>,
) {
    // Timetables are cached per civil date; only the window/progress pair is
    // re-derived every tick.
    let mut days: Option<DaySet> = None;

    loop {
        let now = Utc::now();
        let today = civil_date_at(coordinates, now);

        if days.map(|d| d.today.date) != Some(today) {
            days = match DaySet::compute(coordinates, now, method) {
                Ok(set) => Some(set),
                Err(e) => {
                    log::warn!("timetable unavailable, reporting degraded status: {}", e);
                    None
                }
            };
        }

        let (window, progress) = match &days {
            Some(set) => {
                let window = compute_window(set, now);
                let progress = compute_progress(&window, now);
                (Some(window), Some(progress))
            }
            None => (None, None),
        };

        {
            let mut locked = shared.lock().unwrap();
            locked.status.window = window;
            locked.status.progress = progress;
            locked.status.updated_at = Some(now);
        }

        let should_stop = tokio::select! {
            _ = sleep(TICK) => false,
            _ = &mut stop_rx => true,
        };
        if should_stop {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_twice_is_rejected_until_stopped() {
        let mut ticker = ScheduleTicker::new();
        ticker.run(Coordinates::FALLBACK, Method::default()).unwrap();
        assert!(matches!(
            ticker.run(Coordinates::FALLBACK, Method::default()),
            Err(ScheduleError::TickerRunning)
        ));

        ticker.stop().await;
        assert!(matches!(ticker.status().mode, TickerMode::Idle));
        ticker.run(Coordinates::FALLBACK, Method::default()).unwrap();
        ticker.stop().await;
    }

    #[tokio::test]
    async fn stop_clears_the_published_window() {
        let mut ticker = ScheduleTicker::new();
        ticker.run(Coordinates::FALLBACK, Method::default()).unwrap();

        // The first tick publishes before the initial sleep.
        tokio::time::sleep(TickDuration::from_millis(200)).await;
        let status = ticker.status();
        assert!(matches!(status.mode, TickerMode::Running { .. }));
        assert!(status.window.is_some());
        assert!(status.progress.is_some());

        ticker.stop().await;
        let status = ticker.status();
        assert!(status.window.is_none());
        assert!(status.progress.is_none());
    }
}
