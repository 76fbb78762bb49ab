mod bearing;
mod error;
mod tracker;

pub use bearing::{qibla_bearing_deg, KAABA};
pub use error::QiblaError;
pub use tracker::{
    HeadingState, HeadingStatus, HeadingTracker, OrientationSample, SensorState, TrackerMode,
    TrackerStatus,
};
