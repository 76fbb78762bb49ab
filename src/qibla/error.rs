use thiserror::Error;

use crate::qibla::tracker::SensorState;

#[derive(Debug, Error)]
pub enum QiblaError {
    #[error("no active qibla session")]
    NoSession,
    #[error("orientation sample carries no usable angle")]
    EmptySample,
    #[error("orientation sensor is {0} for this session")]
    SensorUnavailable(SensorState),
}
