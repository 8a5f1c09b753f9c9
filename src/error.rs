use chrono::NaiveDate;
use thiserror::Error;

pub type WorkloadResult<T> = Result<T, WorkloadError>;

#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error("invalid timeline window: start={start}, end={end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    #[error("invalid pixels-per-day scale: {0}")]
    InvalidScale(f64),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("provider failure: {0}")]
    Provider(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
