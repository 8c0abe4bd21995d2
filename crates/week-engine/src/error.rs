//! Error types for week-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimeError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid week: {0}")]
    InvalidWeek(String),
}

pub type Result<T> = std::result::Result<T, TimeError>;
