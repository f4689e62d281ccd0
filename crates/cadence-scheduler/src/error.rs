use thiserror::Error;

/// Errors that can occur within the scheduler.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    /// The start mask is not 12 ASCII characters.
    #[error("invalid start mask: expected 12 ASCII characters (YYMMDDHHmmss with '--' placeholders), got {len}")]
    MaskLength { len: usize },

    /// A start mask field is non-numeric or outside its domain.
    #[error("invalid {field} in start mask")]
    MaskField { field: &'static str },

    /// The periodic interval must be greater than zero seconds.
    #[error("invalid interval: must be greater than 0")]
    InvalidInterval,

    /// The schedule definition is out of range (hour, minute, max_day, workers).
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
