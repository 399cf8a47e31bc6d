//! Error types for quorum-engine operations.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuorumError {
    #[error("Invalid quorum {quorum}: must be between 2 and the roster size ({participants})")]
    InvalidQuorum { quorum: usize, participants: usize },

    #[error("Invalid required duration: {minutes} minutes")]
    InvalidDuration { minutes: i64 },

    #[error("Required duration of {required} minutes exceeds the {span} minute slot span")]
    DurationExceedsSpan { required: i64, span: i64 },

    #[error("Malformed slot for participant '{participant}': start {start} is not before end {end}")]
    MalformedSlot {
        participant: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Slot names participant '{0}' who is not on the event roster")]
    UnknownParticipant(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid date range: {from} is not before {until}")]
    InvalidDateRange { from: NaiveDate, until: NaiveDate },
}

pub type Result<T> = std::result::Result<T, QuorumError>;
