//! # `tof_usecase` Error module
//!
//! Provides abstractions over errors which can occur during this crate's use.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::path::PathBuf;

use serde_any;
use thiserror;

use crate::stream::StreamId;

// -----------------------------------------------------------------------------------------------
// ENUMERATIONS
// -----------------------------------------------------------------------------------------------

/// Result type used by faillible functions inside the `tof_usecase` crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors which can occur during use of the `tof_usecase` crate.
///
/// All of these are deterministic, pure-data validity issues. Structural problems are reported as
/// [`Error::InvalidUseCase`] when a definition is validated, before any hardware programming could
/// take place; the remaining variants cover bad lookups and policy violations such as an exposure
/// time outside its group's limits.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Cannot find file at {0:?}")]
    FileNotFound(PathBuf),

    #[error("Error deserialising data: {0}")]
    DeserialisationError(serde_any::Error),

    #[error("Invalid use case: {0}")]
    InvalidUseCase(String),

    #[error("No stream with id {0:#x}")]
    UnknownStream(StreamId),

    #[error("A stream with id {0:#x} already exists")]
    DuplicateStream(StreamId),

    #[error("No stream ids left to allocate")]
    StreamIdsExhausted,

    #[error("Stream {stream:#x} has no frame group with index {group}")]
    UnknownFrameGroup { stream: StreamId, group: usize },

    #[error("No raw frame set with index {0}")]
    UnknownRawFrameSet(usize),

    #[error("No exposure group named {0:?}")]
    UnknownExposureGroup(String),

    #[error("An exposure group named {0:?} already exists")]
    DuplicateExposureGroup(String),

    #[error("Exposure time {time} us is outside the limits {limits:?} of group {group:?}")]
    ExposureOutOfLimits {
        group: String,
        time: u32,
        limits: (u32, u32),
    },

    #[error("Expected {expected} exposure times, one per exposure group, but got {actual}")]
    ExposureTimesMismatch { expected: usize, actual: usize },

    #[error("Stream {0:#x} has no modulated raw frame sets to derive exposure limits from")]
    NoExposureLimits(StreamId),

    #[error("Target rate {rate} Hz is outside the allowed range {min}..={max} Hz")]
    TargetRateOutOfRange { rate: u16, min: u16, max: u16 },

    #[error("Duty cycle {0}% is not a supported illumination setting")]
    UnsupportedDutyCycle(f64),
}
