// src/common/error.rs

use super::frame::FrameError;
use super::model::UnknownModel;

#[derive(Debug, thiserror::Error)]
pub enum RangeError<E = ()>
where
    E: core::fmt::Debug, // Debug is all the backend error has to offer
{
    /// Model identifier is not in the model table. Configuration error, never retried.
    #[error(transparent)]
    UnknownModel(#[from] UnknownModel),

    /// The serial device could not be opened.
    #[error("serial link unavailable: {0:?}")]
    LinkUnavailable(E),

    /// The serial device failed while reading a frame.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// The received frame failed validation or parsing.
    #[error(transparent)]
    Protocol(#[from] FrameError),

    /// `read_once` was called without an open serial handle.
    #[error("serial link is not open")]
    NotOpen,

    /// Pull mode gave up after exhausting its retry budget.
    #[error("max retries ({tries}) exceeded for range reading")]
    RetriesExceeded { tries: u32 },
}

impl<E: core::fmt::Debug> RangeError<E> {
    /// Whether the polling loop may recover from this error with a fresh link.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RangeError::LinkUnavailable(_) | RangeError::Io(_) | RangeError::Protocol(_)
        )
    }
}

/// Invalid or unreadable configuration. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    UnknownModel(#[from] UnknownModel),

    #[error("max_tries must be at least 1, got {0}")]
    InvalidMaxTries(u32),

    #[error("{field} must be a non-negative number of seconds, got {value}")]
    InvalidDuration { field: &'static str, value: f64 },

    #[error("baudrate must be positive")]
    InvalidBaudRate,

    #[error("missing [{0}] section")]
    MissingSection(&'static str),

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}
