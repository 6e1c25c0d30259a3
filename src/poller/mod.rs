// src/poller/mod.rs

pub mod event;
pub mod sync_poller;

pub use event::EventSampler;
pub use sync_poller::{Readings, SyncPoller};

use crate::common::{error::ConfigError, timing};
use core::time::Duration;

/// Retry and cadence tuning for pull mode.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PollConfig {
    max_tries: u32,
    retry_wait: Duration,
    poll_interval: Duration,
}

impl PollConfig {
    /// `max_tries` must be at least 1. A zero `poll_interval` polls back to back.
    pub fn new(
        max_tries: u32,
        retry_wait: Duration,
        poll_interval: Duration,
    ) -> Result<Self, ConfigError> {
        if max_tries == 0 {
            return Err(ConfigError::InvalidMaxTries(max_tries));
        }
        Ok(PollConfig {
            max_tries,
            retry_wait,
            poll_interval,
        })
    }

    #[inline]
    pub fn max_tries(&self) -> u32 {
        self.max_tries
    }

    #[inline]
    pub fn retry_wait(&self) -> Duration {
        self.retry_wait
    }

    #[inline]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        PollConfig {
            max_tries: timing::DEFAULT_MAX_TRIES,
            retry_wait: timing::DEFAULT_RETRY_WAIT,
            poll_interval: timing::DEFAULT_POLL_INTERVAL,
        }
    }
}
