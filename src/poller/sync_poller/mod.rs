// src/poller/sync_poller/mod.rs

mod attempt;

use super::PollConfig;
use crate::common::{error::RangeError, hal_traits::RangeInterface, units::Reading};
use crate::sensor::SensorLink;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum PollState {
    /// Next call starts an attempt immediately.
    AttemptRead,
    /// A reading was emitted; the next call waits out the poll interval first.
    Idle,
    /// Retry budget exhausted. Terminal until `restart`.
    Fatal,
}

/// Pull-mode poller: each request runs the attempt/retry cycle until it
/// produces a reading or runs out of tries.
pub struct SyncPoller<IF>
where
    IF: RangeInterface,
{
    link: SensorLink<IF>,
    config: PollConfig,
    tries: u32,
    state: PollState,
}

impl<IF> SyncPoller<IF>
where
    IF: RangeInterface,
{
    pub fn new(link: SensorLink<IF>, config: PollConfig) -> Self {
        tracing::info!(
            port = %link.settings().port,
            model = link.model().id,
            max_tries = config.max_tries(),
            retry_wait = ?config.retry_wait(),
            poll_interval = ?config.poll_interval(),
            "range poller configured"
        );
        SyncPoller {
            link,
            config,
            tries: 0,
            state: PollState::AttemptRead,
        }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    pub fn link(&self) -> &SensorLink<IF> {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut SensorLink<IF> {
        &mut self.link
    }

    pub fn into_link(self) -> SensorLink<IF> {
        self.link
    }

    /// Failed attempts since the last successful reading.
    pub fn tries(&self) -> u32 {
        self.tries
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == PollState::Fatal
    }

    /// Blocks until the next reading, retrying transient failures.
    ///
    /// Once the retry budget is spent this returns `RetriesExceeded` on every
    /// call until [`SyncPoller::restart`].
    pub fn next_reading(&mut self) -> Result<Reading, RangeError<IF::Error>> {
        match self.state {
            PollState::Fatal => return Err(RangeError::RetriesExceeded { tries: self.tries }),
            PollState::Idle => {
                let interval = self.config.poll_interval();
                if !interval.is_zero() {
                    self.link.delay(interval);
                }
                self.state = PollState::AttemptRead;
            }
            PollState::AttemptRead => {}
        }
        self.attempt_until_reading()
    }

    /// Lazy stream of readings. Yields the terminal error once, then ends.
    pub fn readings(&mut self) -> Readings<'_, IF> {
        Readings {
            poller: self,
            done: false,
        }
    }

    /// Starts over with a fresh retry budget and no pending poll wait.
    pub fn restart(&mut self) {
        self.tries = 0;
        self.state = PollState::AttemptRead;
        self.link.close();
    }
}

/// Iterator returned by [`SyncPoller::readings`].
pub struct Readings<'a, IF>
where
    IF: RangeInterface,
{
    poller: &'a mut SyncPoller<IF>,
    done: bool,
}

impl<IF> Iterator for Readings<'_, IF>
where
    IF: RangeInterface,
{
    type Item = Result<Reading, RangeError<IF::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.poller.next_reading();
        self.done = result.is_err();
        Some(result)
    }
}
