// src/poller/sync_poller/attempt.rs

use super::{PollState, SyncPoller};
use crate::common::{error::RangeError, hal_traits::RangeInterface, units::Reading};

impl<IF> SyncPoller<IF>
where
    IF: RangeInterface,
{
    /// Runs scoped read attempts until one succeeds or the retry budget is spent.
    ///
    /// Every attempt gets a freshly opened link that is closed again before the
    /// next one, since a bad frame may mean a wedged serial line.
    pub(super) fn attempt_until_reading(&mut self) -> Result<Reading, RangeError<IF::Error>> {
        let max_tries = self.config.max_tries();

        loop {
            match self.link.read_scoped() {
                Ok(range_mm) => {
                    self.tries = 0;
                    self.state = PollState::Idle;
                    return Ok(Reading {
                        timestamp: self.link.timestamp(),
                        range_mm,
                    });
                }
                Err(e) if e.is_transient() => {
                    self.tries += 1;
                    tracing::error!(
                        "failed attempt {} of {} to get range reading: {}",
                        self.tries,
                        max_tries,
                        e
                    );

                    if self.tries >= max_tries {
                        self.state = PollState::Fatal;
                        tracing::error!("max retries ({}) exceeded for range reading", max_tries);
                        return Err(RangeError::RetriesExceeded { tries: self.tries });
                    }
                    self.link.delay(self.config.retry_wait());
                }
                // Not an I/O failure, a fresh link would not help
                Err(e) => return Err(e),
            }
        }
    }
}
