// src/poller/event.rs

use crate::common::{
    hal_traits::RangeInterface,
    units::{Reading, Record},
};
use crate::sensor::SensorLink;

/// Push-on-event sampler: one best-effort read per host event.
///
/// No retries and no sleeping; the host's own cadence governs timing, so a
/// failed read only leaves the range empty for that event.
pub struct EventSampler<IF>
where
    IF: RangeInterface,
{
    link: SensorLink<IF>,
}

impl<IF> EventSampler<IF>
where
    IF: RangeInterface,
{
    pub fn new(link: SensorLink<IF>) -> Self {
        tracing::info!(
            port = %link.settings().port,
            model = link.model().id,
            "range sampler configured"
        );
        EventSampler { link }
    }

    pub fn link(&self) -> &SensorLink<IF> {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut SensorLink<IF> {
        &mut self.link
    }

    /// Takes one reading. Errors are logged and reported as an absent range.
    pub fn sample(&mut self) -> Reading {
        let range_mm = match self.link.read_scoped() {
            Ok(range_mm) => range_mm,
            Err(e) => {
                tracing::error!("failed to get range reading: {}", e);
                None
            }
        };
        Reading {
            timestamp: self.link.timestamp(),
            range_mm,
        }
    }

    /// Handles a new host record (loop packet or archive record) by setting
    /// its `range` in the record's own unit system.
    pub fn augment(&mut self, record: &mut Record) {
        let reading = self.sample();
        record.set_range_mm(reading.range_mm);
    }
}
