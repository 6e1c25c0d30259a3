// src/common/mock.rs
//
// Scripted serial environment shared by the unit tests.

use super::hal_traits::{Clock, PortOpener, SerialRead};
use super::timing::BYTE_POLL_INTERVAL;
use crate::sensor::LinkSettings;
use core::time::Duration;
use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

pub const MOCK_EPOCH: u64 = 1_700_000_000;

// --- Mock Instant ---
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MockInstant(pub u64);
impl core::ops::Add<Duration> for MockInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
    }
}
impl core::ops::Sub<MockInstant> for MockInstant {
    type Output = Duration;
    fn sub(self, rhs: MockInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

// --- Mock Comm Error ---
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MockCommError {
    NoDevice,
    Disconnected,
}

/// What happens on one `open()`.
#[derive(Debug, Clone)]
pub enum Attempt {
    /// The device cannot be opened.
    OpenFails,
    /// The port opens and yields these bytes, then stays silent.
    Bytes(Vec<u8>),
    /// The port opens, yields these bytes, then reports a read error.
    BytesThenError(Vec<u8>),
}

pub struct MockPort {
    queue: VecDeque<u8>,
    fail_when_drained: bool,
    closes: Rc<Cell<usize>>,
}

impl SerialRead for MockPort {
    type Error = MockCommError;
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        match self.queue.pop_front() {
            Some(byte) => Ok(byte),
            None if self.fail_when_drained => Err(nb::Error::Other(MockCommError::Disconnected)),
            None => Err(nb::Error::WouldBlock),
        }
    }
}

impl Drop for MockPort {
    fn drop(&mut self) {
        self.closes.set(self.closes.get() + 1);
    }
}

// --- Mock Interface ---
pub struct MockInterface {
    pub script: VecDeque<Attempt>,
    pub opens: usize,
    pub closes: Rc<Cell<usize>>,
    pub current_time_us: u64,
    pub delays: Vec<Duration>,
    pub last_settings: Option<LinkSettings>,
}

impl MockInterface {
    pub fn new() -> Self {
        MockInterface {
            script: VecDeque::new(),
            opens: 0,
            closes: Rc::new(Cell::new(0)),
            current_time_us: 0,
            delays: Vec::new(),
            last_settings: None,
        }
    }

    pub fn with_script(script: impl IntoIterator<Item = Attempt>) -> Self {
        let mut mock = Self::new();
        mock.script.extend(script);
        mock
    }

    pub fn push(&mut self, attempt: Attempt) {
        self.script.push_back(attempt);
    }

    pub fn frame(bytes: &[u8]) -> Attempt {
        Attempt::Bytes(bytes.to_vec())
    }

    pub fn closes(&self) -> usize {
        self.closes.get()
    }

    /// Delays other than byte polling: retry waits and poll intervals.
    pub fn waits(&self) -> Vec<Duration> {
        self.delays
            .iter()
            .copied()
            .filter(|d| *d != BYTE_POLL_INTERVAL)
            .collect()
    }
}

impl Clock for MockInterface {
    type Instant = MockInstant;
    fn now(&self) -> MockInstant {
        MockInstant(self.current_time_us)
    }
    fn delay(&mut self, duration: Duration) {
        self.delays.push(duration);
        self.current_time_us = self.current_time_us.saturating_add(duration.as_micros() as u64);
    }
    fn unix_timestamp(&self) -> u64 {
        MOCK_EPOCH + (self.current_time_us + 500_000) / 1_000_000
    }
}

impl PortOpener for MockInterface {
    type Error = MockCommError;
    type Port = MockPort;

    fn open(&mut self, settings: &LinkSettings) -> Result<MockPort, MockCommError> {
        self.opens += 1;
        self.last_settings = Some(settings.clone());
        let (bytes, fail_when_drained) = match self.script.pop_front() {
            None | Some(Attempt::OpenFails) => return Err(MockCommError::NoDevice),
            Some(Attempt::Bytes(bytes)) => (bytes, false),
            Some(Attempt::BytesThenError(bytes)) => (bytes, true),
        };
        Ok(MockPort {
            queue: bytes.into(),
            fail_when_drained,
            closes: Rc::clone(&self.closes),
        })
    }
}
