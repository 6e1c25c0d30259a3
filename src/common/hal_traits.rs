// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

use crate::sensor::LinkSettings;

/// Monotonic instant used for read deadlines.
pub trait RangeInstant:
    Copy + Ord + Add<Duration, Output = Self> + Sub<Self, Output = Duration>
{
}

impl<T> RangeInstant for T where
    T: Copy + Ord + Add<Duration, Output = T> + Sub<T, Output = Duration>
{
}

/// Abstraction for time: deadlines, waits and record timestamps.
pub trait Clock {
    type Instant: RangeInstant;

    /// Current monotonic instant.
    fn now(&self) -> Self::Instant;

    /// Block for at least `duration`.
    fn delay(&mut self, duration: Duration);

    /// Current wall-clock time as Unix seconds, rounded to the nearest second.
    fn unix_timestamp(&self) -> u64;
}

/// Receive side of an open serial handle.
///
/// The sensor free-runs, so the link only ever listens.
pub trait SerialRead {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Attempts to read a single byte from the serial interface.
    ///
    /// Returns `Ok(byte)` if a byte was read, or `Err(nb::Error::WouldBlock)`
    /// if no byte is available yet. Other errors are returned as `Err(nb::Error::Other(Self::Error))`.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;
}

/// Opens serial handles. Dropping the returned port closes it.
pub trait PortOpener {
    type Error: Debug;
    type Port: SerialRead<Error = Self::Error>;

    fn open(&mut self, settings: &LinkSettings) -> Result<Self::Port, Self::Error>;
}

/// Everything a `SensorLink` needs from its environment.
pub trait RangeInterface: PortOpener + Clock {}

impl<T: PortOpener + Clock> RangeInterface for T {}
