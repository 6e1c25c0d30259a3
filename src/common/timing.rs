// src/common/timing.rs

use core::time::Duration;

// === Serial Link (datasheet: 9600-8-N-1) ===

/// Baud rate of the RS232/TTL output.
pub const DEFAULT_BAUD_RATE: u32 = 9600;
/// Upper bound on one frame read, from opening the read to the last byte.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);
/// Pause between polls of a port that has no byte available yet.
pub const BYTE_POLL_INTERVAL: Duration = Duration::from_millis(2);

// === Pull Mode ===

/// Failed attempts allowed before pull mode gives up.
pub const DEFAULT_MAX_TRIES: u32 = 5;
/// Wait after a failed attempt before opening a fresh link.
pub const DEFAULT_RETRY_WAIT: Duration = Duration::from_secs(10);
/// Wait after an emitted reading before the next attempt.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
