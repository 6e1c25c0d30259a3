// src/lib.rs

//! Driver for MaxBotix ultrasonic range finders with serial `R####` output.
//!
//! [`SensorLink`] reads and decodes one frame at a time. [`SyncPoller`] wraps it
//! with retries and a polling cadence (pull mode); [`EventSampler`] makes one
//! best-effort read per host event (push mode).

pub mod common;
pub mod config;
#[cfg(feature = "impl-native")]
pub mod native;
pub mod poller;
pub mod sensor;

// Re-export key types for convenience
pub use common::{RangeError, Reading, Record, SensorModel, UnitSystem};
pub use config::SensorConfig;
pub use poller::{EventSampler, PollConfig, SyncPoller};
pub use sensor::{LinkSettings, SensorLink};

#[cfg(feature = "impl-native")]
pub use native::NativeInterface;
