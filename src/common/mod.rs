// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod model;
pub mod timing;
pub mod units;

#[cfg(test)]
pub(crate) mod mock;

// --- Re-export key types/traits/functions for easier access ---

// From error.rs
pub use error::{ConfigError, RangeError};

// From frame.rs
pub use frame::{decode_frame, FrameError, RawLine};

// From hal_traits.rs
pub use hal_traits::{Clock, PortOpener, RangeInstant, RangeInterface, SerialRead};

// From model.rs
pub use model::{lookup, models, LengthUnit, SensorModel, UnknownModel, DEFAULT_MODEL};

// From units.rs
pub use units::{Reading, Record, UnitSystem};

// From timing.rs (constants - users can access via common::timing::*)
