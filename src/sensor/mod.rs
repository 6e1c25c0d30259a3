// src/sensor/mod.rs

mod io_helpers;

use crate::common::{
    error::RangeError,
    frame::{decode_frame, MAX_FRAME_LEN},
    hal_traits::{Clock, PortOpener, RangeInterface},
    model::{self, SensorModel},
    timing,
};
use core::ops::{Deref, DerefMut};
use core::time::Duration;

/// Serial device used when configuration does not name one.
#[cfg(windows)]
pub const DEFAULT_PORT: &str = "COM1";
#[cfg(not(windows))]
pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";

/// Transport parameters for one serial device.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LinkSettings {
    pub port: String,
    pub baud_rate: u32,
    /// Upper bound on reading one frame.
    pub read_timeout: Duration,
}

impl LinkSettings {
    pub fn new(port: impl Into<String>) -> Self {
        LinkSettings {
            port: port.into(),
            ..Self::default()
        }
    }
}

impl Default for LinkSettings {
    fn default() -> Self {
        LinkSettings {
            port: DEFAULT_PORT.into(),
            baud_rate: timing::DEFAULT_BAUD_RATE,
            read_timeout: timing::DEFAULT_READ_TIMEOUT,
        }
    }
}

/// Connection to one range finder on its own serial device.
///
/// The handle is meant to be held only for a single read: acquire it with
/// [`SensorLink::session`] (or use [`SensorLink::read_scoped`]) so it is
/// released on every exit path.
pub struct SensorLink<IF>
where
    IF: RangeInterface,
{
    model: &'static SensorModel,
    settings: LinkSettings,
    interface: IF,
    port: Option<IF::Port>,
}

impl<IF> SensorLink<IF>
where
    IF: RangeInterface,
{
    /// Creates a closed link for the model named `model_id`.
    pub fn new(
        model_id: &str,
        settings: LinkSettings,
        interface: IF,
    ) -> Result<Self, RangeError<IF::Error>> {
        let model = model::lookup(model_id)?;
        Ok(Self::with_model(model, settings, interface))
    }

    pub fn with_model(model: &'static SensorModel, settings: LinkSettings, interface: IF) -> Self {
        SensorLink {
            model,
            settings,
            interface,
            port: None,
        }
    }

    pub fn model(&self) -> &'static SensorModel {
        self.model
    }

    pub fn settings(&self) -> &LinkSettings {
        &self.settings
    }

    pub fn interface(&self) -> &IF {
        &self.interface
    }

    pub fn interface_mut(&mut self) -> &mut IF {
        &mut self.interface
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.port.is_some()
    }

    /// Opens the serial device. An already open handle is released first.
    pub fn open(&mut self) -> Result<(), RangeError<IF::Error>> {
        self.close();
        let port = self
            .interface
            .open(&self.settings)
            .map_err(RangeError::LinkUnavailable)?;
        tracing::trace!(port = %self.settings.port, baud = self.settings.baud_rate, "serial link opened");
        self.port = Some(port);
        Ok(())
    }

    /// Releases the serial device. Safe to call when never opened or already closed.
    pub fn close(&mut self) {
        if self.port.take().is_some() {
            tracing::trace!(port = %self.settings.port, "serial link closed");
        }
    }

    /// Reads and decodes exactly one frame.
    ///
    /// Returns the range in millimeters, or `None` when the sensor reported
    /// no target. A malformed frame is never re-read here; recovering from it
    /// takes a fresh link.
    pub fn read_once(&mut self) -> Result<Option<f64>, RangeError<IF::Error>> {
        let mut buffer = [0u8; MAX_FRAME_LEN];
        let frame_len = self.model.frame_len().min(MAX_FRAME_LEN);
        let bytes_read = self.read_frame_bytes(&mut buffer[..frame_len])?;

        let native = decode_frame(self.model, &buffer[..bytes_read])?;
        Ok(native.map(|value| self.model.to_millimeters(value)))
    }

    /// Opens the link and returns a guard that closes it when dropped.
    pub fn session(&mut self) -> Result<LinkSession<'_, IF>, RangeError<IF::Error>> {
        self.open()?;
        Ok(LinkSession { link: self })
    }

    /// One complete attempt: open, read one frame, close.
    pub fn read_scoped(&mut self) -> Result<Option<f64>, RangeError<IF::Error>> {
        let mut session = self.session()?;
        session.read_once()
    }

    /// Current Unix time from the link's clock.
    pub(crate) fn timestamp(&self) -> u64 {
        self.interface.unix_timestamp()
    }

    pub(crate) fn delay(&mut self, duration: Duration) {
        self.interface.delay(duration);
    }
}

/// An open [`SensorLink`]; the serial handle is released when this is dropped.
pub struct LinkSession<'a, IF>
where
    IF: RangeInterface,
{
    link: &'a mut SensorLink<IF>,
}

impl<IF: RangeInterface> Deref for LinkSession<'_, IF> {
    type Target = SensorLink<IF>;
    fn deref(&self) -> &Self::Target {
        &*self.link
    }
}

impl<IF: RangeInterface> DerefMut for LinkSession<'_, IF> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.link
    }
}

impl<IF: RangeInterface> Drop for LinkSession<'_, IF> {
    fn drop(&mut self) {
        self.link.close();
    }
}
