// src/native.rs
//
// Host serial ports through the `serialport` crate.

use crate::common::hal_traits::{Clock, PortOpener, SerialRead};
use crate::sensor::LinkSettings;
use core::time::Duration;
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::io::{self, Read};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// How long a single byte read may block inside the OS driver. The link's
/// own deadline bounds the whole frame.
const PORT_READ_SLICE: Duration = Duration::from_millis(10);

/// Interface backed by the operating system's serial ports and clocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeInterface;

impl NativeInterface {
    pub fn new() -> Self {
        NativeInterface
    }
}

/// An open OS serial port. Dropping it closes the device.
pub struct NativePort(Box<dyn SerialPort>);

impl SerialRead for NativePort {
    type Error = serialport::Error;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        let mut byte = [0u8; 1];
        match self.0.read(&mut byte) {
            Ok(1) => Ok(byte[0]),
            Ok(_) => Err(nb::Error::WouldBlock),
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                ) =>
            {
                Err(nb::Error::WouldBlock)
            }
            Err(e) => Err(nb::Error::Other(e.into())),
        }
    }
}

impl PortOpener for NativeInterface {
    type Error = serialport::Error;
    type Port = NativePort;

    fn open(&mut self, settings: &LinkSettings) -> Result<NativePort, serialport::Error> {
        // 8-N-1, no handshaking
        let port = serialport::new(settings.port.as_str(), settings.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(PORT_READ_SLICE)
            .open()?;
        Ok(NativePort(port))
    }
}

impl Clock for NativeInterface {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn unix_timestamp(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|since| (since + Duration::from_millis(500)).as_secs())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_device_fails() {
        let mut iface = NativeInterface::new();
        let settings = LinkSettings::new("/dev/maxbotix-does-not-exist");
        assert!(iface.open(&settings).is_err());
    }

    #[test]
    fn test_unix_timestamp_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(NativeInterface::new().unix_timestamp() > 1_577_836_800);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut iface = NativeInterface::new();
        let start = iface.now();
        iface.delay(Duration::from_millis(5));
        assert!(iface.now() - start >= Duration::from_millis(5));
    }
}
