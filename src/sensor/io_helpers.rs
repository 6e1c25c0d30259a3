// src/sensor/io_helpers.rs

use super::SensorLink;
use crate::common::{
    error::RangeError,
    hal_traits::{Clock, RangeInterface, SerialRead},
    timing,
};

impl<IF> SensorLink<IF>
where
    IF: RangeInterface,
{
    /// Polls the open port until `buffer` is full or the read timeout elapses.
    ///
    /// Returns how many bytes arrived. A short count is not an error here; the
    /// frame decoder rejects it with the partial line attached.
    pub(super) fn read_frame_bytes(
        &mut self,
        buffer: &mut [u8],
    ) -> Result<usize, RangeError<IF::Error>> {
        let SensorLink {
            interface,
            port,
            settings,
            ..
        } = self;
        let port = port.as_mut().ok_or(RangeError::<IF::Error>::NotOpen)?;
        let deadline = interface.now() + settings.read_timeout;

        let mut bytes_read = 0;
        while bytes_read < buffer.len() {
            match port.read_byte() {
                Ok(byte) => {
                    buffer[bytes_read] = byte;
                    bytes_read += 1;
                }
                Err(nb::Error::WouldBlock) => {
                    if interface.now() >= deadline {
                        tracing::trace!(bytes_read, "read timeout");
                        break;
                    }
                    interface.delay(timing::BYTE_POLL_INTERVAL);
                }
                Err(nb::Error::Other(e)) => return Err(RangeError::Io(e)),
            }
        }
        Ok(bytes_read)
    }
}

// --- Unit Tests for IO Helpers ---
#[cfg(test)]
mod tests {
    use crate::common::mock::{Attempt, MockInterface};
    use crate::common::RangeError;
    use crate::sensor::{LinkSettings, SensorLink};
    use core::time::Duration;

    fn open_link(attempt: Attempt, read_timeout: Duration) -> SensorLink<MockInterface> {
        let settings = LinkSettings {
            read_timeout,
            ..LinkSettings::default()
        };
        let mut link = SensorLink::new("MB7363", settings, MockInterface::with_script([attempt])).unwrap();
        link.open().unwrap();
        link
    }

    #[test]
    fn test_read_fills_buffer_without_waiting() {
        let mut link = open_link(Attempt::Bytes(b"R2257\r".to_vec()), Duration::from_secs(1));
        let mut buffer = [0u8; 6];
        assert_eq!(link.read_frame_bytes(&mut buffer).unwrap(), 6);
        assert_eq!(&buffer, b"R2257\r");
        assert!(link.interface().delays.is_empty());
    }

    #[test]
    fn test_read_stops_at_buffer_len() {
        let mut link = open_link(Attempt::Bytes(b"R2257\rR1".to_vec()), Duration::from_secs(1));
        let mut buffer = [0u8; 3];
        assert_eq!(link.read_frame_bytes(&mut buffer).unwrap(), 3);
        assert_eq!(&buffer, b"R22");
    }

    #[test]
    fn test_read_timeout_returns_partial_count() {
        let mut link = open_link(Attempt::Bytes(b"R2".to_vec()), Duration::from_millis(100));
        let mut buffer = [0u8; 6];
        assert_eq!(link.read_frame_bytes(&mut buffer).unwrap(), 2);
        assert_eq!(link.interface().current_time_us, 100_000);
    }

    #[test]
    fn test_zero_timeout_takes_only_buffered_bytes() {
        let mut link = open_link(Attempt::Bytes(b"R22".to_vec()), Duration::ZERO);
        let mut buffer = [0u8; 6];
        assert_eq!(link.read_frame_bytes(&mut buffer).unwrap(), 3);
        assert!(link.interface().delays.is_empty());
    }

    #[test]
    fn test_read_requires_open_port() {
        let mut link = open_link(Attempt::Bytes(Vec::new()), Duration::from_secs(1));
        link.close();
        let mut buffer = [0u8; 6];
        assert!(matches!(link.read_frame_bytes(&mut buffer), Err(RangeError::NotOpen)));
    }
}
