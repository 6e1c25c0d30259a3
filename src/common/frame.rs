// src/common/frame.rs

use super::model::SensorModel;
use arrayvec::ArrayVec;
use core::fmt;

/// First byte of every range frame.
pub const FRAME_MARKER: u8 = b'R';
/// Byte that ends every range frame.
pub const FRAME_TERMINATOR: u8 = b'\r';
/// Largest frame any known model sends (`R` + 4 digits + CR), with headroom.
pub const MAX_FRAME_LEN: usize = 8;

/// Copy of the bytes received for one frame, kept for diagnostics.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct RawLine(ArrayVec<u8, MAX_FRAME_LEN>);

impl RawLine {
    pub fn empty() -> Self {
        RawLine(ArrayVec::new())
    }

    /// Copies `bytes`, truncating anything beyond `MAX_FRAME_LEN`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let len = bytes.len().min(MAX_FRAME_LEN);
        let mut line = ArrayVec::new();
        // Cannot fail, length is clamped to capacity above
        let _ = line.try_extend_from_slice(&bytes[..len]);
        RawLine(line)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RawLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.escape_ascii())
    }
}

impl fmt::Debug for RawLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawLine(b\"{}\")", self.0.escape_ascii())
    }
}

/// A frame that failed validation. The protocol has no checksum and no way to
/// resynchronize, so either variant ends the read attempt.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum FrameError {
    /// Wrong length or missing `R` marker (includes an empty or partial read).
    #[error("unexpected line: '{0}'")]
    UnexpectedLine(RawLine),

    /// Correct shape, but the payload is not a decimal number.
    #[error("bogus value: '{0}'")]
    BogusValue(RawLine),
}

impl FrameError {
    pub fn raw_line(&self) -> &RawLine {
        match self {
            FrameError::UnexpectedLine(line) | FrameError::BogusValue(line) => line,
        }
    }
}

#[inline]
fn trim_terminator(line: &[u8]) -> &[u8] {
    match line.split_last() {
        Some((b'\r' | b'\n', rest)) => rest,
        _ => line,
    }
}

fn parse_digits(digits: &[u8]) -> Option<u32> {
    if digits.is_empty() {
        return None;
    }
    digits.iter().try_fold(0u32, |acc, &b| {
        if !b.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add(u32::from(b - b'0'))
    })
}

/// Decodes one frame received from `model`.
///
/// Returns the range in the model's native unit, or `None` when the sensor
/// reported its no-target value.
pub fn decode_frame(model: &SensorModel, bytes: &[u8]) -> Result<Option<u32>, FrameError> {
    let line = trim_terminator(bytes);

    if line.len() != model.frame_digits + 1 || line[0] != FRAME_MARKER {
        return Err(FrameError::UnexpectedLine(RawLine::from_bytes(line)));
    }

    let value =
        parse_digits(&line[1..]).ok_or_else(|| FrameError::BogusValue(RawLine::from_bytes(line)))?;

    if value == model.no_target_value {
        tracing::debug!(model = model.id, value, "no target detected");
        return Ok(None);
    }
    Ok(Some(value))
}
