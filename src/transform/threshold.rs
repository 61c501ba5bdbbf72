//! Binary masking of one channel against a threshold.

use super::{parse_integer, ChannelSelector, ValidationError};
use crate::buffer::PixelBuffer;
use std::str::FromStr;

/// A threshold in `[0, 255]`, validated at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ThresholdValue(u8);

impl ThresholdValue {
    /// Validates `value` into a threshold.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        u8::try_from(value)
            .map(Self)
            .map_err(|_| ValidationError::ThresholdOutOfRange(value))
    }

    /// Returns the threshold value.
    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl From<u8> for ThresholdValue {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl FromStr for ThresholdValue {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(parse_integer(s)?)
    }
}

/// Builds a black/white mask: 255 in all channels where the selected
/// channel is strictly greater than `threshold`, 0 elsewhere.
pub fn mask(
    buffer: &PixelBuffer,
    channel: ChannelSelector,
    threshold: ThresholdValue,
) -> PixelBuffer {
    let idx = channel.index();
    let t = threshold.get();
    buffer.map(|pixel| if pixel[idx] > t { [255; 3] } else { [0; 3] })
}

/// Validates a raw threshold and applies [`mask`].
pub fn threshold_mask(
    buffer: &PixelBuffer,
    channel: ChannelSelector,
    threshold: i64,
) -> Result<PixelBuffer, ValidationError> {
    let threshold = ThresholdValue::new(threshold)?;
    Ok(mask(buffer, channel, threshold))
}
