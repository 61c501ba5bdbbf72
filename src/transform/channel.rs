//! Color channel isolation.

use super::{parse_integer, ValidationError};
use crate::buffer::{PixelBuffer, BLUE, GREEN, RED};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelSelector {
    /// Red, stored last in BGR order.
    Red,
    /// Green.
    Green,
    /// Blue, stored first in BGR order.
    Blue,
}

impl ChannelSelector {
    /// All selectors, in menu order.
    pub const ALL: [ChannelSelector; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Component index inside a BGR [`Pixel`](crate::buffer::Pixel).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::Red => RED,
            Self::Green => GREEN,
            Self::Blue => BLUE,
        }
    }
}

impl fmt::Display for ChannelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        };
        f.write_str(name)
    }
}

impl TryFrom<i64> for ChannelSelector {
    type Error = ValidationError;

    /// Menu numbering: 1 red, 2 green, 3 blue.
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Red),
            2 => Ok(Self::Green),
            3 => Ok(Self::Blue),
            other => Err(ValidationError::InvalidSelector(other.to_string())),
        }
    }
}

impl FromStr for ChannelSelector {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "r" | "red" => Ok(Self::Red),
            "g" | "green" => Ok(Self::Green),
            "b" | "blue" => Ok(Self::Blue),
            _ => parse_integer::<i64>(s)
                .map_err(|_| ValidationError::InvalidSelector(s.to_string()))
                .and_then(Self::try_from),
        }
    }
}

/// Keeps the selected channel and zeroes the other two.
pub fn extract(buffer: &PixelBuffer, selector: ChannelSelector) -> PixelBuffer {
    let keep = selector.index();
    buffer.map(|pixel| {
        let mut out = [0u8; 3];
        out[keep] = pixel[keep];
        out
    })
}
