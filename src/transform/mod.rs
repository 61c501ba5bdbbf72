//! Pure per-pixel image transforms.
//!
//! Every transform reads one [`PixelBuffer`] and returns a new buffer of
//! identical dimensions. Parameters are validated into typed values before
//! any pixel work begins, so the transforms themselves cannot fail.
//!
//! ```text
//! PixelBuffer → { channel | threshold | sharpen | annotate } → PixelBuffer
//! ```

mod annotate;
mod channel;
mod sharpen;
mod threshold;

pub use annotate::{draw_line, LineSpec, Point, Thickness, LINE_COLOR};
pub use channel::{extract, ChannelSelector};
pub use sharpen::{convolve, sharpen, sharpen_with_border, BorderMode, Kernel3, SHARPEN_KERNEL};
pub use threshold::{mask, threshold_mask, ThresholdValue};

use crate::buffer::PixelBuffer;
use thiserror::Error;

/// A parameter outside its declared domain.
///
/// Raised before any pixel is touched; callers are expected to re-prompt
/// rather than retry internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Text naming none of the three channels.
    #[error("unknown channel selector {0:?} (expected 1-3 or r/g/b)")]
    InvalidSelector(String),
    /// Threshold outside `[0, 255]`.
    #[error("threshold {0} out of range (must be 0-255)")]
    ThresholdOutOfRange(i64),
    /// Thickness outside `[1, 10]`.
    #[error("line thickness {0} out of range (must be 1-10)")]
    InvalidThickness(i64),
    /// Text that does not parse as an integer.
    #[error("expected an integer, got {0:?}")]
    NotAnInteger(String),
}

/// Parses trimmed text as an integer, mapping failures to [`ValidationError`].
pub(crate) fn parse_integer<T: std::str::FromStr>(input: &str) -> Result<T, ValidationError> {
    let trimmed = input.trim();
    trimmed
        .parse()
        .map_err(|_| ValidationError::NotAnInteger(trimmed.to_string()))
}

/// A fully parameterised transform, ready to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    /// Keep one channel, zero the others.
    Channel(ChannelSelector),
    /// Binary mask of `channel > threshold`.
    Mask {
        /// Channel compared against the threshold.
        channel: ChannelSelector,
        /// Values strictly above this become white.
        threshold: ThresholdValue,
    },
    /// 3x3 sharpening convolution.
    Sharpen(BorderMode),
    /// Green line annotation.
    Line(LineSpec),
}

impl Transform {
    /// Applies the transform, returning a new buffer.
    pub fn apply(&self, buffer: &PixelBuffer) -> PixelBuffer {
        tracing::debug!(
            transform = ?self,
            width = buffer.width(),
            height = buffer.height(),
            "Applying transform"
        );
        match self {
            Transform::Channel(selector) => extract(buffer, *selector),
            Transform::Mask { channel, threshold } => mask(buffer, *channel, *threshold),
            Transform::Sharpen(border) => sharpen_with_border(buffer, *border),
            Transform::Line(spec) => draw_line(buffer, spec),
        }
    }

    /// Window title used when presenting the result.
    pub fn title(&self) -> &'static str {
        match self {
            Transform::Channel(_) => "Color channel",
            Transform::Mask { .. } => "Threshold mask",
            Transform::Sharpen(_) => "Sharpened image",
            Transform::Line(_) => "Image with line",
        }
    }
}
