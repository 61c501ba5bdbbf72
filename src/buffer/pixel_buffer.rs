//! Dense row-major grid of BGR pixels.

use thiserror::Error;

/// A single pixel: `[blue, green, red]`.
pub type Pixel = [u8; 3];

/// Component index of the blue channel.
pub const BLUE: usize = 0;
/// Component index of the green channel.
pub const GREEN: usize = 1;
/// Component index of the red channel.
pub const RED: usize = 2;

/// Errors raised when constructing a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Zero width or height, or a pixel count overflowing `usize`.
    #[error("invalid buffer dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// Pixel data does not match `width * height`.
    #[error("pixel data length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Length implied by the dimensions.
        expected: usize,
        /// Length supplied.
        actual: usize,
    },
}

/// An image of `width * height` BGR pixels in row-major order.
///
/// Buffers are never aliased: transforms read one buffer and return a
/// freshly allocated one of identical dimensions.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// Creates a buffer from row-major pixels.
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, BufferError> {
        let expected = Self::checked_len(width, height)?;
        if pixels.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a buffer where every pixel is `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Result<Self, BufferError> {
        let len = Self::checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![pixel; len],
        })
    }

    /// Creates a buffer from interleaved bytes already in BGR order.
    pub fn from_bgr_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, BufferError> {
        Self::from_interleaved(width, height, bytes, |c| [c[0], c[1], c[2]])
    }

    /// Creates a buffer from interleaved RGB bytes, swapping to BGR.
    pub fn from_rgb_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, BufferError> {
        Self::from_interleaved(width, height, bytes, |c| [c[2], c[1], c[0]])
    }

    fn from_interleaved(
        width: u32,
        height: u32,
        bytes: &[u8],
        to_pixel: impl Fn(&[u8]) -> Pixel,
    ) -> Result<Self, BufferError> {
        let expected = Self::checked_len(width, height)?;
        if bytes.len() != expected * 3 {
            return Err(BufferError::LengthMismatch {
                expected: expected * 3,
                actual: bytes.len(),
            });
        }
        let pixels = bytes.chunks_exact(3).map(to_pixel).collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    fn checked_len(width: u32, height: u32) -> Result<usize, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::InvalidDimensions { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|len| len.checked_mul(3).map(|_| len))
            .ok_or(BufferError::InvalidDimensions { width, height })
    }

    /// Returns the buffer width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the buffer height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Returns the total number of pixels (width * height).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the buffer.
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Flattens to interleaved RGB bytes for encoders that expect RGB.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&[b, g, r]| [r, g, b])
            .collect()
    }

    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Builds a new buffer of the same dimensions by mapping every pixel.
    pub(crate) fn map(&self, f: impl Fn(Pixel) -> Pixel) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&p| f(p)).collect(),
        }
    }

    /// Builds a new buffer of the same dimensions from a per-coordinate function.
    pub(crate) fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> Pixel) -> Self {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Overwrites one pixel. Only used on buffers the caller owns exclusively.
    #[inline]
    pub(crate) fn put(&mut self, x: u32, y: u32, pixel: Pixel) {
        let idx = self.index(x, y);
        self.pixels[idx] = pixel;
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels", &self.pixels.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_creation() {
        let buffer = PixelBuffer::filled(640, 480, [1, 2, 3]).unwrap();

        assert_eq!(buffer.width(), 640);
        assert_eq!(buffer.height(), 480);
        assert_eq!(buffer.pixel_count(), 640 * 480);
        assert_eq!(buffer.get(639, 479), Some([1, 2, 3]));
        assert_eq!(buffer.get(640, 0), None);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            PixelBuffer::filled(0, 4, [0; 3]),
            Err(BufferError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
        assert!(PixelBuffer::new(4, 0, Vec::new()).is_err());
    }

    #[test]
    fn test_length_mismatch() {
        let err = PixelBuffer::new(2, 2, vec![[0; 3]; 3]).unwrap_err();
        assert_eq!(
            err,
            BufferError::LengthMismatch {
                expected: 4,
                actual: 3
            }
        );

        let err = PixelBuffer::from_bgr_bytes(2, 1, &[0; 5]).unwrap_err();
        assert!(matches!(err, BufferError::LengthMismatch { expected: 6, .. }));
    }

    #[test]
    fn test_rgb_conversion_swaps_order() {
        let buffer = PixelBuffer::from_rgb_bytes(2, 1, &[10, 20, 30, 40, 50, 60]).unwrap();

        assert_eq!(buffer.pixels(), &[[30, 20, 10], [60, 50, 40]]);
        assert_eq!(buffer.to_rgb_bytes(), vec![10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn test_row_major_layout() {
        let buffer = PixelBuffer::from_fn(3, 2, |x, y| [x as u8, y as u8, 0]);

        assert_eq!(buffer.pixels()[4], [1, 1, 0]);
        assert_eq!(buffer.get(2, 0), Some([2, 0, 0]));
    }
}
