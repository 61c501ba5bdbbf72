//! 3x3 convolution with saturating output.
//!
//! The convolution reads each output pixel's 3x3 neighbourhood per channel,
//! accumulates in `i32` and clamps to `[0, 255]`. Neighbours outside the
//! buffer are resolved through a [`BorderMode`]. Buffers narrower or shorter
//! than the kernel have no interior and are returned as an unchanged copy.

use crate::buffer::PixelBuffer;
use serde::{Deserialize, Serialize};

/// A 3x3 integer convolution kernel, indexed `[row][column]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel3 {
    weights: [[i32; 3]; 3],
}

impl Kernel3 {
    /// Creates a kernel from row-major weights.
    pub const fn new(weights: [[i32; 3]; 3]) -> Self {
        Self { weights }
    }

    /// Sum of all weights. A sum of 1 preserves uniform regions.
    pub fn sum(&self) -> i32 {
        self.weights.iter().flatten().sum()
    }
}

/// Sharpening kernel: centre 9, all eight neighbours -1.
pub const SHARPEN_KERNEL: Kernel3 = Kernel3::new([[-1, -1, -1], [-1, 9, -1], [-1, -1, -1]]);

/// How reads past the buffer edge are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderMode {
    /// Repeat the nearest edge pixel: `aaa|abcd|ddd`.
    #[default]
    Replicate,
    /// Mirror without repeating the edge pixel: `dcb|abcd|cba`.
    Reflect101,
}

impl BorderMode {
    /// Maps a possibly out-of-range coordinate into `[0, len)`.
    ///
    /// Only ever called with offsets of at most one pixel past the edge
    /// and `len >= 3`.
    #[inline]
    fn resolve(self, coord: i64, len: u32) -> u32 {
        let last = i64::from(len) - 1;
        let resolved = match self {
            BorderMode::Replicate => coord.clamp(0, last),
            BorderMode::Reflect101 => {
                if coord < 0 {
                    -coord
                } else if coord > last {
                    2 * last - coord
                } else {
                    coord
                }
            }
        };
        resolved as u32
    }
}

/// Convolves every channel of `buffer` with `kernel`.
pub fn convolve(buffer: &PixelBuffer, kernel: &Kernel3, border: BorderMode) -> PixelBuffer {
    let (width, height) = (buffer.width(), buffer.height());
    if width < 3 || height < 3 {
        tracing::debug!(width, height, "Buffer smaller than kernel, returning copy");
        return buffer.clone();
    }

    let pixels = buffer.pixels();
    PixelBuffer::from_fn(width, height, |x, y| {
        let mut acc = [0i32; 3];
        for (ky, row) in kernel.weights.iter().enumerate() {
            let sy = border.resolve(i64::from(y) + ky as i64 - 1, height);
            for (kx, &weight) in row.iter().enumerate() {
                let sx = border.resolve(i64::from(x) + kx as i64 - 1, width);
                let src = pixels[buffer.index(sx, sy)];
                for (sum, &value) in acc.iter_mut().zip(src.iter()) {
                    *sum += weight * i32::from(value);
                }
            }
        }
        acc.map(|v| v.clamp(0, 255) as u8)
    })
}

/// Sharpens with [`SHARPEN_KERNEL`] and edge replication.
pub fn sharpen(buffer: &PixelBuffer) -> PixelBuffer {
    convolve(buffer, &SHARPEN_KERNEL, BorderMode::Replicate)
}

/// Sharpens with [`SHARPEN_KERNEL`] and an explicit border policy.
pub fn sharpen_with_border(buffer: &PixelBuffer, border: BorderMode) -> PixelBuffer {
    convolve(buffer, &SHARPEN_KERNEL, border)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_sums_to_one() {
        assert_eq!(SHARPEN_KERNEL.sum(), 1);
    }

    #[test]
    fn test_uniform_buffer_unchanged() {
        let buffer = PixelBuffer::filled(5, 4, [17, 128, 250]).unwrap();

        assert_eq!(sharpen(&buffer), buffer);
        assert_eq!(sharpen_with_border(&buffer, BorderMode::Reflect101), buffer);
    }

    #[test]
    fn test_clamps_both_directions() {
        // Bright centre on dark ground saturates high, dark centre on bright
        // ground saturates low.
        let mut bright = PixelBuffer::filled(3, 3, [0; 3]).unwrap();
        bright.put(1, 1, [200, 200, 200]);
        let out = sharpen(&bright);
        assert_eq!(out.get(1, 1), Some([255; 3]));
        assert_eq!(out.get(0, 0), Some([0; 3]));

        let mut dark = PixelBuffer::filled(3, 3, [255; 3]).unwrap();
        dark.put(1, 1, [0, 0, 0]);
        let out = sharpen(&dark);
        assert_eq!(out.get(1, 1), Some([0; 3]));
    }

    #[test]
    fn test_interior_value() {
        // Centre 100, neighbours 90: 9*100 - 8*90 = 180
        let mut buffer = PixelBuffer::filled(3, 3, [90; 3]).unwrap();
        buffer.put(1, 1, [100; 3]);
        assert_eq!(sharpen(&buffer).get(1, 1), Some([180; 3]));
    }

    #[test]
    fn test_replicate_border() {
        // Single column ramp: 10, 20, 30 down the left edge of a 3x3 of 0s
        let mut buffer = PixelBuffer::filled(3, 3, [0; 3]).unwrap();
        buffer.put(0, 0, [10; 3]);
        buffer.put(0, 1, [20; 3]);
        buffer.put(0, 2, [30; 3]);

        // (0,0) neighbourhood with replication:
        // rows y=-1,0,1 -> 0,0,1 ; cols x=-1,0,1 -> 0,0,1
        // samples: 10 10 0 / 10 10 0 / 20 20 0
        // 9*10 - (10+10+0+10+0+20+20+0) = 90 - 70 = 20
        assert_eq!(sharpen(&buffer).get(0, 0), Some([20; 3]));
    }

    #[test]
    fn test_reflect101_border() {
        let mut buffer = PixelBuffer::filled(3, 3, [0; 3]).unwrap();
        buffer.put(1, 0, [50; 3]);

        // (0,0) with reflect101: x=-1 -> 1, y=-1 -> 1
        // samples: (1,1)=0 (0,1)=0 (1,1)=0 / (1,0)=50 (0,0)=0 (1,0)=50 / 0 0 0
        // -100 clamps to 0; (1,0) sees itself at centre: 9*50 = 450 -> 255
        let out = sharpen_with_border(&buffer, BorderMode::Reflect101);
        assert_eq!(out.get(0, 0), Some([0; 3]));
        assert_eq!(out.get(1, 0), Some([255; 3]));
    }

    #[test]
    fn test_small_buffer_is_copy() {
        let buffer = PixelBuffer::new(2, 5, (0..10).map(|i| [i * 20; 3]).collect()).unwrap();
        assert_eq!(sharpen(&buffer), buffer);

        let single = PixelBuffer::filled(1, 1, [9, 8, 7]).unwrap();
        assert_eq!(sharpen_with_border(&single, BorderMode::Reflect101), single);
    }

    #[test]
    fn test_border_mode_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            border: BorderMode,
        }
        let parsed: Wrapper = toml::from_str("border = \"reflect101\"").unwrap();
        assert_eq!(parsed.border, BorderMode::Reflect101);
    }
}
