//! In-memory image representation shared by every transform.
//!
//! Pixels are stored as three 8-bit components in (blue, green, red)
//! order. The order is fixed once at the acquisition boundary and never
//! re-interpreted inside the transforms.

mod pixel_buffer;

pub use pixel_buffer::{BufferError, Pixel, PixelBuffer, BLUE, GREEN, RED};
