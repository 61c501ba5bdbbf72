//! Image acquisition from files and cameras.
//!
//! This module is the only place where external raster layouts are
//! converted into a [`PixelBuffer`](crate::buffer::PixelBuffer). Files are
//! decoded with the `image` crate, cameras go through the [`Camera`] trait.
//! Both deliver RGB and are swapped to BGR here, once.

mod camera;
mod config;
mod file;

pub use camera::{capture_frame, Camera, CameraError, MockCamera};
#[cfg(feature = "camera")]
pub use camera::DeviceCamera;
pub use config::{CaptureConfig, ConfigError, FileConfig, OutputConfig, SharpenConfig};
pub use file::{load_image, save_image, ImageFileError};

use thiserror::Error;

/// Failure to obtain an image from any source.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    /// Reading or decoding an image file failed.
    #[error(transparent)]
    File(#[from] ImageFileError),
    /// The camera could not deliver a frame.
    #[error(transparent)]
    Camera(#[from] CameraError),
}
