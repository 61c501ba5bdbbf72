//! Camera abstraction for snapshot capture.
//!
//! This module provides a trait-based abstraction over camera hardware,
//! allowing for both real camera input and mock implementations for testing.

use super::{AcquisitionError, CaptureConfig};
use crate::buffer::PixelBuffer;
use thiserror::Error;

/// Errors that can occur during camera operations.
#[derive(Debug, Error)]
pub enum CameraError {
    #[error("camera device not found: {0}")]
    DeviceNotFound(String),
    #[error("failed to open camera: {0}")]
    OpenFailed(String),
    #[error("failed to configure camera: {0}")]
    ConfigFailed(String),
    #[error("failed to capture frame: {0}")]
    CaptureFailed(String),
    #[error("camera not initialized")]
    NotInitialized,
}

/// Trait for camera implementations.
///
/// This abstraction allows swapping between real camera hardware
/// and mock implementations for testing.
pub trait Camera {
    /// Opens and initializes the camera with the given configuration.
    fn open(&mut self, config: &CaptureConfig) -> Result<(), CameraError>;

    /// Captures a single frame as a BGR buffer.
    fn capture(&mut self) -> Result<PixelBuffer, CameraError>;

    /// Checks if the camera is currently open.
    fn is_open(&self) -> bool;

    /// Closes the camera and releases resources.
    fn close(&mut self);
}

/// Opens the camera, discards warm-up frames, captures one frame and closes.
///
/// The camera is closed on every path, including failures.
pub fn capture_frame(
    camera: &mut dyn Camera,
    config: &CaptureConfig,
) -> Result<PixelBuffer, AcquisitionError> {
    camera.open(config)?;
    let result = grab(camera, config.warmup_frames);
    camera.close();

    let frame = result?;
    tracing::info!(
        device = config.device_id,
        width = frame.width(),
        height = frame.height(),
        "Snapshot captured"
    );
    Ok(frame)
}

fn grab(camera: &mut dyn Camera, warmup_frames: u32) -> Result<PixelBuffer, CameraError> {
    // Auto-exposure settles over the first few frames
    for _ in 0..warmup_frames {
        camera.capture()?;
    }
    camera.capture()
}

/// Mock camera that generates deterministic synthetic BGR frames.
///
/// Blue ramps left to right, green ramps top to bottom and red shifts
/// with the frame sequence, so consecutive snapshots differ.
#[derive(Debug, Default)]
pub struct MockCamera {
    config: Option<CaptureConfig>,
    sequence: u64,
}

impl MockCamera {
    /// Creates a closed mock camera.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames captured since the last open.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl Camera for MockCamera {
    fn open(&mut self, config: &CaptureConfig) -> Result<(), CameraError> {
        config
            .validate()
            .map_err(|e| CameraError::ConfigFailed(e.to_string()))?;
        self.config = Some(config.clone());
        self.sequence = 0;
        tracing::info!("MockCamera opened with config: {:?}", config);
        Ok(())
    }

    fn capture(&mut self) -> Result<PixelBuffer, CameraError> {
        let config = self.config.as_ref().ok_or(CameraError::NotInitialized)?;
        let (width, height) = (config.width, config.height);
        let shift = self.sequence;

        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| {
                let blue = (u64::from(x) * 255 / u64::from(width.max(2) - 1)) as u8;
                let green = (u64::from(y) * 255 / u64::from(height.max(2) - 1)) as u8;
                let red = ((u64::from(x) + u64::from(y) + shift) % 256) as u8;
                [blue, green, red]
            })
            .collect();

        self.sequence += 1;
        PixelBuffer::new(width, height, pixels)
            .map_err(|e| CameraError::CaptureFailed(e.to_string()))
    }

    fn is_open(&self) -> bool {
        self.config.is_some()
    }

    fn close(&mut self) {
        self.config = None;
        tracing::info!("MockCamera closed");
    }
}

#[cfg(feature = "camera")]
mod device {
    use super::{Camera, CameraError};
    use crate::acquisition::CaptureConfig;
    use crate::buffer::PixelBuffer;
    use nokhwa::pixel_format::RgbFormat;
    use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};

    /// Physical camera backed by `nokhwa`.
    #[derive(Default)]
    pub struct DeviceCamera {
        inner: Option<nokhwa::Camera>,
    }

    impl DeviceCamera {
        /// Creates a handle; the device is opened by [`Camera::open`].
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl Camera for DeviceCamera {
        fn open(&mut self, config: &CaptureConfig) -> Result<(), CameraError> {
            config
                .validate()
                .map_err(|e| CameraError::ConfigFailed(e.to_string()))?;

            let requested =
                RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
            let mut camera = nokhwa::Camera::new(CameraIndex::Index(config.device_id), requested)
                .map_err(|e| CameraError::DeviceNotFound(e.to_string()))?;
            camera
                .open_stream()
                .map_err(|e| CameraError::OpenFailed(e.to_string()))?;

            tracing::info!(device = config.device_id, "Camera stream opened");
            self.inner = Some(camera);
            Ok(())
        }

        fn capture(&mut self) -> Result<PixelBuffer, CameraError> {
            let camera = self.inner.as_mut().ok_or(CameraError::NotInitialized)?;
            let frame = camera
                .frame()
                .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;
            let rgb = frame
                .decode_image::<RgbFormat>()
                .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;

            let (width, height) = (rgb.width(), rgb.height());
            PixelBuffer::from_rgb_bytes(width, height, rgb.as_raw())
                .map_err(|e| CameraError::CaptureFailed(e.to_string()))
        }

        fn is_open(&self) -> bool {
            self.inner.is_some()
        }

        fn close(&mut self) {
            if let Some(mut camera) = self.inner.take() {
                if let Err(e) = camera.stop_stream() {
                    tracing::warn!("Failed to stop camera stream: {}", e);
                }
                tracing::info!("Camera closed");
            }
        }
    }
}

#[cfg(feature = "camera")]
pub use device::DeviceCamera;

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> CaptureConfig {
        CaptureConfig::with_dimensions(8, 6)
    }

    #[test]
    fn test_mock_camera_lifecycle() {
        let mut camera = MockCamera::new();

        assert!(!camera.is_open());

        camera.open(&small_config()).unwrap();
        assert!(camera.is_open());

        let frame = camera.capture().unwrap();
        assert_eq!((frame.width(), frame.height()), (8, 6));
        assert_eq!(camera.sequence(), 1);

        let frame2 = camera.capture().unwrap();
        assert_ne!(frame, frame2);

        camera.close();
        assert!(!camera.is_open());
    }

    #[test]
    fn test_capture_without_open() {
        let mut camera = MockCamera::new();
        assert!(matches!(
            camera.capture(),
            Err(CameraError::NotInitialized)
        ));
    }

    #[test]
    fn test_capture_frame_skips_warmup_and_closes() {
        let mut camera = MockCamera::new();
        let mut config = small_config();
        config.warmup_frames = 3;

        let frame = capture_frame(&mut camera, &config).unwrap();

        assert!(!camera.is_open());
        // Fourth frame: red at (0,0) equals the sequence shift
        assert_eq!(frame.get(0, 0), Some([0, 0, 3]));
    }

    #[test]
    fn test_capture_frame_invalid_config() {
        let mut camera = MockCamera::new();
        let config = CaptureConfig::with_dimensions(0, 10);

        let err = capture_frame(&mut camera, &config).unwrap_err();
        assert!(matches!(
            err,
            AcquisitionError::Camera(CameraError::ConfigFailed(_))
        ));
    }
}
