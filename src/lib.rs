//! Pixel Lab Library
//!
//! An interactive image editor built around a small, pure transform core.
//! A single image is acquired from a file or a camera snapshot, one
//! per-pixel transform is applied, and the result is presented.
//!
//! # Architecture
//!
//! The system follows an explicit data flow:
//!
//! ```text
//! acquisition → PixelBuffer → transform → PixelBuffer → presentation
//!                      ↑                         ↑
//!                      └──────── shell ──────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Pure core**: transforms never mutate their input and hold no state
//! - **Validate upfront**: thresholds, thickness and channel selectors are
//!   typed values, so applying a transform cannot fail
//! - **One channel order**: pixels are BGR everywhere; conversion happens
//!   only at the acquisition boundary
//! - **Headless testing**: the shell runs over any `BufRead`/`Write` pair
//!
//! # Example
//!
//! ```no_run
//! use pixel_lab::{
//!     acquisition::{capture_frame, CaptureConfig, MockCamera},
//!     transform::{extract, threshold_mask, sharpen, ChannelSelector},
//! };
//!
//! let mut camera = MockCamera::new();
//! let image = capture_frame(&mut camera, &CaptureConfig::default()).unwrap();
//!
//! let red = extract(&image, ChannelSelector::Red);
//! let mask = threshold_mask(&image, ChannelSelector::Red, 150).unwrap();
//! let sharp = sharpen(&image);
//! assert_eq!(sharp.width(), image.width());
//! # let _ = (red, mask);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod acquisition;
pub mod buffer;
pub mod presentation;
pub mod shell;
pub mod transform;

// Re-export commonly used types at crate root
pub use acquisition::{load_image, save_image, AcquisitionError, Camera, CaptureConfig, MockCamera};
pub use buffer::{Pixel, PixelBuffer};
pub use presentation::{FilePresenter, Presenter};
pub use shell::Shell;
pub use transform::{ChannelSelector, LineSpec, Point, ThresholdValue, Transform, ValidationError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
