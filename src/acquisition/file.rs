//! Raster file load and save.

use super::AcquisitionError;
use crate::buffer::{BufferError, PixelBuffer};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reading or writing image files.
#[derive(Debug, Error)]
pub enum ImageFileError {
    /// No regular file at the path.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The file exists but is not a readable raster image.
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        /// File being read.
        path: PathBuf,
        /// Decoder failure.
        #[source]
        source: image::ImageError,
    },
    /// Writing the image failed.
    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        /// File being written.
        path: PathBuf,
        /// Encoder failure.
        #[source]
        source: image::ImageError,
    },
    /// Decoded dimensions do not form a valid buffer.
    #[error("decoded image has unusable layout: {0}")]
    Layout(#[from] BufferError),
}

/// Decodes a raster file into a BGR buffer.
pub fn load_image(path: impl AsRef<Path>) -> Result<PixelBuffer, AcquisitionError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ImageFileError::NotFound(path.to_path_buf()).into());
    }

    let rgb = image::open(path)
        .map_err(|source| ImageFileError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgb8();

    let (width, height) = rgb.dimensions();
    let buffer = PixelBuffer::from_rgb_bytes(width, height, rgb.as_raw())
        .map_err(ImageFileError::from)?;

    tracing::info!(path = %path.display(), width, height, "Image loaded");
    Ok(buffer)
}

/// Encodes a buffer to `path`; the format follows the file extension.
pub fn save_image(path: impl AsRef<Path>, buffer: &PixelBuffer) -> Result<(), ImageFileError> {
    let path = path.as_ref();
    image::save_buffer(
        path,
        &buffer.to_rgb_bytes(),
        buffer.width(),
        buffer.height(),
        image::ExtendedColorType::Rgb8,
    )
    .map_err(|source| ImageFileError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), "Image saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = load_image("/definitely/not/here.png").unwrap_err();
        assert!(matches!(
            err,
            AcquisitionError::File(ImageFileError::NotFound(_))
        ));
    }

    #[test]
    fn test_undecodable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(matches!(
            err,
            AcquisitionError::File(ImageFileError::Decode { .. })
        ));
    }

    #[test]
    fn test_save_then_load_preserves_bgr() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let buffer = PixelBuffer::new(2, 1, vec![[10, 20, 200], [0, 255, 0]]).unwrap();

        save_image(&path, &buffer).unwrap();
        let loaded = load_image(&path).unwrap();

        assert_eq!(loaded, buffer);
    }

    #[test]
    fn test_save_unknown_extension_fails() {
        let dir = tempfile::tempdir().unwrap();
        let buffer = PixelBuffer::filled(1, 1, [0; 3]).unwrap();

        let err = save_image(dir.path().join("out.nope"), &buffer).unwrap_err();
        assert!(matches!(err, ImageFileError::Encode { .. }));
    }
}
