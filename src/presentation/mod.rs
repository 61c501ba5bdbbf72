//! Displaying buffers to the user.
//!
//! Presentation is best effort: a failure to show an image is logged and
//! never interrupts the editing session. With the `window` feature each
//! buffer opens in a native window; [`FilePresenter`] is the fallback.

#[cfg(feature = "window")]
mod window;

#[cfg(feature = "window")]
pub use window::WindowPresenter;

use crate::acquisition::save_image;
use crate::buffer::PixelBuffer;
use std::path::PathBuf;

/// Something that can show a buffer under a title.
pub trait Presenter {
    /// Shows `buffer`. Failures are reported through logging only.
    fn display(&mut self, title: &str, buffer: &PixelBuffer);
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn display(&mut self, title: &str, buffer: &PixelBuffer) {
        (**self).display(title, buffer);
    }
}

/// Writes every displayed buffer to a timestamped PNG.
#[derive(Debug)]
pub struct FilePresenter {
    directory: PathBuf,
    written: Vec<PathBuf>,
}

impl FilePresenter {
    /// Creates a presenter writing into `directory`, created on first use.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            written: Vec::new(),
        }
    }

    /// Files written so far, oldest first.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn file_name(&self, title: &str) -> String {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
        format!("{}-{:03}-{}.png", stamp, self.written.len(), slug(title))
    }
}

impl Presenter for FilePresenter {
    fn display(&mut self, title: &str, buffer: &PixelBuffer) {
        if let Err(e) = std::fs::create_dir_all(&self.directory) {
            tracing::warn!(
                directory = %self.directory.display(),
                "Cannot create output directory: {}",
                e
            );
            return;
        }

        let path = self.directory.join(self.file_name(title));
        match save_image(&path, buffer) {
            Ok(()) => {
                tracing::info!(title, path = %path.display(), "Image displayed");
                self.written.push(path);
            }
            Err(e) => tracing::warn!(title, "Display failed: {}", e),
        }
    }
}

/// Lowercase ASCII slug: runs of non-alphanumerics become one `-`.
fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "image".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::load_image;

    #[test]
    fn test_slug() {
        assert_eq!(slug("Original image"), "original-image");
        assert_eq!(slug("  Image -- with LINE! "), "image-with-line");
        assert_eq!(slug("***"), "image");
    }

    #[test]
    fn test_display_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let mut presenter = FilePresenter::new(dir.path().join("shown"));
        let buffer = PixelBuffer::filled(3, 2, [5, 6, 7]).unwrap();

        presenter.display("Color channel", &buffer);
        presenter.display("Color channel", &buffer);

        assert_eq!(presenter.written().len(), 2);
        assert_ne!(presenter.written()[0], presenter.written()[1]);
        let first = &presenter.written()[0];
        assert!(first.to_string_lossy().ends_with("color-channel.png"));
        assert_eq!(load_image(first).unwrap(), buffer);
    }

    #[test]
    fn test_display_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        // Directory path runs through a regular file
        let mut presenter = FilePresenter::new(blocker.join("sub"));
        presenter.display("Original image", &PixelBuffer::filled(1, 1, [0; 3]).unwrap());

        assert!(presenter.written().is_empty());
    }

    #[test]
    fn test_boxed_presenter_forwards() {
        let dir = tempfile::tempdir().unwrap();
        let mut presenter: Box<dyn Presenter> = Box::new(FilePresenter::new(dir.path()));

        presenter.display("Sharpened image", &PixelBuffer::filled(2, 2, [1, 2, 3]).unwrap());

        let shown: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(shown.len(), 1);
    }
}
