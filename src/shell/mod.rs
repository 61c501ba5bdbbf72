//! Interactive menu loop.
//!
//! The shell owns all user interaction: it reads choices and parameters,
//! acquires an image, runs one transform and hands both images to a
//! [`Presenter`]. Invalid parameters are re-prompted with the validation
//! error; a blank answer cancels back to the main menu and end of input
//! ends the session.

mod menu;

pub use menu::{MenuChoice, SourceChoice};

use crate::acquisition::{
    capture_frame, load_image, AcquisitionError, Camera, CaptureConfig, ImageFileError,
};
use crate::buffer::PixelBuffer;
use crate::presentation::Presenter;
use crate::transform::{
    parse_integer, BorderMode, ChannelSelector, LineSpec, Point, ThresholdValue, Thickness,
    Transform, ValidationError,
};
use menu::{BANNER, CHANNEL_MENU, MAIN_MENU, SOURCE_MENU};
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Menu-driven editing session over arbitrary text streams.
pub struct Shell<R, W, P> {
    input: R,
    output: W,
    presenter: P,
    camera: Box<dyn Camera>,
    capture: CaptureConfig,
    border: BorderMode,
    shutdown: Arc<AtomicBool>,
}

impl<R: BufRead, W: Write, P: Presenter> Shell<R, W, P> {
    /// Creates a session reading choices from `input` and writing prompts to
    /// `output`, with default capture settings and border policy.
    pub fn new(input: R, output: W, presenter: P, camera: Box<dyn Camera>) -> Self {
        Self {
            input,
            output,
            presenter,
            camera,
            capture: CaptureConfig::default(),
            border: BorderMode::default(),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Sets the camera configuration used for snapshots.
    pub fn with_capture_config(mut self, config: CaptureConfig) -> Self {
        self.capture = config;
        self
    }

    /// Sets the border policy used by the sharpen action.
    pub fn with_border(mut self, border: BorderMode) -> Self {
        self.border = border;
        self
    }

    /// Shares a flag that ends the session at the next prompt once set.
    pub fn with_shutdown(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown = flag;
        self
    }

    /// The presenter receiving displayed images.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Consumes the shell, returning the output stream and presenter.
    pub fn into_inner(self) -> (W, P) {
        (self.output, self.presenter)
    }

    /// Runs the main menu until exit, end of input or shutdown.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "{BANNER}")?;

        loop {
            writeln!(self.output, "\n{MAIN_MENU}")?;
            let Some(line) = self.ask("Choose an action: ")? else {
                break;
            };

            let choice = match MenuChoice::parse(&line) {
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "Shutting down...")?;
                    break;
                }
                Some(choice) => choice,
                None => {
                    writeln!(self.output, "Invalid choice!")?;
                    continue;
                }
            };

            let Some(image) = self.select_image()? else {
                continue;
            };
            self.presenter.display("Original image", &image);

            let Some(transform) = self.configure(choice)? else {
                continue;
            };
            let result = transform.apply(&image);
            tracing::info!(operation = transform.title(), "Transform applied");
            self.presenter.display(transform.title(), &result);
        }

        tracing::info!("Session ended");
        Ok(())
    }

    fn select_image(&mut self) -> io::Result<Option<PixelBuffer>> {
        loop {
            writeln!(self.output, "\n{SOURCE_MENU}")?;
            let Some(line) = self.ask("Choose a source: ")? else {
                return Ok(None);
            };

            match SourceChoice::parse(&line) {
                Some(SourceChoice::Back) => return Ok(None),
                Some(SourceChoice::File) => {
                    let Some(path) = self.ask("Path to image: ")? else {
                        return Ok(None);
                    };
                    match load_image(path.trim()) {
                        Ok(image) => {
                            writeln!(
                                self.output,
                                "Loaded {}x{} pixels",
                                image.width(),
                                image.height()
                            )?;
                            return Ok(Some(image));
                        }
                        Err(AcquisitionError::File(ImageFileError::NotFound(_))) => {
                            writeln!(self.output, "File not found!")?;
                        }
                        Err(e) => {
                            tracing::warn!("Load failed: {}", e);
                            writeln!(self.output, "Invalid image file: {e}")?;
                        }
                    }
                }
                Some(SourceChoice::Camera) => {
                    let Some(answer) =
                        self.ask("Press Enter to take a snapshot, or q to cancel: ")?
                    else {
                        return Ok(None);
                    };
                    if answer.trim().eq_ignore_ascii_case("q") {
                        continue;
                    }
                    match capture_frame(self.camera.as_mut(), &self.capture) {
                        Ok(image) => return Ok(Some(image)),
                        Err(e) => {
                            tracing::warn!("Snapshot failed: {}", e);
                            writeln!(self.output, "Camera unavailable: {e}")?;
                            writeln!(self.output, "Check the camera connection and permissions.")?;
                        }
                    }
                }
                None => writeln!(self.output, "Invalid choice!")?,
            }
        }
    }

    fn configure(&mut self, choice: MenuChoice) -> io::Result<Option<Transform>> {
        let transform = match choice {
            MenuChoice::Channel => {
                writeln!(self.output, "\n{CHANNEL_MENU}")?;
                self.ask_with("Choose a channel (1-3): ", |s| s.parse::<ChannelSelector>())?
                    .map(Transform::Channel)
            }
            MenuChoice::Mask => self
                .ask_with("Red threshold (0-255): ", |s| s.parse::<ThresholdValue>())?
                .map(|threshold| Transform::Mask {
                    channel: ChannelSelector::Red,
                    threshold,
                }),
            MenuChoice::Sharpen => Some(Transform::Sharpen(self.border)),
            MenuChoice::Line => self.ask_line()?.map(Transform::Line),
            MenuChoice::Exit => None,
        };
        Ok(transform)
    }

    fn ask_line(&mut self) -> io::Result<Option<LineSpec>> {
        writeln!(self.output, "\nEnter line coordinates:")?;
        let coordinate = |s: &str| parse_integer::<i32>(s);

        let Some(x1) = self.ask_with("Start X: ", coordinate)? else {
            return Ok(None);
        };
        let Some(y1) = self.ask_with("Start Y: ", coordinate)? else {
            return Ok(None);
        };
        let Some(x2) = self.ask_with("End X: ", coordinate)? else {
            return Ok(None);
        };
        let Some(y2) = self.ask_with("End Y: ", coordinate)? else {
            return Ok(None);
        };
        let Some(thickness) =
            self.ask_with("Line thickness (1-10): ", |s| s.parse::<Thickness>())?
        else {
            return Ok(None);
        };

        Ok(Some(LineSpec {
            start: Point::new(x1, y1),
            end: Point::new(x2, y2),
            thickness,
        }))
    }

    /// Prompts until `parse` accepts the answer. Blank input cancels.
    fn ask_with<T>(
        &mut self,
        message: &str,
        parse: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(line) = self.ask(message)? else {
                return Ok(None);
            };
            if line.trim().is_empty() {
                writeln!(self.output, "Cancelled.")?;
                return Ok(None);
            }
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    tracing::debug!(error = %e, "Input rejected");
                    writeln!(self.output, "Error: {e}")?;
                }
            }
        }
    }

    /// Writes `message` and reads one line. `None` on end of input or shutdown.
    fn ask(&mut self, message: &str) -> io::Result<Option<String>> {
        if self.shutdown.load(Ordering::SeqCst) {
            return Ok(None);
        }
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 || self.shutdown.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }
}
