//! Menu text and choice parsing.

pub(super) const BANNER: &str = "=== IMAGE EDITOR ===";

pub(super) const MAIN_MENU: &str = "\
MAIN MENU:
1. Show a color channel
2. Highlight red areas
3. Sharpen
4. Draw a line
0. Exit";

pub(super) const SOURCE_MENU: &str = "\
1. Load image from file
2. Take a camera snapshot
0. Back";

pub(super) const CHANNEL_MENU: &str = "\
Available channels:
1 - Red (R)
2 - Green (G)
3 - Blue (B)";

/// Top-level action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Isolate one color channel.
    Channel,
    /// Threshold mask of one channel.
    Mask,
    /// Sharpen the image.
    Sharpen,
    /// Draw a line.
    Line,
    /// Leave the session.
    Exit,
}

impl MenuChoice {
    /// Maps a main-menu answer to a choice, `None` if unrecognised.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Channel),
            "2" => Some(Self::Mask),
            "3" => Some(Self::Sharpen),
            "4" => Some(Self::Line),
            "0" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Where the working image comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceChoice {
    /// Load from a file path.
    File,
    /// Take a camera snapshot.
    Camera,
    /// Return to the main menu.
    Back,
}

impl SourceChoice {
    /// Maps a source-menu answer to a choice, `None` if unrecognised.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::File),
            "2" => Some(Self::Camera),
            "0" => Some(Self::Back),
            _ => None,
        }
    }
}
