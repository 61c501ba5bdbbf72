//! Native window presentation on `eframe`/`egui`.

use super::Presenter;
use crate::buffer::PixelBuffer;
use eframe::egui;

/// Opens each displayed buffer in its own window and blocks until the
/// user closes it.
#[derive(Debug, Default)]
pub struct WindowPresenter {
    shown: usize,
}

impl WindowPresenter {
    /// Creates a presenter. No window is opened until the first display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of windows shown and closed so far.
    pub fn shown(&self) -> usize {
        self.shown
    }
}

impl Presenter for WindowPresenter {
    fn display(&mut self, title: &str, buffer: &PixelBuffer) {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(title)
                .with_inner_size(window_size(buffer)),
            ..Default::default()
        };
        let viewer = BufferViewer::new(to_color_image(buffer));

        tracing::info!(title, "Showing image, close the window to continue");
        match eframe::run_native(title, options, Box::new(move |_cc| Ok(Box::new(viewer)))) {
            Ok(()) => self.shown += 1,
            Err(e) => tracing::warn!(title, "Display failed: {}", e),
        }
    }
}

/// Holds the pending image until the first frame uploads it as a texture.
struct BufferViewer {
    pending: Option<egui::ColorImage>,
    texture: Option<egui::TextureHandle>,
}

impl BufferViewer {
    fn new(image: egui::ColorImage) -> Self {
        Self {
            pending: Some(image),
            texture: None,
        }
    }
}

impl eframe::App for BufferViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(image) = self.pending.take() {
            self.texture = Some(ctx.load_texture("buffer", image, egui::TextureOptions::NEAREST));
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                if let Some(texture) = &self.texture {
                    let sized = (texture.id(), texture.size_vec2());
                    ui.add(egui::Image::new(sized).shrink_to_fit());
                }
            });
    }
}

/// RGB texture data for a BGR buffer.
fn to_color_image(buffer: &PixelBuffer) -> egui::ColorImage {
    let size = [buffer.width() as usize, buffer.height() as usize];
    egui::ColorImage::from_rgb(size, &buffer.to_rgb_bytes())
}

/// Initial window size: the image at 1:1, capped to a typical screen.
fn window_size(buffer: &PixelBuffer) -> [f32; 2] {
    const MAX_SIDE: u32 = 1600;
    [
        buffer.width().min(MAX_SIDE) as f32,
        buffer.height().min(MAX_SIDE) as f32,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_image_is_rgb() {
        let buffer = PixelBuffer::new(2, 1, vec![[10, 20, 200], [0, 255, 0]]).unwrap();

        let image = to_color_image(&buffer);

        assert_eq!(image.size, [2, 1]);
        assert_eq!(image.pixels[0], egui::Color32::from_rgb(200, 20, 10));
        assert_eq!(image.pixels[1], egui::Color32::from_rgb(0, 255, 0));
    }

    #[test]
    fn test_window_size_is_capped() {
        let small = PixelBuffer::filled(320, 240, [0; 3]).unwrap();
        assert_eq!(window_size(&small), [320.0, 240.0]);

        let wide = PixelBuffer::filled(4000, 10, [0; 3]).unwrap();
        assert_eq!(window_size(&wide), [1600.0, 10.0]);
    }

    #[test]
    fn test_new_presenter_has_shown_nothing() {
        assert_eq!(WindowPresenter::new().shown(), 0);
    }
}
