use eframe::egui;
use egui::{Color32, ColorImage, Pos2, Rect, Sense, TextureHandle, TextureOptions, Vec2};
use image::RgbImage;

use crate::viewport::{DisplaySurface, SliderSpec};

/// Input reported by [`EguiSurface::show`] for the host to dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceEvent {
    BandChanged(usize),
    /// Pointer moved over the image (`Some`) or left it (`None`).
    PointerMoved(Option<(i32, i32)>),
    PointerClicked((i32, i32)),
}

/// egui-backed window content: a band slider above the composite image.
pub struct EguiSurface {
    title: String,
    slider: SliderSpec,
    pending: Option<ColorImage>,
    texture: Option<TextureHandle>,
    frame_size: [usize; 2],
    last_hover: Option<(i32, i32)>,
}

impl Default for EguiSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl EguiSurface {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            slider: SliderSpec { max: 0, value: 0 },
            pending: None,
            texture: None,
            frame_size: [0, 0],
            last_hover: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Draw the slider and the latest frame; return the interactions seen
    /// this pass.
    pub fn show(&mut self, ui: &mut egui::Ui) -> Vec<SurfaceEvent> {
        let mut events = Vec::new();
        self.upload(ui.ctx());

        let mut value = self.slider.value;
        let slider_response = ui.add(
            egui::Slider::new(&mut value, 0..=self.slider.max)
                .text("band")
                .clamp_to_range(true),
        );
        if slider_response.changed() && value != self.slider.value {
            self.slider.value = value;
            events.push(SurfaceEvent::BandChanged(value));
        }

        let Some(tex) = &self.texture else {
            return events;
        };

        let size = Vec2::new(self.frame_size[0] as f32, self.frame_size[1] as f32);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());
        ui.painter().image(
            tex.id(),
            rect,
            Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );

        let hover = response.hover_pos().map(|p| to_pixel(p, rect));
        if hover != self.last_hover {
            self.last_hover = hover;
            events.push(SurfaceEvent::PointerMoved(hover));
        }
        if response.clicked()
            && let Some(p) = response.interact_pointer_pos()
        {
            events.push(SurfaceEvent::PointerClicked(to_pixel(p, rect)));
        }

        events
    }

    /// Push a pending frame to the GPU, reusing the texture handle when one exists.
    fn upload(&mut self, ctx: &egui::Context) {
        let Some(image) = self.pending.take() else { return };
        self.frame_size = image.size;
        match &mut self.texture {
            Some(tex) => tex.set(image, TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture("spectralview_canvas", image, TextureOptions::NEAREST));
            }
        }
    }
}

impl DisplaySurface for EguiSurface {
    fn open(&mut self, title: &str, slider: SliderSpec) {
        self.title = title.to_string();
        self.slider = slider;
    }

    fn present(&mut self, frame: RgbImage, band: usize) {
        self.pending = Some(rgb_image_to_color_image(&frame));
        self.slider.value = band;
    }
}

/// Screen position → integer canvas pixel (image is drawn 1 point per pixel).
fn to_pixel(pos: Pos2, rect: Rect) -> (i32, i32) {
    (
        (pos.x - rect.min.x).floor() as i32,
        (pos.y - rect.min.y).floor() as i32,
    )
}

pub fn rgb_image_to_color_image(img: &RgbImage) -> ColorImage {
    ColorImage::from_rgb([img.width() as usize, img.height() as usize], img.as_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn present_queues_frame_and_tracks_band() {
        let mut surface = EguiSurface::new();
        surface.open("view", SliderSpec { max: 9, value: 3 });
        surface.present(RgbImage::from_pixel(4, 2, Rgb([1, 2, 3])), 7);
        assert_eq!(surface.slider.value, 7);
        let pending = surface.pending.as_ref().unwrap();
        assert_eq!(pending.size, [4, 2]);
        assert_eq!(pending.pixels[0], Color32::from_rgb(1, 2, 3));
    }

    #[test]
    fn pointer_positions_floor_to_pixels() {
        let rect = Rect::from_min_max(Pos2::new(10.0, 20.0), Pos2::new(50.0, 60.0));
        assert_eq!(to_pixel(Pos2::new(15.7, 20.2), rect), (5, 0));
    }
}
