//! Title text, cursor labels and cross markers stamped onto a tile image.

use ab_glyph::FontArc;
use image::{Rgb, RgbImage};

use crate::config::ViewerSettings;
use crate::cursor::{Cursor, CursorPos};
use crate::ops::text::draw_text;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayStyle {
    pub marker_size: u32,
    pub marker_thickness: u32,
    pub font_px: f32,
    pub title_inset: u32,
    pub label_offset: i32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::from_settings(&ViewerSettings::default())
    }
}

impl OverlayStyle {
    pub fn from_settings(settings: &ViewerSettings) -> Self {
        Self {
            marker_size: settings.marker_size,
            marker_thickness: settings.marker_thickness.max(1),
            font_px: settings.label_font_px,
            title_inset: settings.title_inset,
            label_offset: settings.label_offset,
        }
    }
}

/// Stateless overlay renderer. Without a font only markers are drawn.
#[derive(Clone, Default)]
pub struct Overlay {
    style: OverlayStyle,
    font: Option<FontArc>,
}

impl Overlay {
    pub fn new(style: OverlayStyle, font: Option<FontArc>) -> Self {
        Self { style, font }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Return a copy of `image` with the title, every confirmed cursor
    /// (label then marker) and the preview marker drawn in `color`.
    pub fn stamp(
        &self,
        image: &RgbImage,
        title: &str,
        color: Rgb<u8>,
        cursors: &[Cursor],
        preview: Option<CursorPos>,
    ) -> RgbImage {
        let mut out = image.clone();
        let s = &self.style;

        let anchor = title_anchor(out.height(), s);
        self.text(&mut out, title, anchor, color);

        for cursor in cursors {
            let p = cursor.pos();
            self.text(&mut out, cursor.id(), label_anchor(p, s), color);
            draw_cross(&mut out, p, s.marker_size, s.marker_thickness, color);
        }

        if let Some(p) = preview {
            draw_cross(&mut out, p, s.marker_size, s.marker_thickness, color);
        }
        out
    }

    fn text(&self, img: &mut RgbImage, text: &str, baseline: (i32, i32), color: Rgb<u8>) {
        if let Some(font) = &self.font {
            draw_text(img, font, text, self.style.font_px, baseline, color);
        }
    }
}

/// Baseline origin of a tile title: `title_inset` in from the left and bottom edges.
pub fn title_anchor(tile_height: u32, style: &OverlayStyle) -> (i32, i32) {
    let inset = style.title_inset as i32;
    (inset, tile_height as i32 - inset)
}

/// Baseline origin of a cursor label: `label_offset` right of and above the marker.
pub fn label_anchor(pos: CursorPos, style: &OverlayStyle) -> (i32, i32) {
    (pos.x as i32 + style.label_offset, pos.y as i32 - style.label_offset)
}

/// Axis-aligned cross: one horizontal and one vertical bar of length `size`
/// centred on `pos`, each `thickness` pixels wide. Clipped to the image.
pub fn draw_cross(img: &mut RgbImage, pos: CursorPos, size: u32, thickness: u32, color: Rgb<u8>) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let (cx, cy) = (pos.x as i64, pos.y as i64);
    let half = size as i64 / 2;
    let t0 = -(thickness as i64 - 1) / 2;
    let t1 = t0 + thickness as i64;

    let mut plot = |x: i64, y: i64| {
        if x >= 0 && y >= 0 && x < w && y < h {
            img.put_pixel(x as u32, y as u32, color);
        }
    };

    for d in -half..=half {
        for t in t0..t1 {
            plot(cx + d, cy + t);
            plot(cx + t, cy + d);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::CursorRegistry;
    use crate::ops::text::load_overlay_font;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    fn black(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb([0, 0, 0]))
    }

    #[test]
    fn cross_covers_both_arms_and_nothing_diagonal() {
        let mut img = black(32, 32);
        draw_cross(&mut img, CursorPos::new(16, 16), 12, 1, RED);
        assert_eq!(*img.get_pixel(10, 16), RED);
        assert_eq!(*img.get_pixel(22, 16), RED);
        assert_eq!(*img.get_pixel(16, 10), RED);
        assert_eq!(*img.get_pixel(16, 22), RED);
        assert_eq!(img.get_pixel(17, 17).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(23, 16).0, [0, 0, 0]);
    }

    #[test]
    fn cross_near_corner_is_clipped() {
        let mut img = black(8, 8);
        draw_cross(&mut img, CursorPos::new(0, 7), 12, 3, RED);
        assert_eq!(*img.get_pixel(0, 7), RED);
        assert_eq!(*img.get_pixel(6, 7), RED);
    }

    #[test]
    fn stamp_copies_instead_of_mutating() {
        let src = black(20, 20);
        let overlay = Overlay::default();
        let out = overlay.stamp(&src, "title", RED, &[], Some(CursorPos::new(5, 5)));
        assert_eq!(src.get_pixel(5, 5).0, [0, 0, 0]);
        assert_eq!(*out.get_pixel(5, 5), RED);
    }

    #[test]
    fn stamp_draws_confirmed_and_preview_markers() {
        let mut reg = CursorRegistry::default();
        reg.confirm(CursorPos::new(4, 4)).unwrap();
        let overlay = Overlay::default();
        let out = overlay.stamp(&black(40, 40), "", RED, reg.confirmed(), Some(CursorPos::new(30, 30)));
        assert_eq!(*out.get_pixel(4, 4), RED);
        assert_eq!(*out.get_pixel(30, 30), RED);
        assert_eq!(out.get_pixel(17, 17).0, [0, 0, 0]);
    }

    #[test]
    fn anchors_sit_inset_from_bottom_left_and_offset_from_marker() {
        let style = OverlayStyle::default();
        assert_eq!(title_anchor(160, &style), (10, 150));
        assert_eq!(label_anchor(CursorPos::new(40, 30), &style), (45, 25));
        assert_eq!(label_anchor(CursorPos::new(0, 2), &style), (5, -3));
    }

    #[test]
    fn title_and_label_are_drawn_at_their_anchors() {
        let Some(font) = load_overlay_font("") else { return };
        let overlay = Overlay::new(OverlayStyle::default(), Some(font));
        assert!(overlay.has_font());

        let white = Rgb([255, 255, 255]);
        let src = RgbImage::from_pixel(120, 80, white);
        let mut reg = CursorRegistry::default();
        reg.confirm(CursorPos::new(60, 30)).unwrap();
        let out = overlay.stamp(&src, "Ref", RED, reg.confirmed(), None);

        let marker_only = Overlay::default().stamp(&src, "Ref", RED, reg.confirmed(), None);
        let text_pixels: Vec<(u32, u32)> = out
            .enumerate_pixels()
            .filter(|&(x, y, p)| *p != *marker_only.get_pixel(x, y))
            .map(|(x, y, _)| (x, y))
            .collect();

        // Title: right of x = 10, ending near the bottom baseline at y = 70.
        assert!(text_pixels.iter().any(|&(x, y)| x < 40 && y > 55));
        // Label "Z": right of x = 65, above y = 25.
        assert!(text_pixels.iter().any(|&(x, y)| x >= 64 && y < 27 && y > 5));
        assert!(text_pixels.iter().all(|&(x, _)| x >= 9));
    }
}
