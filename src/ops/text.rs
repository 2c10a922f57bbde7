use ab_glyph::{point, Font, FontArc, GlyphId, ScaleFont};
use font_kit::family_name::FamilyName;
use font_kit::properties::Properties;
use font_kit::source::SystemSource;
use image::{Rgb, RgbImage};

/// Families tried, in order, when no preferred family is configured or it
/// cannot be found.
#[cfg(target_os = "linux")]
const FALLBACK_FAMILIES: &[&str] = &["DejaVu Sans", "Liberation Sans", "Noto Sans"];
#[cfg(not(target_os = "linux"))]
const FALLBACK_FAMILIES: &[&str] = &["Arial", "Helvetica", "Segoe UI"];

/// Lay out a single line of text starting at x = 0.
/// Returns `(glyphs as (id, x), total_advance)`.
pub fn layout_line(font: &FontArc, text: &str, font_px: f32) -> (Vec<(GlyphId, f32)>, f32) {
    let scaled = font.as_scaled(font_px);
    let mut glyphs = Vec::with_capacity(text.len());
    let mut cursor_x = 0.0f32;
    let mut last_glyph: Option<GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = font.glyph_id(ch);
        if let Some(prev) = last_glyph {
            cursor_x += scaled.kern(prev, glyph_id);
        }
        glyphs.push((glyph_id, cursor_x));
        cursor_x += scaled.h_advance(glyph_id);
        last_glyph = Some(glyph_id);
    }

    (glyphs, cursor_x)
}

/// Draw `text` into `img` with its baseline starting at `origin`.
/// Coverage is blended over the existing pixels; anything off-image is clipped.
pub fn draw_text(
    img: &mut RgbImage,
    font: &FontArc,
    text: &str,
    font_px: f32,
    origin: (i32, i32),
    color: Rgb<u8>,
) {
    let (w, h) = (img.width() as i32, img.height() as i32);
    let (glyphs, _) = layout_line(font, text, font_px);

    for (glyph_id, gx) in glyphs {
        let glyph = glyph_id.with_scale_and_position(
            font_px,
            point(origin.0 as f32 + gx, origin.1 as f32),
        );
        let Some(outlined) = font.outline_glyph(glyph) else { continue };
        let bounds = outlined.px_bounds();
        outlined.draw(|px, py, cov| {
            let x = bounds.min.x as i32 + px as i32;
            let y = bounds.min.y as i32 + py as i32;
            if x < 0 || y < 0 || x >= w || y >= h || cov <= 0.001 {
                return;
            }
            let dst = img.get_pixel_mut(x as u32, y as u32);
            let a = cov.min(1.0);
            for c in 0..3 {
                let blended = dst.0[c] as f32 * (1.0 - a) + color.0[c] as f32 * a;
                dst.0[c] = blended.round().clamp(0.0, 255.0) as u8;
            }
        });
    }
}

/// Load a regular-weight font by family name from the system.
pub fn load_system_font(family: &str) -> Option<FontArc> {
    load_family(FamilyName::Title(family.to_string()))
}

fn load_family(family: FamilyName) -> Option<FontArc> {
    let handle = SystemSource::new()
        .select_best_match(&[family], &Properties::new())
        .ok()?;
    let font_data = handle.load().ok()?;
    let bytes: Vec<u8> = (*font_data.copy_font_data()?).clone();
    FontArc::try_from_vec(bytes).ok()
}

/// Font for overlay text: the preferred family if set and present, else the
/// first platform fallback that loads, else the system's generic sans-serif.
pub fn load_overlay_font(preferred: &str) -> Option<FontArc> {
    if !preferred.is_empty()
        && let Some(font) = load_system_font(preferred)
    {
        return Some(font);
    }
    FALLBACK_FAMILIES
        .iter()
        .find_map(|family| load_system_font(family))
        .or_else(|| load_family(FamilyName::SansSerif))
}
