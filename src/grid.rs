// ============================================================================
// GRID CANVAS: four tiles + white separator strips in a 2×2 composite
// ============================================================================

use image::{Rgb, RgbImage};

use crate::cursor::{Cursor, CursorPos};
use crate::error::ViewError;
use crate::ops::imaging::{band_plane, fit_to, gray_to_rgb};
use crate::ops::spectral::SpectralMap;
use crate::overlay::Overlay;
use crate::tile::{GridSpec, TileSource, TILE_COUNT};

const MARGIN_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Geometry of the composite: tile `i` sits at row `i / 2`, column `i % 2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub tile_width: u32,
    pub tile_height: u32,
    pub margin: u32,
}

impl GridLayout {
    /// Fails with `ShapeMismatch` when the canvas would not fit in `u32` pixels.
    pub fn new(tile_width: u32, tile_height: u32, margin: u32) -> Result<Self, ViewError> {
        let side = |tile: u32| tile.checked_mul(2).and_then(|t| t.checked_add(margin));
        if side(tile_width).is_none() || side(tile_height).is_none() {
            return Err(ViewError::ShapeMismatch(format!(
                "{}x{} tiles with margin {} overflow the canvas",
                tile_width, tile_height, margin
            )));
        }
        Ok(Self { tile_width, tile_height, margin })
    }

    /// `(width, height)` = `(2w + margin, 2h + margin)`.
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            2 * self.tile_width + self.margin,
            2 * self.tile_height + self.margin,
        )
    }

    /// Top-left corner of tile `index` in canvas pixels.
    pub fn tile_origin(&self, index: usize) -> (u32, u32) {
        let col = (index % 2) as u32;
        let row = (index / 2) as u32;
        (
            col * (self.tile_width + self.margin),
            row * (self.tile_height + self.margin),
        )
    }

    /// Fold a raw canvas coordinate into the tile-local frame when `wrap` is
    /// set; otherwise pass it through.
    pub fn normalize(&self, raw: (i32, i32), wrap: bool) -> (i64, i64) {
        let (x, y) = (raw.0 as i64, raw.1 as i64);
        if !wrap {
            return (x, y);
        }
        let period_x = (self.tile_width + self.margin) as i64;
        let period_y = (self.tile_height + self.margin) as i64;
        (x.rem_euclid(period_x), y.rem_euclid(period_y))
    }

    /// Exclusive bounds test against one tile: `0 ≤ x < w`, `0 ≤ y < h`.
    pub fn contains(&self, x: i64, y: i64) -> Option<CursorPos> {
        if x >= 0 && y >= 0 && x < self.tile_width as i64 && y < self.tile_height as i64 {
            Some(CursorPos::new(x as u32, y as u32))
        } else {
            None
        }
    }

    /// Paste four tile images onto a white canvas.
    pub fn compose(&self, images: &[RgbImage]) -> RgbImage {
        let (cw, ch) = self.canvas_size();
        let mut canvas = RgbImage::from_pixel(cw, ch, MARGIN_COLOR);
        for (i, img) in images.iter().take(TILE_COUNT).enumerate() {
            let (x, y) = self.tile_origin(i);
            image::imageops::replace(&mut canvas, img, x as i64, y as i64);
        }
        canvas
    }
}

/// Produce one tile's base image (before overlay).
///
/// Normal mode: raw cubes yield band `band` as grayscale-as-RGB, producers get
/// `Some(band)`. Export mode: raw cubes go through `spectral_map`, producers
/// get `None`; `band` is not used for raw tiles.
pub fn tile_image(
    source: &TileSource,
    band: usize,
    export: bool,
    spectral_map: &SpectralMap,
) -> RgbImage {
    match source {
        TileSource::Raw(cube) if export => spectral_map(cube),
        TileSource::Raw(cube) => gray_to_rgb(&band_plane(cube, band)),
        TileSource::Producer(f) => f(if export { None } else { Some(band) }),
        TileSource::ProducerFull(f) => f(),
    }
}

/// Rasterize the whole grid at `band` with overlays.
///
/// Returns the canvas and, in export mode, the band it was taken at.
/// `band` must be a valid index for `grid`.
pub fn rasterize(
    grid: &GridSpec,
    layout: &GridLayout,
    band: usize,
    export: bool,
    spectral_map: &SpectralMap,
    overlay: &Overlay,
    cursors: &[Cursor],
    preview: Option<CursorPos>,
) -> (RgbImage, Option<usize>) {
    let images: Vec<RgbImage> = grid
        .tiles()
        .iter()
        .enumerate()
        .map(|(i, tile)| {
            let mut img = tile_image(&tile.source, band, export, spectral_map);
            if img.dimensions() != (layout.tile_width, layout.tile_height) {
                log_warn!(
                    "tile {} ('{}', {}) produced {}x{}, fitting to {}x{}",
                    i,
                    tile.title,
                    tile.source.kind(),
                    img.width(),
                    img.height(),
                    layout.tile_width,
                    layout.tile_height
                );
                img = fit_to(&img, layout.tile_width, layout.tile_height);
            }
            overlay.stamp(&img, &tile.title, tile.color, cursors, preview)
        })
        .collect();

    (layout.compose(&images), export.then_some(band))
}
