// ============================================================================
// FALSE-COLOUR SPECTRAL MAPPING
// ============================================================================

use image::RgbImage;
use rayon::prelude::*;

use crate::tile::BandCube;

/// Maps a whole multi-band tensor to one RGB image. Used only by export
/// rasterization; must be pure.
pub type SpectralMap = Box<dyn Fn(&BandCube) -> RgbImage>;

pub fn default_spectral_map() -> SpectralMap {
    Box::new(false_color)
}

/// Band range feeding RGB channel `k` (0 = blue/short, 2 = red/long).
fn channel_bands(k: usize, depth: usize) -> std::ops::Range<usize> {
    let lo = (k * depth / 3).min(depth.saturating_sub(1));
    let hi = ((k + 1) * depth / 3).max(lo + 1).min(depth.max(1));
    lo..hi
}

/// Split the spectrum into thirds, average each third, and stretch every
/// channel to its own maximum. Long wavelengths (high band indices) go to
/// red, short ones to blue.
pub fn false_color(cube: &BandCube) -> RgbImage {
    let (h, w, d) = cube.dim();
    let ranges: [std::ops::Range<usize>; 3] = [channel_bands(2, d), channel_bands(1, d), channel_bands(0, d)];

    let means: Vec<[f32; 3]> = (0..h * w)
        .into_par_iter()
        .map(|i| {
            let (y, x) = (i / w, i % w);
            let mut px = [0.0f32; 3];
            for (c, range) in ranges.iter().enumerate() {
                if range.is_empty() {
                    continue;
                }
                let sum: u32 = range.clone().map(|b| cube[[y, x, b]] as u32).sum();
                px[c] = sum as f32 / range.len() as f32;
            }
            px
        })
        .collect();

    let mut peak = [0.0f32; 3];
    for px in &means {
        for c in 0..3 {
            peak[c] = peak[c].max(px[c]);
        }
    }

    let raw: Vec<u8> = means
        .par_iter()
        .flat_map_iter(|px| {
            (0..3).map(move |c| {
                if peak[c] > 0.0 {
                    (px[c] / peak[c] * 255.0).round().min(255.0) as u8
                } else {
                    0
                }
            })
        })
        .collect();

    RgbImage::from_raw(w as u32, h as u32, raw).unwrap_or_else(|| RgbImage::new(w as u32, h as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirds_cover_the_spectrum() {
        assert_eq!(channel_bands(0, 9), 0..3);
        assert_eq!(channel_bands(1, 9), 3..6);
        assert_eq!(channel_bands(2, 9), 6..9);
    }

    #[test]
    fn tiny_depths_still_yield_one_band_per_channel() {
        for k in 0..3 {
            assert_eq!(channel_bands(k, 1), 0..1);
            assert!(!channel_bands(k, 2).is_empty());
        }
    }

    #[test]
    fn long_wavelength_energy_maps_to_red() {
        let cube = BandCube::from_shape_fn((2, 2, 6), |(_, _, b)| if b >= 4 { 200 } else { 0 });
        let img = false_color(&cube);
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(1, 1).0, [255, 0, 0]);
    }

    #[test]
    fn channels_are_stretched_independently() {
        let cube = BandCube::from_shape_fn((1, 2, 3), |(_, x, b)| match (x, b) {
            (0, 0) => 50,
            (1, 0) => 100,
            _ => 0,
        });
        let img = false_color(&cube);
        assert_eq!(img.get_pixel(0, 0).0[2], 128);
        assert_eq!(img.get_pixel(1, 0).0[2], 255);
    }
}
