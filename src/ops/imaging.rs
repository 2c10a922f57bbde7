// ============================================================================
// PIXEL HELPERS: band planes, grayscale→RGB, difference maps, border trim
// ============================================================================

use image::{GrayImage, Rgb, RgbImage};
use ndarray::Axis;
use rayon::prelude::*;

use crate::tile::BandCube;

/// Extract one band of `cube` as a grayscale plane.
///
/// # Panics
/// If `band` is not below the cube's band count.
pub fn band_plane(cube: &BandCube, band: usize) -> GrayImage {
    let (h, w, _) = cube.dim();
    let plane = cube.index_axis(Axis(2), band);
    let data: Vec<u8> = plane.iter().copied().collect();
    GrayImage::from_raw(w as u32, h as u32, data).unwrap_or_else(|| GrayImage::new(w as u32, h as u32))
}

/// Per-pixel mean over all bands.
pub fn mean_plane(cube: &BandCube) -> GrayImage {
    let (h, w, d) = cube.dim();
    let mean = cube.map_axis(Axis(2), |spectrum| {
        let sum: u32 = spectrum.iter().map(|&v| v as u32).sum();
        (sum / d.max(1) as u32) as u8
    });
    let data: Vec<u8> = mean.iter().copied().collect();
    GrayImage::from_raw(w as u32, h as u32, data).unwrap_or_else(|| GrayImage::new(w as u32, h as u32))
}

/// Replicate a single channel into all three RGB channels.
pub fn gray_to_rgb(gray: &GrayImage) -> RgbImage {
    let (w, h) = gray.dimensions();
    let mut out = vec![0u8; gray.as_raw().len() * 3];
    out.par_chunks_exact_mut(3)
        .zip(gray.as_raw().par_iter())
        .for_each(|(px, &v)| px.fill(v));
    RgbImage::from_raw(w, h, out).unwrap_or_else(|| RgbImage::new(w, h))
}

/// Signed difference of two planes: red where `a > b`, blue where `b > a`.
/// Pixels outside the smaller of the two images are left black.
pub fn band_difference(a: &GrayImage, b: &GrayImage) -> RgbImage {
    let w = a.width().min(b.width());
    let h = a.height().min(b.height());
    RgbImage::from_fn(w, h, |x, y| {
        let av = a.get_pixel(x, y)[0];
        let bv = b.get_pixel(x, y)[0];
        Rgb([av.saturating_sub(bv), 0, bv.saturating_sub(av)])
    })
}

/// Crop fully-white rows and columns from all four edges.
/// An entirely white image comes back unchanged.
pub fn trim_white(img: &RgbImage) -> RgbImage {
    let (w, h) = img.dimensions();
    let white_row = |y: u32| (0..w).all(|x| img.get_pixel(x, y).0 == [255, 255, 255]);
    let white_col = |x: u32, y0: u32, y1: u32| (y0..y1).all(|y| img.get_pixel(x, y).0 == [255, 255, 255]);

    let Some(top) = (0..h).find(|&y| !white_row(y)) else {
        return img.clone();
    };
    let bottom = (0..h).rev().find(|&y| !white_row(y)).unwrap_or(top) + 1;
    let left = (0..w).find(|&x| !white_col(x, top, bottom)).unwrap_or(0);
    let right = (0..w).rev().find(|&x| !white_col(x, top, bottom)).unwrap_or(w - 1) + 1;

    image::imageops::crop_imm(img, left, top, right - left, bottom - top).to_image()
}

/// Copy `src` into a `width`×`height` white image, cropping anything that
/// does not fit.
pub fn fit_to(src: &RgbImage, width: u32, height: u32) -> RgbImage {
    let mut out = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    image::imageops::replace(&mut out, src, 0, 0);
    out
}
