//! Deterministic synthetic scene for running the viewer without a model.
//!
//! A "reference" cube of three Gaussian blobs, each with its own spectral
//! peak, and a "reconstruction" of the same scene with shifted blobs and a
//! faint ripple, standing in for model output.

use std::rc::Rc;

use crate::ops::imaging::{band_difference, band_plane, mean_plane};
use crate::ops::spectral::false_color;
use crate::tile::{BandCube, Tile};

struct Blob {
    cx: f32,
    cy: f32,
    radius: f32,
    /// Spectral peak as a fraction of the band range.
    peak: f32,
}

const BLOBS: [Blob; 3] = [
    Blob { cx: 0.30, cy: 0.35, radius: 0.18, peak: 0.15 },
    Blob { cx: 0.68, cy: 0.40, radius: 0.14, peak: 0.55 },
    Blob { cx: 0.50, cy: 0.72, radius: 0.20, peak: 0.85 },
];

fn scene(height: usize, width: usize, depth: usize, shift: f32, ripple: f32) -> BandCube {
    BandCube::from_shape_fn((height, width, depth), |(y, x, b)| {
        let u = x as f32 / width.max(1) as f32;
        let v = y as f32 / height.max(1) as f32;
        let s = b as f32 / depth.max(1) as f32;
        let mut value = 0.08;
        for blob in &BLOBS {
            let dx = u - blob.cx - shift;
            let dy = v - blob.cy + shift * 0.5;
            let spatial = (-(dx * dx + dy * dy) / (2.0 * blob.radius * blob.radius)).exp();
            let spectral = (-((s - blob.peak) * (s - blob.peak)) / 0.02).exp();
            value += 0.9 * spatial * spectral;
        }
        value += ripple * ((u * 40.0).sin() * (v * 40.0).cos());
        (value.clamp(0.0, 1.0) * 255.0).round() as u8
    })
}

pub fn reference_cube(height: usize, width: usize, depth: usize) -> BandCube {
    scene(height, width, depth, 0.0, 0.0)
}

pub fn reconstruction_cube(height: usize, width: usize, depth: usize) -> BandCube {
    scene(height, width, depth, 0.015, 0.03)
}

/// Reference, reconstruction, their per-band difference, and a static
/// false-colour rendering of the reference.
pub fn demo_tiles(height: usize, width: usize, depth: usize) -> Vec<Tile> {
    let reference = Rc::new(reference_cube(height, width, depth));
    let reconstruction = Rc::new(reconstruction_cube(height, width, depth));

    let diff = {
        let (a, b) = (Rc::clone(&reference), Rc::clone(&reconstruction));
        move |band: Option<usize>| match band {
            Some(i) => band_difference(&band_plane(&a, i), &band_plane(&b, i)),
            None => band_difference(&mean_plane(&a), &mean_plane(&b)),
        }
    };
    let legend = {
        let a = Rc::clone(&reference);
        move || false_color(&a)
    };

    vec![
        Tile::raw((*reference).clone(), "Reference", [0, 255, 0]),
        Tile::raw((*reconstruction).clone(), "Reconstruction", [0, 255, 255]),
        Tile::producer(diff, "Difference", [255, 255, 0]),
        Tile::full(legend, "False colour", [255, 255, 255]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::GridSpec;

    #[test]
    fn demo_grid_is_valid() {
        let grid = GridSpec::new(demo_tiles(24, 32, 12), None).unwrap();
        assert_eq!((grid.width(), grid.height(), grid.depth()), (32, 24, 12));
    }

    #[test]
    fn scene_is_deterministic_and_not_flat() {
        let a = reference_cube(16, 16, 8);
        assert_eq!(a, reference_cube(16, 16, 8));
        let lo = a.iter().min().copied().unwrap_or(0);
        let hi = a.iter().max().copied().unwrap_or(0);
        assert!(hi > lo + 50, "expected contrast, got {lo}..{hi}");
    }
}
