use image::{Rgb, RgbImage};
use ndarray::Array3;

use crate::error::ViewError;

/// Multi-band image tensor laid out as `(height, width, bands)`.
pub type BandCube = Array3<u8>;

/// Producer called with `Some(band)` for normal rendering and `None` when the
/// full (export) composite is wanted.
pub type BandProducer = Box<dyn Fn(Option<usize>) -> RgbImage>;

/// Producer whose image does not depend on the band.
pub type FullProducer = Box<dyn Fn() -> RgbImage>;

/// Where a tile's pixels come from.
pub enum TileSource {
    Raw(BandCube),
    Producer(BandProducer),
    ProducerFull(FullProducer),
}

impl TileSource {
    pub fn kind(&self) -> &'static str {
        match self {
            TileSource::Raw(_) => "raw",
            TileSource::Producer(_) => "producer",
            TileSource::ProducerFull(_) => "producer-full",
        }
    }
}

/// One panel of the 2×2 grid.
pub struct Tile {
    pub source: TileSource,
    pub title: String,
    /// Colour used for the title, cursor labels and markers on this tile.
    pub color: Rgb<u8>,
}

impl Tile {
    pub fn raw(cube: BandCube, title: impl Into<String>, color: [u8; 3]) -> Self {
        Self { source: TileSource::Raw(cube), title: title.into(), color: Rgb(color) }
    }

    pub fn producer(
        f: impl Fn(Option<usize>) -> RgbImage + 'static,
        title: impl Into<String>,
        color: [u8; 3],
    ) -> Self {
        Self { source: TileSource::Producer(Box::new(f)), title: title.into(), color: Rgb(color) }
    }

    pub fn full(f: impl Fn() -> RgbImage + 'static, title: impl Into<String>, color: [u8; 3]) -> Self {
        Self { source: TileSource::ProducerFull(Box::new(f)), title: title.into(), color: Rgb(color) }
    }
}

pub const TILE_COUNT: usize = 4;

/// A validated set of four tiles sharing one `(height, width)` and one band depth.
pub struct GridSpec {
    tiles: Vec<Tile>,
    height: u32,
    width: u32,
    depth: usize,
}

impl GridSpec {
    /// Validate `tiles`.
    ///
    /// The band depth comes from the raw tiles; `depth_hint` supplies it for
    /// grids made only of producers and must agree with the raw tiles
    /// otherwise. Producer tiles are sampled once (band 0, or the full image)
    /// to learn their size.
    pub fn new(tiles: Vec<Tile>, depth_hint: Option<usize>) -> Result<Self, ViewError> {
        if tiles.len() != TILE_COUNT {
            return Err(ViewError::ShapeMismatch(format!(
                "expected {} tiles, got {}",
                TILE_COUNT,
                tiles.len()
            )));
        }

        let mut depth = depth_hint;
        for (i, tile) in tiles.iter().enumerate() {
            if let TileSource::Raw(cube) = &tile.source {
                let d = cube.dim().2;
                match depth {
                    Some(existing) if existing != d => {
                        return Err(ViewError::ShapeMismatch(format!(
                            "tile {} ('{}') has {} bands, expected {}",
                            i, tile.title, d, existing
                        )));
                    }
                    _ => depth = Some(d),
                }
            }
        }
        let depth = match depth {
            Some(0) => return Err(ViewError::ShapeMismatch("tiles have no bands".to_string())),
            Some(d) => d,
            None => {
                return Err(ViewError::ShapeMismatch(
                    "band depth cannot be inferred without a raw tile".to_string(),
                ));
            }
        };

        let mut size: Option<(u32, u32)> = None;
        for (i, tile) in tiles.iter().enumerate() {
            let (h, w) = match &tile.source {
                TileSource::Raw(cube) => {
                    let (h, w, _) = cube.dim();
                    (h as u32, w as u32)
                }
                TileSource::Producer(f) => {
                    let img = f(Some(0));
                    (img.height(), img.width())
                }
                TileSource::ProducerFull(f) => {
                    let img = f();
                    (img.height(), img.width())
                }
            };
            if h == 0 || w == 0 {
                return Err(ViewError::ShapeMismatch(format!(
                    "tile {} ('{}') is empty",
                    i, tile.title
                )));
            }
            match size {
                Some((eh, ew)) if (eh, ew) != (h, w) => {
                    return Err(ViewError::ShapeMismatch(format!(
                        "tile {} ('{}') is {}x{}, expected {}x{}",
                        i, tile.title, w, h, ew, eh
                    )));
                }
                _ => size = Some((h, w)),
            }
        }
        let (height, width) = size.unwrap_or((0, 0));

        Ok(Self { tiles, height, width, depth })
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Shared band count.
    pub fn depth(&self) -> usize {
        self.depth
    }
}
