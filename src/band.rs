use crate::error::ViewError;

/// Current spectral band and its valid range `[0, depth - 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BandSelector {
    index: usize,
    depth: usize,
}

impl BandSelector {
    /// `initial` is clamped into range, so a default such as 150 is safe for
    /// shallow cubes. `depth` must be at least 1.
    pub fn new(depth: usize, initial: usize) -> Self {
        debug_assert!(depth > 0, "band depth must be positive");
        Self { index: initial.min(depth.saturating_sub(1)), depth }
    }

    /// Select `index`; out-of-range values are rejected and the previous
    /// selection is kept.
    pub fn set(&mut self, index: usize) -> Result<(), ViewError> {
        if index >= self.depth {
            return Err(ViewError::OutOfRange { index, depth: self.depth });
        }
        self.index = index;
        Ok(())
    }

    pub fn get(&self) -> usize {
        self.index
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Highest valid index (the slider maximum).
    pub fn max(&self) -> usize {
        self.depth.saturating_sub(1)
    }
}
