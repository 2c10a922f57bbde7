/// Errors raised by the viewer core.
///
/// Construction-time problems (`ShapeMismatch`) abort [`crate::create_view`];
/// the other two are runtime failures of a single call and leave the viewer
/// usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// A cursor confirmation was requested after every identifier was issued.
    PoolExhausted,
    /// Band index outside `[0, depth - 1]`.
    OutOfRange { index: usize, depth: usize },
    /// Tiles are not exactly four, or disagree on size or band depth.
    ShapeMismatch(String),
}

impl std::fmt::Display for ViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewError::PoolExhausted => write!(f, "Cursor identifier pool exhausted"),
            ViewError::OutOfRange { index, depth } => {
                write!(f, "Band {} out of range [0, {}]", index, depth.saturating_sub(1))
            }
            ViewError::ShapeMismatch(e) => write!(f, "Tile shape mismatch: {}", e),
        }
    }
}

impl std::error::Error for ViewError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_valid_range() {
        let err = ViewError::OutOfRange { index: 40, depth: 31 };
        assert_eq!(err.to_string(), "Band 40 out of range [0, 30]");
    }

    #[test]
    fn display_shape_mismatch_carries_reason() {
        let err = ViewError::ShapeMismatch("expected 4 tiles, got 3".to_string());
        assert!(err.to_string().contains("expected 4 tiles, got 3"));
    }
}
