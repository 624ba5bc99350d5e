//! Drawing puzzles: outline tracing and SVG solution walkthroughs.

pub mod contour;
pub mod svg;

/// Rendering failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Options failed validation.
    #[error("invalid render options: {detail}")]
    InvalidOptions { detail: String },
    /// A move names a piece the puzzle does not have.
    #[error("move references unknown piece {piece}")]
    UnknownPiece { piece: u8 },
    /// The position has the wrong number of pieces.
    #[error("position has {actual} pieces, puzzle has {expected}")]
    PositionMismatch { expected: usize, actual: usize },
}
