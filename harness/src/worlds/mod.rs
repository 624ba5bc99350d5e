//! Problem implementations driven by the harness.

pub mod grid_map;
pub mod n_puzzle;
pub mod sliding_block;

pub use grid_map::{GridError, GridMap, GridMove, GridPos};
pub use n_puzzle::{BlankMove, Board, BoardError, NPuzzle};
pub use sliding_block::{
    format_moves, BlockMove, BlockPosition, LayoutError, Offset, Piece, SlidingBlockPuzzle,
};
