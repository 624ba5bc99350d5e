//! `SlidingBlockPuzzle`: rectangular boards of arbitrarily shaped pieces.
//!
//! # Layout format
//!
//! ```text
//! 24600      source board
//! 88611
//! 7..53
//!            blank line
//! ..65.      target board
//! 42600
//! 88311
//! ```
//!
//! Characters `0-9` and `A-Z` name pieces (ids 0 to 35); every other
//! character is an empty cell. A piece is the set of cells sharing its id
//! and need not be contiguous. The target section places some pieces; the
//! rest are unconstrained. Board width is limited to 31 columns because
//! each board row is a `u32` bitmask.
//!
//! # Moves
//!
//! One move relocates one piece along any path of unit steps through free
//! cells, so every offset the piece can reach is a distinct move with cost
//! 1. The heuristic is half the summed Manhattan distance of targeted
//! pieces. It is not admissible (one move can cover any distance), so
//! solutions are short but not guaranteed minimal.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

use slidewise_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use slidewise_search::contract::Problem;
use slidewise_search::node::Cost;

/// Widest supported board.
pub const MAX_COLUMNS: usize = 31;
/// Tallest supported board.
pub const MAX_ROWS: usize = 127;

/// Unit steps tried when growing a piece's reachable set.
const STEPS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Layout parsing errors.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// The source section has no rows.
    #[error("layout has no board rows")]
    Empty,
    /// A section is wider than [`MAX_COLUMNS`].
    #[error("board is {columns} columns wide, at most {max} supported")]
    TooWide { columns: usize, max: usize },
    /// A section is taller than [`MAX_ROWS`].
    #[error("board has {rows} rows, at most {max} supported")]
    TooTall { rows: usize, max: usize },
    /// The source section names no pieces.
    #[error("layout contains no pieces")]
    NoPieces,
    /// The target places a piece absent from the source.
    #[error("target places piece {piece:?} which is not on the board")]
    UnknownTargetPiece { piece: char },
    /// The layout file could not be read.
    #[error("cannot read layout {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Piece id for a layout character, if it names one.
#[must_use]
pub fn piece_id(c: char) -> Option<u8> {
    match c {
        '0'..='9' => Some(c as u8 - b'0'),
        'A'..='Z' => Some(c as u8 - b'A' + 10),
        _ => None,
    }
}

/// Layout character for a piece id.
#[must_use]
pub fn piece_label(id: u8) -> char {
    match id {
        0..=9 => char::from(b'0' + id),
        10..=35 => char::from(b'A' + id - 10),
        _ => '?',
    }
}

/// Top-left corner of a piece's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Offset {
    pub dx: i8,
    pub dy: i8,
}

impl Offset {
    fn x(self) -> i32 {
        i32::from(self.dx)
    }

    fn y(self) -> i32 {
        i32::from(self.dy)
    }
}

/// One piece's shape, relative to its bounding box.
///
/// Ids missing from the layout become empty pieces that never move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Piece {
    /// Row bitmasks; bit `c` of `shape[r]` is cell `(c, r)` of the box.
    shape: Vec<u32>,
    width: usize,
    height: usize,
}

impl Piece {
    /// Build from absolute `(col, row)` cells, returning the shape and the
    /// box origin.
    fn from_cells(cells: &[(usize, usize)]) -> (Self, Offset) {
        let min_col = cells.iter().map(|&(c, _)| c).min().unwrap_or_default();
        let min_row = cells.iter().map(|&(_, r)| r).min().unwrap_or_default();
        let max_col = cells.iter().map(|&(c, _)| c).max().unwrap_or_default();
        let max_row = cells.iter().map(|&(_, r)| r).max().unwrap_or_default();

        let mut shape = vec![0u32; max_row - min_row + 1];
        for &(c, r) in cells {
            shape[r - min_row] |= 1 << (c - min_col);
        }
        let origin = Offset {
            dx: i8::try_from(min_col).unwrap_or(i8::MAX),
            dy: i8::try_from(min_row).unwrap_or(i8::MAX),
        };
        let piece = Self {
            shape,
            width: max_col - min_col + 1,
            height: max_row - min_row + 1,
        };
        (piece, origin)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the piece has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0
    }

    /// Whether cell `(col, row)` of the bounding box belongs to the piece.
    #[must_use]
    pub fn is_set(&self, col: usize, row: usize) -> bool {
        col < self.width && self.shape.get(row).is_some_and(|bits| bits >> col & 1 == 1)
    }

    /// Row-major cells of the bounding box.
    #[must_use]
    pub fn bitmap(&self) -> Vec<bool> {
        (0..self.height)
            .flat_map(|row| (0..self.width).map(move |col| (col, row)))
            .map(|(col, row)| self.is_set(col, row))
            .collect()
    }

    /// Flip the piece's cells into or out of `occupancy` at `(x, y)`.
    fn toggle(&self, occupancy: &mut [u32], x: i32, y: i32) {
        let (x, y) = (x as usize, y as usize);
        for (r, bits) in self.shape.iter().enumerate() {
            occupancy[y + r] ^= bits << x;
        }
    }

    fn overlaps(&self, occupancy: &[u32], x: i32, y: i32) -> bool {
        let (x, y) = (x as usize, y as usize);
        self.shape
            .iter()
            .enumerate()
            .any(|(r, bits)| occupancy[y + r] & (bits << x) != 0)
    }
}

/// Box offsets of every piece, indexed by piece id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockPosition {
    offsets: Box<[Offset]>,
}

impl BlockPosition {
    #[must_use]
    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    fn shifted(&self, mv: &BlockMove, sign: i8) -> Self {
        let mut offsets = self.offsets.clone();
        if let Some(at) = offsets.get_mut(usize::from(mv.piece)) {
            at.dx = at.dx.wrapping_add(mv.dx.wrapping_mul(sign));
            at.dy = at.dy.wrapping_add(mv.dy.wrapping_mul(sign));
        }
        Self { offsets }
    }
}

/// Relocation of one piece by `(dx, dy)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockMove {
    pub piece: u8,
    pub dx: i8,
    pub dy: i8,
}

impl fmt::Display for BlockMove {
    /// Piece id, then `L`/`R` and `U`/`D` with the distance when above 1:
    /// `3R2U` moves piece 3 two right and one up.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.piece)?;
        for (delta, neg, pos) in [(self.dx, 'L', 'R'), (self.dy, 'U', 'D')] {
            if delta == 0 {
                continue;
            }
            f.write_char(if delta > 0 { pos } else { neg })?;
            if delta.unsigned_abs() > 1 {
                write!(f, "{}", delta.unsigned_abs())?;
            }
        }
        Ok(())
    }
}

/// Comma-separated move notation.
#[must_use]
pub fn format_moves(moves: &[BlockMove]) -> String {
    let mut out = String::new();
    for (i, mv) in moves.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{mv}");
    }
    out
}

/// A parsed sliding-block puzzle.
#[derive(Debug, Clone)]
pub struct SlidingBlockPuzzle {
    pieces: Vec<Piece>,
    source: BlockPosition,
    target: Vec<(u8, Offset)>,
    rows: usize,
    cols: usize,
    layout: String,
}

/// Cells per piece id, plus the section's column count.
type Scan = (BTreeMap<u8, Vec<(usize, usize)>>, usize);

fn scan(lines: &[&str]) -> Result<Scan, LayoutError> {
    if lines.len() > MAX_ROWS {
        return Err(LayoutError::TooTall {
            rows: lines.len(),
            max: MAX_ROWS,
        });
    }
    let columns = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or_default();
    if columns > MAX_COLUMNS {
        return Err(LayoutError::TooWide {
            columns,
            max: MAX_COLUMNS,
        });
    }
    let mut cells: BTreeMap<u8, Vec<(usize, usize)>> = BTreeMap::new();
    for (row, line) in lines.iter().enumerate() {
        for (col, c) in line.chars().enumerate() {
            if let Some(id) = piece_id(c) {
                cells.entry(id).or_default().push((col, row));
            }
        }
    }
    Ok((cells, columns))
}

impl SlidingBlockPuzzle {
    /// Parse a layout: source rows, a blank line, target rows.
    ///
    /// The target section is optional; without it every position is a goal.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] if the board is empty, too large, has no
    /// pieces, or the target places an unknown piece.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let mut lines = text.lines();
        let board: Vec<&str> = lines.by_ref().take_while(|l| !l.is_empty()).collect();
        let goal: Vec<&str> = lines.take_while(|l| !l.is_empty()).collect();
        if board.is_empty() {
            return Err(LayoutError::Empty);
        }

        let (cells, cols) = scan(&board)?;
        let count = cells
            .keys()
            .next_back()
            .map(|&id| usize::from(id) + 1)
            .ok_or(LayoutError::NoPieces)?;
        let mut pieces = vec![Piece::default(); count];
        let mut offsets = vec![Offset::default(); count];
        for (id, at) in &cells {
            let (piece, origin) = Piece::from_cells(at);
            pieces[usize::from(*id)] = piece;
            offsets[usize::from(*id)] = origin;
        }

        let mut target = Vec::new();
        if !goal.is_empty() {
            let (goal_cells, _) = scan(&goal)?;
            for (id, at) in &goal_cells {
                if !pieces
                    .get(usize::from(*id))
                    .is_some_and(|piece| !piece.is_empty())
                {
                    return Err(LayoutError::UnknownTargetPiece {
                        piece: piece_label(*id),
                    });
                }
                target.push((*id, Piece::from_cells(at).1));
            }
        }

        let mut layout = board.join("\n");
        if !goal.is_empty() {
            layout.push_str("\n\n");
            layout.push_str(&goal.join("\n"));
        }

        Ok(Self {
            pieces,
            source: BlockPosition {
                offsets: offsets.into_boxed_slice(),
            },
            target,
            rows: board.len(),
            cols,
            layout,
        })
    }

    /// Read and parse a layout file.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Io`] if the file cannot be read, or the errors
    /// of [`SlidingBlockPuzzle::parse`].
    pub fn from_path(path: &Path) -> Result<Self, LayoutError> {
        let text = std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// The starting position described by the layout.
    #[must_use]
    pub fn source(&self) -> BlockPosition {
        self.source.clone()
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Pieces indexed by id.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Target box offsets of constrained pieces, by ascending id.
    #[must_use]
    pub fn target(&self) -> &[(u8, Offset)] {
        &self.target
    }

    /// Digest of the normalised layout text.
    #[must_use]
    pub fn layout_digest(&self) -> ContentHash {
        canonical_hash(HashDomain::PuzzleLayout, self.layout.as_bytes())
    }

    fn occupancy(&self, position: &BlockPosition) -> Vec<u32> {
        let mut occupancy = vec![0u32; self.rows];
        for (piece, at) in self.pieces.iter().zip(position.offsets.iter()) {
            if !piece.is_empty() {
                piece.toggle(&mut occupancy, at.x(), at.y());
            }
        }
        occupancy
    }
}

/// Depth-first walk over the offsets one piece can reach.
struct Reach<'a> {
    piece: &'a Piece,
    piece_id: u8,
    origin: Offset,
    rows: i32,
    cols: i32,
    occupancy: &'a [u32],
    seen: &'a mut [bool],
    out: &'a mut Vec<BlockMove>,
}

impl Reach<'_> {
    fn cell(&self, x: i32, y: i32) -> usize {
        (y * self.cols + x) as usize
    }

    fn visit(&mut self, dx: i32, dy: i32) {
        let here = self.cell(self.origin.x() + dx, self.origin.y() + dy);
        self.seen[here] = true;
        for (sx, sy) in STEPS {
            let (nx, ny) = (dx + sx, dy + sy);
            let (x, y) = (self.origin.x() + nx, self.origin.y() + ny);
            let in_bounds = x >= 0
                && y >= 0
                && x + self.piece.width as i32 <= self.cols
                && y + self.piece.height as i32 <= self.rows;
            if !in_bounds || self.seen[self.cell(x, y)] || self.piece.overlaps(self.occupancy, x, y)
            {
                continue;
            }
            self.out.push(BlockMove {
                piece: self.piece_id,
                dx: nx as i8,
                dy: ny as i8,
            });
            self.visit(nx, ny);
        }
    }
}

impl Problem for SlidingBlockPuzzle {
    type Position = BlockPosition;
    type Move = BlockMove;

    #[allow(clippy::unnecessary_literal_bound)]
    fn problem_id(&self) -> &str {
        "sliding_block"
    }

    fn enumerate_moves(&self, position: &BlockPosition, out: &mut Vec<BlockMove>) {
        let mut occupancy = self.occupancy(position);
        let mut seen = vec![false; self.rows * self.cols];
        for (id, (piece, &origin)) in self.pieces.iter().zip(position.offsets.iter()).enumerate() {
            if piece.is_empty() {
                continue;
            }
            piece.toggle(&mut occupancy, origin.x(), origin.y());
            seen.fill(false);
            Reach {
                piece,
                piece_id: id as u8,
                origin,
                rows: self.rows as i32,
                cols: self.cols as i32,
                occupancy: &occupancy,
                seen: &mut seen,
                out: &mut *out,
            }
            .visit(0, 0);
            piece.toggle(&mut occupancy, origin.x(), origin.y());
        }
    }

    fn apply(&self, position: &BlockPosition, mv: &BlockMove) -> BlockPosition {
        position.shifted(mv, 1)
    }

    fn invert(&self, position_after: &BlockPosition, mv: &BlockMove) -> BlockPosition {
        position_after.shifted(mv, -1)
    }

    fn step_cost(&self, _position: &BlockPosition, _mv: &BlockMove) -> Cost {
        1.0
    }

    fn heuristic(&self, position: &BlockPosition) -> Cost {
        let distance: i32 = self
            .target
            .iter()
            .map(|&(id, goal)| {
                let at = position.offsets[usize::from(id)];
                (at.x() - goal.x()).abs() + (at.y() - goal.y()).abs()
            })
            .sum();
        Cost::from(distance) / 2.0
    }

    fn is_goal(&self, position: &BlockPosition) -> bool {
        self.target
            .iter()
            .all(|&(id, goal)| position.offsets[usize::from(id)] == goal)
    }
}
