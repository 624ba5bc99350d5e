//! `NPuzzle`: the classic sliding-tile puzzle on a `cols × rows` board.
//!
//! Cells hold tile numbers `1..n` and `0` for the blank. A move slides the
//! blank one cell; moves are enumerated left, right, up, down. The goal is
//! tiles in order followed by the blank. Manhattan distance summed over
//! tiles is admissible and consistent, so solutions are optimal.

use std::fmt;
use std::hash::{Hash, Hasher};

use slidewise_search::contract::Problem;
use slidewise_search::node::Cost;

/// Largest supported cell count (tiles are stored as `u8`).
pub const MAX_CELLS: usize = 256;

/// Board construction errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Board dimensions are unusable.
    #[error("invalid board dimensions {cols}x{rows}")]
    InvalidDimensions { cols: usize, rows: usize },
    /// Cell count does not match the puzzle.
    #[error("board has {actual} cells, expected {expected}")]
    WrongSize { expected: usize, actual: usize },
    /// Cells are not a permutation of `0..n`.
    #[error("cells are not a permutation of 0..{cells}: {detail}")]
    NotPermutation { cells: usize, detail: String },
    /// A cell in the text form could not be read.
    #[error("cannot parse cell {token:?}")]
    BadCell { token: String },
}

/// Tile arrangement. Equality and hashing cover the cells only; the blank
/// index is derived from them.
#[derive(Debug, Clone)]
pub struct Board {
    cells: Box<[u8]>,
    blank: usize,
}

impl Board {
    /// The solved arrangement `1, 2, .., n-1, 0`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidDimensions`] if `cell_count` is below 2
    /// or above [`MAX_CELLS`].
    pub fn solved(cell_count: usize) -> Result<Self, BoardError> {
        if !(2..=MAX_CELLS).contains(&cell_count) {
            return Err(BoardError::InvalidDimensions {
                cols: cell_count,
                rows: 1,
            });
        }
        let cells = (1..cell_count)
            .map(|v| v as u8)
            .chain(std::iter::once(0))
            .collect::<Vec<_>>();
        Self::from_cells(cells)
    }

    /// Build a board from cells, checking they are a permutation of `0..n`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotPermutation`] on a missing or repeated tile,
    /// or [`BoardError::InvalidDimensions`] if the size is unusable.
    pub fn from_cells(cells: Vec<u8>) -> Result<Self, BoardError> {
        let n = cells.len();
        if !(2..=MAX_CELLS).contains(&n) {
            return Err(BoardError::InvalidDimensions { cols: n, rows: 1 });
        }
        let mut seen = vec![false; n];
        for &v in &cells {
            let slot = seen
                .get_mut(usize::from(v))
                .ok_or_else(|| BoardError::NotPermutation {
                    cells: n,
                    detail: format!("tile {v} out of range"),
                })?;
            if *slot {
                return Err(BoardError::NotPermutation {
                    cells: n,
                    detail: format!("tile {v} repeated"),
                });
            }
            *slot = true;
        }
        let blank = cells.iter().position(|&v| v == 0).unwrap_or_default();
        Ok(Self {
            cells: cells.into_boxed_slice(),
            blank,
        })
    }

    /// Parse a board. With commas present, cells are comma-separated
    /// numbers (`"1,2,3,0"`); otherwise each character is a single digit
    /// (`"123405786"`). Whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::BadCell`] for unreadable cells, or the errors of
    /// [`Board::from_cells`].
    pub fn parse(text: &str) -> Result<Self, BoardError> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let cells = if compact.contains(',') {
            compact
                .split(',')
                .map(|token| {
                    token.parse::<u8>().map_err(|_| BoardError::BadCell {
                        token: token.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?
        } else {
            compact
                .chars()
                .map(|c| {
                    c.to_digit(10)
                        .and_then(|d| u8::try_from(d).ok())
                        .ok_or_else(|| BoardError::BadCell {
                            token: c.to_string(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?
        };
        Self::from_cells(cells)
    }

    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Index of the blank cell.
    #[must_use]
    pub fn blank(&self) -> usize {
        self.blank
    }

    fn with_blank_at(&self, to: usize) -> Self {
        let mut cells = self.cells.clone();
        cells.swap(self.blank, to);
        Self { cells, blank: to }
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells.hash(state);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wide = self.cells.len() > 10;
        for (i, v) in self.cells.iter().enumerate() {
            if wide && i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Direction the blank travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlankMove {
    Left,
    Right,
    Up,
    Down,
}

impl BlankMove {
    /// Enumeration order of moves.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

impl fmt::Display for BlankMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "L",
            Self::Right => "R",
            Self::Up => "U",
            Self::Down => "D",
        })
    }
}

/// The puzzle rules for a fixed board size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NPuzzle {
    cols: usize,
    rows: usize,
}

impl NPuzzle {
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidDimensions`] if either side is zero or
    /// the cell count is outside `2..=MAX_CELLS`.
    pub fn new(cols: usize, rows: usize) -> Result<Self, BoardError> {
        let cells = cols.checked_mul(rows).unwrap_or(usize::MAX);
        if cols == 0 || rows == 0 || !(2..=MAX_CELLS).contains(&cells) {
            return Err(BoardError::InvalidDimensions { cols, rows });
        }
        Ok(Self { cols, rows })
    }

    /// Rules sized to fit `board`, with `cols` columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidDimensions`] if the board does not fill
    /// whole rows of `cols` cells.
    pub fn for_board(cols: usize, board: &Board) -> Result<Self, BoardError> {
        let cells = board.cells.len();
        if cols == 0 || cells % cols != 0 {
            return Err(BoardError::InvalidDimensions {
                cols,
                rows: cells.checked_div(cols).unwrap_or_default(),
            });
        }
        Self::new(cols, cells / cols)
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The goal arrangement for this size.
    ///
    /// # Errors
    ///
    /// Never fails for a puzzle built by [`NPuzzle::new`].
    pub fn solved_board(&self) -> Result<Board, BoardError> {
        Board::solved(self.cols * self.rows)
    }

    /// Check that `board` has this puzzle's cell count.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::WrongSize`] on mismatch.
    pub fn check(&self, board: &Board) -> Result<(), BoardError> {
        let expected = self.cols * self.rows;
        if board.cells.len() != expected {
            return Err(BoardError::WrongSize {
                expected,
                actual: board.cells.len(),
            });
        }
        Ok(())
    }

    fn blank_target(&self, blank: usize, mv: BlankMove) -> Option<usize> {
        let (x, y) = (blank % self.cols, blank / self.cols);
        match mv {
            BlankMove::Left if x > 0 => Some(blank - 1),
            BlankMove::Right if x + 1 < self.cols => Some(blank + 1),
            BlankMove::Up if y > 0 => Some(blank - self.cols),
            BlankMove::Down if y + 1 < self.rows => Some(blank + self.cols),
            _ => None,
        }
    }
}

impl Problem for NPuzzle {
    type Position = Board;
    type Move = BlankMove;

    #[allow(clippy::unnecessary_literal_bound)]
    fn problem_id(&self) -> &str {
        "n_puzzle"
    }

    fn enumerate_moves(&self, position: &Board, out: &mut Vec<BlankMove>) {
        out.extend(
            BlankMove::ALL
                .into_iter()
                .filter(|&mv| self.blank_target(position.blank, mv).is_some()),
        );
    }

    fn apply(&self, position: &Board, mv: &BlankMove) -> Board {
        match self.blank_target(position.blank, *mv) {
            Some(to) => position.with_blank_at(to),
            None => position.clone(),
        }
    }

    fn invert(&self, position_after: &Board, mv: &BlankMove) -> Board {
        self.apply(position_after, &mv.opposite())
    }

    fn step_cost(&self, _position: &Board, _mv: &BlankMove) -> Cost {
        1.0
    }

    fn heuristic(&self, position: &Board) -> Cost {
        let distance: usize = position
            .cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v > 0)
            .map(|(i, &v)| {
                let home = usize::from(v) - 1;
                (i % self.cols).abs_diff(home % self.cols)
                    + (i / self.cols).abs_diff(home / self.cols)
            })
            .sum();
        distance as Cost
    }

    fn is_goal(&self, position: &Board) -> bool {
        let n = position.cells.len();
        position.cells[n - 1] == 0
            && position.cells[..n - 1]
                .iter()
                .zip(1..)
                .all(|(&v, expected)| usize::from(v) == expected)
    }
}
