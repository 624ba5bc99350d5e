//! `GridMap`: four-connected path-finding on a character grid.
//!
//! Cells are given row-major; `'X'` is a wall, anything else is open.
//! Moves are unit steps left, right, up, down (enumerated in that order),
//! each costing 1. The heuristic is Manhattan distance to the target,
//! which is admissible and consistent.

use std::fmt;

use slidewise_search::contract::Problem;
use slidewise_search::node::Cost;

/// Cell character that blocks movement.
pub const WALL: char = 'X';

/// Grid parsing and placement errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Width was zero.
    #[error("grid width must be at least 1")]
    ZeroWidth,
    /// No cells were given.
    #[error("grid has no cells")]
    Empty,
    /// Cell count is not a multiple of the width.
    #[error("{cells} cells do not fill rows of width {width}")]
    Ragged { cells: usize, width: usize },
    /// A coordinate lies outside the grid.
    #[error("({x},{y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    /// A coordinate names a wall cell.
    #[error("({x},{y}) is a wall")]
    Blocked { x: i32, y: i32 },
}

/// A cell coordinate. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// A unit step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridMove {
    pub dx: i32,
    pub dy: i32,
}

impl GridMove {
    pub const LEFT: Self = Self { dx: -1, dy: 0 };
    pub const RIGHT: Self = Self { dx: 1, dy: 0 };
    pub const UP: Self = Self { dx: 0, dy: -1 };
    pub const DOWN: Self = Self { dx: 0, dy: 1 };

    /// Enumeration order of moves.
    pub const ALL: [Self; 4] = [Self::LEFT, Self::RIGHT, Self::UP, Self::DOWN];
}

impl fmt::Display for GridMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.dx, self.dy) {
            (-1, 0) => f.write_str("L"),
            (1, 0) => f.write_str("R"),
            (0, -1) => f.write_str("U"),
            (0, 1) => f.write_str("D"),
            (dx, dy) => write!(f, "({dx},{dy})"),
        }
    }
}

/// A rectangular grid with walls and a single target cell.
#[derive(Debug, Clone)]
pub struct GridMap {
    width: usize,
    height: usize,
    walls: Vec<bool>,
    target: GridPos,
}

impl GridMap {
    /// Parse `text` as row-major cells of the given width. Line breaks are
    /// ignored, so the text may be one line or one line per row.
    ///
    /// The target defaults to `(0,0)`; set it with [`GridMap::with_target`].
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] on zero width, no cells, or a cell count that
    /// is not a multiple of `width`.
    pub fn parse(width: usize, text: &str) -> Result<Self, GridError> {
        if width == 0 {
            return Err(GridError::ZeroWidth);
        }
        let walls: Vec<bool> = text
            .chars()
            .filter(|c| !matches!(c, '\n' | '\r'))
            .map(|c| c == WALL)
            .collect();
        if walls.is_empty() {
            return Err(GridError::Empty);
        }
        if walls.len() % width != 0 {
            return Err(GridError::Ragged {
                cells: walls.len(),
                width,
            });
        }
        Ok(Self {
            width,
            height: walls.len() / width,
            walls,
            target: GridPos::default(),
        })
    }

    /// Build a grid from equal-length rows.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Ragged`] if rows differ in length, or the errors
    /// of [`GridMap::parse`].
    pub fn from_rows(rows: &[&str]) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, |row| row.chars().count());
        if let Some(bad) = rows.iter().find(|row| row.chars().count() != width) {
            return Err(GridError::Ragged {
                cells: bad.chars().count(),
                width,
            });
        }
        Self::parse(width, &rows.concat())
    }

    /// Set the target cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `target` is off the grid. A
    /// walled target is accepted; the search simply finds no path.
    pub fn with_target(mut self, target: GridPos) -> Result<Self, GridError> {
        self.index(target)?;
        self.target = target;
        Ok(self)
    }

    /// Check that `pos` is on the grid and open, as required of a source.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] or [`GridError::Blocked`].
    pub fn check_open(&self, pos: GridPos) -> Result<(), GridError> {
        if self.walls[self.index(pos)?] {
            return Err(GridError::Blocked { x: pos.x, y: pos.y });
        }
        Ok(())
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn target(&self) -> GridPos {
        self.target
    }

    /// Whether `pos` is on the grid and not a wall.
    #[must_use]
    pub fn is_open(&self, pos: GridPos) -> bool {
        self.index(pos).is_ok_and(|i| !self.walls[i])
    }

    fn index(&self, pos: GridPos) -> Result<usize, GridError> {
        let out_of_bounds = || GridError::OutOfBounds {
            x: pos.x,
            y: pos.y,
            width: self.width,
            height: self.height,
        };
        let x = usize::try_from(pos.x).map_err(|_| out_of_bounds())?;
        let y = usize::try_from(pos.y).map_err(|_| out_of_bounds())?;
        if x >= self.width || y >= self.height {
            return Err(out_of_bounds());
        }
        Ok(y * self.width + x)
    }
}

fn step(pos: GridPos, mv: GridMove) -> GridPos {
    GridPos::new(pos.x + mv.dx, pos.y + mv.dy)
}

impl Problem for GridMap {
    type Position = GridPos;
    type Move = GridMove;

    #[allow(clippy::unnecessary_literal_bound)]
    fn problem_id(&self) -> &str {
        "grid_map"
    }

    fn enumerate_moves(&self, position: &GridPos, out: &mut Vec<GridMove>) {
        out.extend(
            GridMove::ALL
                .into_iter()
                .filter(|&mv| self.is_open(step(*position, mv))),
        );
    }

    fn apply(&self, position: &GridPos, mv: &GridMove) -> GridPos {
        step(*position, *mv)
    }

    fn invert(&self, position_after: &GridPos, mv: &GridMove) -> GridPos {
        GridPos::new(position_after.x - mv.dx, position_after.y - mv.dy)
    }

    fn step_cost(&self, _position: &GridPos, _mv: &GridMove) -> Cost {
        1.0
    }

    fn heuristic(&self, position: &GridPos) -> Cost {
        let dx = (position.x - self.target.x).abs();
        let dy = (position.y - self.target.y).abs();
        Cost::from(dx + dy)
    }

    fn is_goal(&self, position: &GridPos) -> bool {
        *position == self.target
    }
}
