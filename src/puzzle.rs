//! Board state, move model and heuristic for the N×N sliding puzzle.
//!
//! A board holds the values `1..=N²` in row-major order. The value `N²` is the
//! blank. Boards are immutable: every transition returns a new [`BoardState`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Grid coordinate of a cell.
///
/// Used as the search action: the position of the tile that is swapped with
/// the blank. Serialized as `[row, col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    fn offset(self, (dr, dc): (isize, isize)) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }

    fn distance(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<Position> for (usize, usize) {
    fn from(pos: Position) -> Self {
        (pos.row, pos.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Direction a tile slides into the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Up,
    Left,
    Down,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Offset from the blank to the tile that slides in this direction.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (1, 0),
            Move::Left => (0, 1),
            Move::Down => (-1, 0),
            Move::Right => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// Direction in which the tile at `action` slides when swapped with the
    /// blank at `blank`, or `None` when the two cells are not adjacent.
    pub fn from_action(blank: Position, action: Position) -> Option<Self> {
        Move::ALL
            .into_iter()
            .find(|m| blank.offset(m.as_offset()) == Some(action))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Down => "Down",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// Immutable N×N board.
///
/// Two boards are equal iff every cell matches, which makes the type usable as
/// a key in the frontier index and the explored set. Clones share the cell
/// storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")]
pub struct BoardState {
    size: usize,
    cells: Arc<[u32]>,
    // Index of the blank in `cells`, derived from the cells.
    blank: usize,
}

impl BoardState {
    /// Sorted goal board: `1..N²` row by row with the blank bottom right.
    pub fn goal(size: usize) -> Result<Self> {
        let area = checked_area(size)?;
        Ok(Self {
            size,
            blank: area - 1,
            cells: (1..=area as u32).collect(),
        })
    }

    /// Build a board from row-major cell values.
    pub fn from_cells(size: usize, cells: Vec<u32>) -> Result<Self> {
        let area = checked_area(size)?;
        if cells.len() != area {
            return Err(Error::invalid_board(format!(
                "expected {area} cells for a {size}x{size} board, got {}",
                cells.len()
            )));
        }

        let mut seen = vec![false; area];
        for &value in &cells {
            let index = value as usize;
            if index == 0 || index > area {
                return Err(Error::invalid_board(format!(
                    "value {value} is outside 1..={area}"
                )));
            }
            if seen[index - 1] {
                return Err(Error::invalid_board(format!("value {value} appears twice")));
            }
            seen[index - 1] = true;
        }

        let blank = cells
            .iter()
            .position(|&v| v as usize == area)
            .ok_or_else(|| Error::invalid_board("board has no blank"))?;
        Ok(Self {
            size,
            cells: cells.into(),
            blank,
        })
    }

    /// Build a board from a list of rows.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self> {
        let size = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(Error::invalid_board(format!(
                "board is not square: {size} rows but a row has {} cells",
                row.len()
            )));
        }
        Self::from_cells(size, rows.into_iter().flatten().collect())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Numeric value of the blank (N²).
    pub fn blank_value(&self) -> u32 {
        (self.size * self.size) as u32
    }

    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.cells.chunks(self.size).map(<[u32]>::to_vec).collect()
    }

    fn index_of(&self, pos: Position) -> Option<usize> {
        (pos.row < self.size && pos.col < self.size).then_some(pos.row * self.size + pos.col)
    }

    fn position_of(&self, index: usize) -> Position {
        Position::new(index / self.size, index % self.size)
    }

    /// Position of the blank cell.
    pub fn locate_blank(&self) -> Position {
        self.position_of(self.blank)
    }

    /// Every tile that can slide into the blank: below, above, right, then
    /// left of it.
    pub fn actions(&self) -> Vec<Position> {
        let blank = self.locate_blank();
        let mut actions = Vec::with_capacity(4);

        if blank.row + 1 < self.size {
            actions.push(Position::new(blank.row + 1, blank.col));
        }
        if blank.row > 0 {
            actions.push(Position::new(blank.row - 1, blank.col));
        }
        if blank.col + 1 < self.size {
            actions.push(Position::new(blank.row, blank.col + 1));
        }
        if blank.col > 0 {
            actions.push(Position::new(blank.row, blank.col - 1));
        }
        actions
    }

    /// Board obtained by swapping the blank with the tile at `action`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidAction`] if `action` is not orthogonally adjacent to
    /// the blank.
    pub fn result(&self, action: Position) -> Result<Self> {
        let invalid = Error::InvalidAction {
            row: action.row,
            col: action.col,
        };
        let Some(index) = self.index_of(action) else {
            return Err(invalid);
        };
        if self.locate_blank().distance(action) != 1 {
            return Err(invalid);
        }

        let mut cells = self.cells.to_vec();
        cells.swap(self.blank, index);
        Ok(Self {
            size: self.size,
            cells: cells.into(),
            blank: index,
        })
    }

    /// Slide the neighbouring tile in direction `movement` into the blank.
    pub fn apply_move(&self, movement: Move) -> Result<Self> {
        let tile = self
            .locate_blank()
            .offset(movement.as_offset())
            .filter(|pos| self.index_of(*pos).is_some())
            .ok_or(Error::IllegalMove { movement })?;
        self.result(tile)
    }

    /// Sum of the grid distances between every cell and its goal position.
    ///
    /// The blank is counted as tile N² with target (N−1, N−1), so the value is
    /// zero exactly when the board is solved.
    pub fn manhattan_distance(&self) -> u32 {
        let mut distance = 0;
        for i in 0..self.size {
            for j in 0..self.size {
                let target = (self.cells[i * self.size + j] - 1) as usize;
                let target_row = target / self.size;
                let target_col = target % self.size;
                distance += i.abs_diff(target_row) + j.abs_diff(target_col);
            }
        }
        distance as u32
    }

    pub fn is_solved(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(index, &value)| value as usize == index + 1)
    }

    /// Whether the goal board is reachable from this one.
    ///
    /// Odd sizes need an even number of inversions among the tiles. Even sizes
    /// need the inversion count plus the blank's row to be odd.
    pub fn is_solvable(&self) -> bool {
        let inversions = self.count_inversions();
        let empty_row = self.locate_blank().row;

        if self.size % 2 == 1 {
            inversions % 2 == 0
        } else {
            (inversions + empty_row) % 2 == 1
        }
    }

    /// Write the grid row by row. Every cell is right-aligned to the width of
    /// the blank value and passed through `style` with its position and value;
    /// the blank's text is empty padding.
    pub fn write_grid<W: fmt::Write>(
        &self,
        out: &mut W,
        mut style: impl FnMut(Position, u32, String) -> String,
    ) -> fmt::Result {
        let width = self.blank_value().to_string().len();
        for (index, &val) in self.cells.iter().enumerate() {
            let text = if val == self.blank_value() {
                format!("{:>width$}", "")
            } else {
                format!("{:>width$}", val)
            };
            write!(out, "{} ", style(self.position_of(index), val, text))?;
            if (index + 1) % self.size == 0 {
                writeln!(out)?;
            }
        }
        Ok(())
    }

    fn count_inversions(&self) -> usize {
        let blank = self.blank_value();
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &val)| val != blank)
            .map(|(i, &val)| {
                self.cells[i + 1..]
                    .iter()
                    .filter(|&&next| next != blank && next < val)
                    .count()
            })
            .sum()
    }
}

/// Number of cells of a `size`×`size` board, which must fit the `u32` values.
fn checked_area(size: usize) -> Result<usize> {
    if size < 2 {
        return Err(Error::invalid_board(format!(
            "board size must be at least 2, got {size}"
        )));
    }
    size.checked_mul(size)
        .filter(|&area| u32::try_from(area).is_ok())
        .ok_or_else(|| Error::invalid_board(format!("board size {size} is too large")))
}

impl TryFrom<Vec<Vec<u32>>> for BoardState {
    type Error = Error;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<BoardState> for Vec<Vec<u32>> {
    fn from(board: BoardState) -> Self {
        board.rows()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_grid(f, |_, _, text| text)
    }
}
