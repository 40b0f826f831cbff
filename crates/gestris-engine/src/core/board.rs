use std::fmt;

use serde::{Deserialize, Serialize};

use crate::OutOfBoundsError;

use super::color::PieceColor;

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Nothing has been merged here.
    #[default]
    Empty,
    /// Settled block left by a merged piece.
    Filled(PieceColor),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn color(self) -> Option<PieceColor> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(color),
        }
    }

    const fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Filled(color) => color.as_char(),
        }
    }

    const fn from_char(c: char) -> Option<Self> {
        if c == '.' {
            return Some(Cell::Empty);
        }
        match PieceColor::from_char(c) {
            Some(color) => Some(Cell::Filled(color)),
            None => None,
        }
    }
}

/// The settled cells of the playfield.
///
/// The board is a fixed 10-column × 20-row grid. Column 0 is the left edge and
/// row 0 is the top. Cells only ever go from [`Cell::Empty`] to
/// [`Cell::Filled`]; nothing clears them during a game.
///
/// Queries outside the grid fail with [`OutOfBoundsError`] rather than
/// answering "occupied", so callers can tell a wall from a settled block.
///
/// # Example
///
/// ```
/// use gestris_engine::{Board, PieceColor};
///
/// let mut board = Board::EMPTY;
/// board.set_cell(0, 19, PieceColor::Red).unwrap();
///
/// assert_eq!(board.is_occupied(0, 19), Ok(true));
/// assert_eq!(board.is_occupied(1, 19), Ok(false));
/// assert!(board.is_occupied(-1, 19).is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    rows: [[Cell; Board::WIDTH]; Board::HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = 10;
    pub const HEIGHT: usize = 20;

    pub const EMPTY: Self = Self {
        rows: [[Cell::Empty; Board::WIDTH]; Board::HEIGHT],
    };

    /// Converts signed board coordinates into array indices, if they are on the grid.
    fn index(col: i32, row: i32) -> Result<(usize, usize), OutOfBoundsError> {
        let x = usize::try_from(col).ok().filter(|x| *x < Self::WIDTH);
        let y = usize::try_from(row).ok().filter(|y| *y < Self::HEIGHT);
        x.zip(y).ok_or(OutOfBoundsError { col, row })
    }

    /// Returns the cell at `(col, row)`.
    pub fn cell(&self, col: i32, row: i32) -> Result<Cell, OutOfBoundsError> {
        let (x, y) = Self::index(col, row)?;
        Ok(self.rows[y][x])
    }

    /// Returns whether `(col, row)` holds a settled block.
    pub fn is_occupied(&self, col: i32, row: i32) -> Result<bool, OutOfBoundsError> {
        self.cell(col, row).map(|cell| !cell.is_empty())
    }

    /// Writes `color` into the cell at `(col, row)`.
    pub fn set_cell(
        &mut self,
        col: i32,
        row: i32,
        color: PieceColor,
    ) -> Result<(), OutOfBoundsError> {
        let (x, y) = Self::index(col, row)?;
        self.rows[y][x] = Cell::Filled(color);
        Ok(())
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; Board::WIDTH]> {
        self.rows.iter()
    }

    /// Iterates over every settled block as `(col, row, color)`.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, PieceColor)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(x, cell)| cell.color().map(|color| (x, y, color)))
        })
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.occupied_cells().count()
    }

    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|cells| cells.iter().all(|cell| !cell.is_empty()))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row {
                write!(f, "{}", cell.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for row in &self.rows {
            let line = row.iter().map(|cell| cell.as_char()).collect::<String>();
            writeln!(f, "    {line}")?;
        }
        write!(f, "}}")
    }
}

// Format: 20 strings of 10 characters, '.' for empty, color code otherwise.
impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let rows = self
            .rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.as_char()).collect::<String>())
            .collect::<Vec<_>>();
        rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let lines = Vec::<String>::deserialize(deserializer)?;
        if lines.len() != Board::HEIGHT {
            return Err(serde::de::Error::custom(format!(
                "expected {} rows, got {}",
                Board::HEIGHT,
                lines.len()
            )));
        }

        let mut board = Board::EMPTY;
        for (y, line) in lines.iter().enumerate() {
            let count = line.chars().count();
            if count != Board::WIDTH {
                return Err(serde::de::Error::custom(format!(
                    "row {y}: expected {} cells, got {count}",
                    Board::WIDTH
                )));
            }
            for (x, c) in line.chars().enumerate() {
                board.rows[y][x] = Cell::from_char(c).ok_or_else(|| {
                    serde::de::Error::custom(format!("row {y}: invalid cell '{c}'"))
                })?;
            }
        }
        Ok(board)
    }
}
