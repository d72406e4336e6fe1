//! Fixed 10×10 grid of cell states. Pure storage: callers enforce the rules.

use core::fmt;

use super::common::{BoardError, CellState};
use super::config::BOARD_SIZE;

#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    cells: [[CellState; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Create an all-EMPTY board.
    pub fn new() -> Self {
        Self {
            cells: [[CellState::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    fn check(row: usize, col: usize) -> Result<(), BoardError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(BoardError::OutOfBounds { row, col });
        }
        Ok(())
    }

    pub fn get(&self, row: usize, col: usize) -> Result<CellState, BoardError> {
        Self::check(row, col)?;
        Ok(self.cells[row][col])
    }

    /// Overwrite the state at (`row`, `col`) unconditionally.
    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<(), BoardError> {
        Self::check(row, col)?;
        self.cells[row][col] = state;
        Ok(())
    }

    /// Raw rows, row-major.
    pub fn rows(&self) -> &[[CellState; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Iterate over every coordinate with its state, row-major.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, &s)| ((r, c), s)))
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.iter().filter(|&(_, s)| s == state).count()
    }

    /// Returns `true` when every cell is EMPTY.
    pub fn is_clear(&self) -> bool {
        self.count(CellState::Empty) == BOARD_SIZE * BOARD_SIZE
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for row in self.cells.iter() {
            write!(f, "  ")?;
            for cell in row.iter() {
                let ch = match cell {
                    CellState::Empty => '.',
                    CellState::Ship => 'S',
                    CellState::Hit => 'X',
                    CellState::Miss => 'o',
                    CellState::Mine => '*',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}
