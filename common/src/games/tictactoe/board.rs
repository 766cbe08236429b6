use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{CELL_COUNT, Cell, Mark};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    OutOfRange(usize),
    Occupied(usize),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::OutOfRange(index) => write!(f, "Cell {} is outside the board", index),
            MoveError::Occupied(index) => write!(f, "Cell {} is already marked", index),
        }
    }
}

impl std::error::Error for MoveError {}

/// Nine cells in row-major order. Serialized as a plain array of
/// `null | "X" | "O"`, which is also the room document layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Cell {
        self.cells.get(index).copied().flatten()
    }

    pub fn is_empty_cell(&self, index: usize) -> bool {
        index < CELL_COUNT && self.cells[index].is_none()
    }

    /// Returns a copy of the board with `mark` at `index`; `self` is never modified.
    pub fn place(&self, index: usize, mark: Mark) -> Result<Board, MoveError> {
        match self.cells.get(index) {
            None => Err(MoveError::OutOfRange(index)),
            Some(Some(_)) => Err(MoveError::Occupied(index)),
            Some(None) => {
                let mut next = *self;
                next.cells[index] = Some(mark);
                Ok(next)
            }
        }
    }

    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    pub fn mark_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub(crate) fn set(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in chunk {
                let symbol = cell.map(|mark| mark.as_str()).unwrap_or("_");
                f.write_str(symbol)?;
            }
        }
        Ok(())
    }
}

/// Parses the `Display` layout back into a board: rows of `X`, `O` or `_`.
#[cfg(test)]
pub(crate) fn board_from(layout: &str) -> Board {
    let mut cells = [None; CELL_COUNT];
    let symbols = layout.chars().filter(|c| !c.is_whitespace());
    for (index, symbol) in symbols.enumerate() {
        cells[index] = match symbol {
            'X' => Some(Mark::X),
            'O' => Some(Mark::O),
            _ => None,
        };
    }
    Board::from_cells(cells)
}
