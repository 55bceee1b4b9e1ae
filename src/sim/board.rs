//! The tile grid
//!
//! Cells hold the tile value directly (0 = empty, otherwise 2, 4, 8, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{GRID_SIZE, MAX_TILE};

/// A grid position (row 0 is the top, col 0 is the left)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step by a signed delta, returning None when it leaves the grid
    pub fn offset(self, row_delta: isize, col_delta: isize) -> Option<Coord> {
        let row = self.row.checked_add_signed(row_delta)?;
        let col = self.col.checked_add_signed(col_delta)?;
        (row < GRID_SIZE && col < GRID_SIZE).then_some(Coord { row, col })
    }
}

/// Two tiles can merge if they match and the result stays within MAX_TILE
#[inline]
pub fn can_merge(a: u32, b: u32) -> bool {
    a != 0 && a == b && a < MAX_TILE
}

/// Square grid of tile values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[u32; GRID_SIZE]; GRID_SIZE],
}

impl Board {
    /// A board with no tiles
    pub const EMPTY: Board = Board {
        cells: [[0; GRID_SIZE]; GRID_SIZE],
    };

    pub const fn from_rows(cells: [[u32; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { cells }
    }

    /// Copy of the rows
    pub fn rows(&self) -> [[u32; GRID_SIZE]; GRID_SIZE] {
        self.cells
    }

    #[inline]
    pub fn get(&self, at: Coord) -> u32 {
        self.cells[at.row][at.col]
    }

    #[inline]
    pub fn set(&mut self, at: Coord, value: u32) {
        self.cells[at.row][at.col] = value;
    }

    /// All coordinates in row-major order
    pub fn coords() -> impl Iterator<Item = Coord> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| Coord { row, col }))
    }

    /// Empty coordinates in row-major order
    pub fn empty_cells(&self) -> Vec<Coord> {
        Self::coords().filter(|&c| self.get(c) == 0).collect()
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v != 0).count()
    }

    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().flatten().map(|&v| u64::from(v)).sum()
    }

    pub fn highest_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// True if some move could still change the board: an empty cell exists,
    /// or two orthogonal neighbours hold the same value.
    pub fn can_move(&self) -> bool {
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let cell = self.cells[row][col];
                if cell == 0 {
                    return true;
                }
                if col + 1 < GRID_SIZE && can_merge(cell, self.cells[row][col + 1]) {
                    return true;
                }
                if row + 1 < GRID_SIZE && can_merge(cell, self.cells[row + 1][col]) {
                    return true;
                }
            }
        }
        false
    }

    /// Every cell is empty or a power of two in 2..=MAX_TILE
    pub fn is_valid(&self) -> bool {
        self.cells
            .iter()
            .flatten()
            .all(|&v| v == 0 || (v >= 2 && v <= MAX_TILE && v.is_power_of_two()))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f, "-----------------------------")?;
            }
            let line: Vec<String> = row
                .iter()
                .map(|&v| {
                    if v == 0 {
                        format!("{:^6}", "")
                    } else {
                        format!("{:^6}", v)
                    }
                })
                .collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}

impl From<[[u32; GRID_SIZE]; GRID_SIZE]> for Board {
    fn from(cells: [[u32; GRID_SIZE]; GRID_SIZE]) -> Self {
        Board::from_rows(cells)
    }
}
