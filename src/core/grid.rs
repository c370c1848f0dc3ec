//! Fixed-size cell grid shared by both boards.

use core::fmt;
use core::ops::{Index, IndexMut};

use crate::core::common::CellState;
use crate::core::config::BOARD_SIZE;
use crate::core::coord::Coord;

/// A 10x10 board of [`CellState`]s indexed by [`Coord`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cells: [[CellState; BOARD_SIZE]; BOARD_SIZE],
}

impl Grid {
    /// An all-empty grid.
    pub fn new() -> Self {
        Self {
            cells: [[CellState::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// A grid with a ship segment on every coordinate in `ships`.
    pub fn with_ships<'a>(ships: impl IntoIterator<Item = &'a Coord>) -> Self {
        let mut grid = Self::new();
        for &coord in ships {
            grid[coord] = CellState::Ship;
        }
        grid
    }

    pub fn get(&self, coord: Coord) -> CellState {
        self.cells[coord.row()][coord.col()]
    }

    pub fn set(&mut self, coord: Coord, state: CellState) {
        self.cells[coord.row()][coord.col()] = state;
    }

    /// Rows of the grid, top to bottom.
    pub fn rows(&self) -> &[[CellState; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().flatten().filter(|&&s| s == state).count()
    }

    /// Coordinates of every cell currently in `state`.
    pub fn coords_in(&self, state: CellState) -> impl Iterator<Item = Coord> + '_ {
        Coord::all().filter(move |&c| self.get(c) == state)
    }

    /// Turn every cell in `from` into `to`.
    pub fn replace_all(&mut self, from: CellState, to: CellState) {
        for cell in self.cells.iter_mut().flatten() {
            if *cell == from {
                *cell = to;
            }
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Coord> for Grid {
    type Output = CellState;

    fn index(&self, coord: Coord) -> &CellState {
        &self.cells[coord.row()][coord.col()]
    }
}

impl IndexMut<Coord> for Grid {
    fn index_mut(&mut self, coord: Coord) -> &mut CellState {
        &mut self.cells[coord.row()][coord.col()]
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let ch = match cell {
                    CellState::Empty => '.',
                    CellState::Ship => 'S',
                    CellState::Hit => 'X',
                    CellState::Miss => 'o',
                    CellState::Candidate => '+',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
