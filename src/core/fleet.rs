//! Fleet template bookkeeping: the opponent's remaining ships and manual
//! placement of our own fleet.

use alloc::vec::Vec;
use rand::Rng;

use crate::core::common::{CellState, PlacementError};
use crate::core::config::{placement_order, BOARD_SIZE, FLEET, NUM_CLASSES, NUM_SHIPS};
use crate::core::coord::Coord;
use crate::core::grid::Grid;
use crate::core::topology::{mark_candidate_zone, mark_exclusion_zone};

/// Remaining ship counts keyed by ship length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FleetCounts {
    remaining: [usize; NUM_CLASSES],
}

impl FleetCounts {
    /// A complete fleet: `{4:1, 3:2, 2:3, 1:4}`.
    pub fn full() -> Self {
        Self {
            remaining: core::array::from_fn(|i| FLEET[i].1),
        }
    }

    /// Ships of `len` still afloat.
    pub fn remaining(&self, len: usize) -> usize {
        FLEET
            .iter()
            .position(|(l, _)| *l == len)
            .map(|i| self.remaining[i])
            .unwrap_or(0)
    }

    /// Record one sunk ship of `len`. Returns `false` if no such ship was left.
    pub fn sink(&mut self, len: usize) -> bool {
        match FLEET.iter().position(|(l, _)| *l == len) {
            Some(i) if self.remaining[i] > 0 => {
                self.remaining[i] -= 1;
                true
            }
            _ => false,
        }
    }

    /// Ships still afloat across all lengths.
    pub fn total(&self) -> usize {
        self.remaining.iter().sum()
    }

    /// `(length, remaining)` pairs, longest first.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        FLEET.iter().zip(self.remaining.iter()).map(|((len, _), n)| (*len, *n))
    }
}

impl Default for FleetCounts {
    fn default() -> Self {
        Self::full()
    }
}

/// What happened after a cell was accepted by [`FleetBuilder::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementProgress {
    /// The current ship grew and still needs `missing` cells.
    Extended { missing: usize },
    /// A ship of `len` was finished; more ships follow.
    ShipFinished { len: usize },
    /// The last ship of the template was finished.
    FleetFinished,
}

/// Builds a fleet one cell at a time, longest ships first.
///
/// Finished ships get their perimeter blocked with `Miss`, the ship under
/// construction gets `Candidate` highlights for where it may grow.
#[derive(Debug, Clone)]
pub struct FleetBuilder {
    grid: Grid,
    ships: Vec<Vec<Coord>>,
    current: Vec<Coord>,
    lengths: [usize; NUM_SHIPS],
}

impl FleetBuilder {
    pub fn new() -> Self {
        let mut lengths = [0; NUM_SHIPS];
        for (slot, len) in lengths.iter_mut().zip(placement_order()) {
            *slot = len;
        }
        Self {
            grid: Grid::new(),
            ships: Vec::with_capacity(NUM_SHIPS),
            current: Vec::new(),
            lengths,
        }
    }

    /// Placement grid, including blocked and candidate cells.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Length of the ship currently being placed, `None` once the fleet is done.
    pub fn current_len(&self) -> Option<usize> {
        self.lengths.get(self.ships.len()).copied()
    }

    /// Cells of the ship under construction.
    pub fn current_ship(&self) -> &[Coord] {
        &self.current
    }

    pub fn is_complete(&self) -> bool {
        self.ships.len() == NUM_SHIPS
    }

    /// Add one cell to the ship under construction.
    pub fn add(&mut self, coord: Coord) -> Result<PlacementProgress, PlacementError> {
        let target = self.current_len().ok_or(PlacementError::FleetComplete)?;
        match self.grid[coord] {
            CellState::Ship => return Err(PlacementError::Occupied),
            CellState::Miss | CellState::Hit => return Err(PlacementError::TouchesShip),
            CellState::Empty if !self.current.is_empty() => {
                return Err(PlacementError::NotCandidate)
            }
            CellState::Empty | CellState::Candidate => {}
        }

        self.grid[coord] = CellState::Ship;
        self.current.push(coord);

        if self.current.len() < target {
            mark_candidate_zone(&mut self.grid, &self.current);
            return Ok(PlacementProgress::Extended {
                missing: target - self.current.len(),
            });
        }

        self.grid.replace_all(CellState::Candidate, CellState::Empty);
        let ship = core::mem::take(&mut self.current);
        mark_exclusion_zone(&mut self.grid, &ship);
        self.ships.push(ship);
        if self.is_complete() {
            Ok(PlacementProgress::FleetFinished)
        } else {
            Ok(PlacementProgress::ShipFinished { len: target })
        }
    }

    /// Throw away the cells of the ship under construction.
    pub fn restart_ship(&mut self) {
        for cell in self.current.drain(..) {
            self.grid[cell] = CellState::Empty;
        }
        self.grid.replace_all(CellState::Candidate, CellState::Empty);
    }

    /// Place the remaining ships at random, restarting from scratch when the
    /// board gets too crowded to fit the next ship.
    pub fn random<R: Rng>(rng: &mut R) -> Vec<Coord> {
        loop {
            let mut builder = FleetBuilder::new();
            if builder.fill_randomly(rng) {
                if let Some(fleet) = builder.finish() {
                    return fleet;
                }
            }
        }
    }

    fn fill_randomly<R: Rng>(&mut self, rng: &mut R) -> bool {
        while let Some(len) = self.current_len() {
            let mut placed = false;
            for _ in 0..100 {
                let vertical: bool = rng.random();
                let (max_r, max_c) = if vertical {
                    (BOARD_SIZE - len, BOARD_SIZE - 1)
                } else {
                    (BOARD_SIZE - 1, BOARD_SIZE - len)
                };
                let row = rng.random_range(0..=max_r);
                let col = rng.random_range(0..=max_c);
                let cells = (0..len).filter_map(|i| {
                    let (r, c) = if vertical { (row + i, col) } else { (row, col + i) };
                    Coord::new(r, c).ok()
                });
                if cells.map(|cell| self.add(cell)).all(|res| res.is_ok()) {
                    placed = true;
                    break;
                }
                self.restart_ship();
            }
            if !placed {
                return false;
            }
        }
        true
    }

    /// Every ship coordinate of a complete fleet, `None` if ships are missing.
    pub fn finish(self) -> Option<Vec<Coord>> {
        if !self.is_complete() {
            return None;
        }
        Some(self.ships.into_iter().flatten().collect())
    }
}

impl Default for FleetBuilder {
    fn default() -> Self {
        Self::new()
    }
}
