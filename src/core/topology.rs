//! Ship topology over a [`Grid`]: cluster extraction and neighbour zones.
//!
//! Ships never touch, not even diagonally. That gives two cheap inferences:
//! a sunk ship is exactly the 4-connected run of hits around the sinking
//! shot, and every cell around it is water.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::core::common::CellState;
use crate::core::config::BOARD_SIZE;
use crate::core::coord::Coord;
use crate::core::grid::Grid;

/// Breadth-first walk over 4-connected `Hit` cells starting at `origin`.
///
/// Returns the cluster sorted by (row, column). An `origin` that is not a hit
/// yields an empty cluster.
pub fn extract_cluster(grid: &Grid, origin: Coord) -> Vec<Coord> {
    let mut cluster = Vec::new();
    if grid[origin] != CellState::Hit {
        return cluster;
    }
    let mut visited = [[false; BOARD_SIZE]; BOARD_SIZE];
    let mut queue = VecDeque::new();
    visited[origin.row()][origin.col()] = true;
    queue.push_back(origin);

    while let Some(cell) = queue.pop_front() {
        cluster.push(cell);
        for next in cell.neighbors4() {
            if visited[next.row()][next.col()] || grid[next] != CellState::Hit {
                continue;
            }
            visited[next.row()][next.col()] = true;
            queue.push_back(next);
        }
    }
    cluster.sort();
    cluster
}

/// Mark every empty cell around `cluster` (8-connected) as `Miss`.
///
/// Only `Empty -> Miss` transitions happen. Returns how many cells changed.
pub fn mark_exclusion_zone(grid: &mut Grid, cluster: &[Coord]) -> usize {
    let mut marked = 0;
    for &cell in cluster {
        for next in cell.neighbors8() {
            if grid[next] == CellState::Empty {
                grid[next] = CellState::Miss;
                marked += 1;
            }
        }
    }
    marked
}

/// Highlight the cells the ship under construction may grow into.
///
/// Previous highlights are cleared first. A single cell may grow in any of
/// the four directions; once the ship has two cells it may only grow along
/// its axis. Only `Empty` cells become `Candidate`.
pub fn mark_candidate_zone(grid: &mut Grid, partial_ship: &[Coord]) -> usize {
    grid.replace_all(CellState::Candidate, CellState::Empty);

    let axis = match partial_ship {
        [a, b, ..] if a.row() == b.row() => Some(Axis::Row),
        [a, b, ..] if a.col() == b.col() => Some(Axis::Col),
        _ => None,
    };

    let mut marked = 0;
    for &cell in partial_ship {
        for next in cell.neighbors4() {
            let aligned = match axis {
                Some(Axis::Row) => next.row() == cell.row(),
                Some(Axis::Col) => next.col() == cell.col(),
                None => true,
            };
            if aligned && grid[next] == CellState::Empty {
                grid[next] = CellState::Candidate;
                marked += 1;
            }
        }
    }
    marked
}

#[derive(Clone, Copy)]
enum Axis {
    Row,
    Col,
}
