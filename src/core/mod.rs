//! Core warships engine (no_std compatible)
//!
//! Pure board and session logic: the coordinate codec, the cell grid, ship
//! topology, fleet bookkeeping and the session state machine. Nothing here
//! touches the network or the terminal.

pub mod common;
pub mod config;
pub mod coord;
pub mod fleet;
pub mod grid;
pub mod session;
pub mod topology;

// Re-export commonly used types
pub use common::{CellState, CoordError, Outcome, PlacementError, SessionError, ShotResult};
pub use config::*;
pub use coord::Coord;
pub use fleet::{FleetBuilder, FleetCounts, PlacementProgress};
pub use grid::Grid;
pub use session::{
    MatchState, Phase, Profile, Session, ShotEffect, Snapshot, StatusEffect, StatusReport, Turn,
};
pub use topology::{extract_cluster, mark_candidate_zone, mark_exclusion_zone};
