//! Collaborator surfaces the engine talks to: where targets and placement
//! cells come from, and where snapshots go.

use crate::core::{Coord, Grid, PlacementError, PlacementProgress, Snapshot};

/// Source of target cells during our turn.
#[async_trait::async_trait]
pub trait TargetInput: Send {
    /// Wait for the next target. `None` means the player wants out of the match.
    ///
    /// The scheduler may drop this future at any time when the match is
    /// cancelled, so implementations must not lose input that was not yet returned.
    async fn next_target(&mut self, snapshot: &Snapshot) -> Option<Coord>;
}

/// One step of manual fleet placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStep {
    Cell(Coord),
    /// Discard the ship under construction and start it again.
    Undo,
    Cancelled,
}

/// Source of cells while building a fleet by hand.
#[async_trait::async_trait]
pub trait PlacementInput: Send {
    /// Wait for the next placement step. `ship_len` is the length of the ship being built.
    async fn next_step(&mut self, grid: &Grid, ship_len: usize) -> PlacementStep;

    /// Feedback on the last step.
    fn placement_result(&mut self, _coord: Coord, _result: &Result<PlacementProgress, PlacementError>) {}
}

/// Receiver of state snapshots. Must not block.
pub trait DisplaySink: Send {
    fn show(&mut self, snapshot: &Snapshot);

    /// One-line notice such as "You won!".
    fn notice(&mut self, _message: &str) {}
}

/// Display that drops everything, for unattended runs.
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn show(&mut self, _snapshot: &Snapshot) {}
}
