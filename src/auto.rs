use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tokio::time::{sleep, Duration};

use crate::core::{CellState, Coord, Grid, Snapshot};
use crate::surface::TargetInput;

/// Hunt/target input that plays without a human.
///
/// While some hit is not yet part of a sunk ship it fires next to it;
/// otherwise it picks a random unexplored cell.
pub struct AutoTargeter {
    rng: SmallRng,
    delay: Duration,
}

impl AutoTargeter {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_rng(&mut rand::rng()))
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            rng,
            delay: Duration::ZERO,
        }
    }

    /// Pause before every shot so a watching human can follow.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Choose a target on `grid`, `None` when nothing is left to shoot at.
    pub fn choose(&mut self, grid: &Grid) -> Option<Coord> {
        let follow_up: Vec<Coord> = grid
            .coords_in(CellState::Hit)
            .flat_map(|hit| hit.neighbors4())
            .filter(|&c| grid[c] == CellState::Empty)
            .collect();
        if let Some(&target) = follow_up.choose(&mut self.rng) {
            return Some(target);
        }
        let open: Vec<Coord> = grid.coords_in(CellState::Empty).collect();
        open.choose(&mut self.rng).copied()
    }
}

impl Default for AutoTargeter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TargetInput for AutoTargeter {
    async fn next_target(&mut self, snapshot: &Snapshot) -> Option<Coord> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        self.choose(&snapshot.opponent_grid)
    }
}
