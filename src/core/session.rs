//! Match session state machine.
//!
//! A [`Session`] is owned by exactly one task (the match scheduler). Every
//! transition is a method on `&mut Session`; nothing in here performs I/O.

use alloc::string::String;
use alloc::vec::Vec;

use crate::core::common::{CellState, Outcome, SessionError, ShotResult};
use crate::core::config::DEFAULT_TURN_SECONDS;
use crate::core::coord::Coord;
use crate::core::fleet::FleetCounts;
use crate::core::grid::Grid;
use crate::core::topology::{extract_cluster, mark_exclusion_zone};

/// Whose move it is during a running match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Yours,
    Opponent,
}

/// Lifecycle of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    MenuSelection,
    MatchPending,
    InProgress(Turn),
    Ended(Outcome),
    Abandoned,
}

impl Phase {
    /// `true` for phases no further status can change.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Ended(_) | Phase::Abandoned)
    }
}

/// Coarse match state reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    Pending,
    InProgress,
    Ended,
}

/// Service status reduced to the fields the engine consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub state: MatchState,
    pub your_turn: bool,
    /// Every shot the opponent has taken at our board so far.
    pub opponent_shots: Vec<Coord>,
    pub last_outcome: Option<Outcome>,
    /// Seconds left in the current turn, if the service reports them.
    pub timer: Option<u32>,
}

/// Nickname and description of one side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub nick: String,
    pub description: String,
}

/// What a status report changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusEffect {
    /// Opponent shots applied to our board for the first time.
    pub new_opponent_shots: usize,
    pub turn_changed: bool,
    pub ended: Option<Outcome>,
}

/// What recording one of our shots changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotEffect {
    pub result: ShotResult,
    pub keeps_turn: bool,
    /// Cells of the ship this shot sank.
    pub sunk: Option<Vec<Coord>>,
    /// Cells newly ruled out around a sunk ship.
    pub excluded: usize,
    /// The sunk cluster's length had no ship left in the remaining fleet.
    pub fleet_mismatch: bool,
}

/// Pure data handed to the display after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub phase: Phase,
    pub player: Profile,
    pub opponent: Profile,
    pub own_grid: Grid,
    pub opponent_grid: Grid,
    pub countdown: u32,
    pub shots_hit: u32,
    pub shots_fired: u32,
    pub enemy_fleet: FleetCounts,
}

impl Snapshot {
    /// Hits over shots fired, zero before the first shot.
    pub fn accuracy(&self) -> f64 {
        ratio(self.shots_hit, self.shots_fired)
    }
}

/// One player's view of one match.
#[derive(Debug, Clone)]
pub struct Session {
    phase: Phase,
    player: Profile,
    opponent: Profile,
    own_ships: Vec<Coord>,
    own_grid: Grid,
    opponent_grid: Grid,
    server_timer: Option<u32>,
    shots_fired: u32,
    shots_hit: u32,
    enemy_fleet: FleetCounts,
    last_outcome: Option<Outcome>,
}

impl Session {
    /// A fresh session sitting in the menu.
    pub fn new(player: Profile) -> Self {
        Self {
            phase: Phase::MenuSelection,
            player,
            opponent: Profile::default(),
            own_ships: Vec::new(),
            own_grid: Grid::new(),
            opponent_grid: Grid::new(),
            server_timer: None,
            shots_fired: 0,
            shots_hit: 0,
            enemy_fleet: FleetCounts::full(),
            last_outcome: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player(&self) -> &Profile {
        &self.player
    }

    pub fn opponent(&self) -> &Profile {
        &self.opponent
    }

    pub fn own_ships(&self) -> &[Coord] {
        &self.own_ships
    }

    pub fn own_grid(&self) -> &Grid {
        &self.own_grid
    }

    pub fn opponent_grid(&self) -> &Grid {
        &self.opponent_grid
    }

    pub fn enemy_fleet(&self) -> &FleetCounts {
        &self.enemy_fleet
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    pub fn shots_hit(&self) -> u32 {
        self.shots_hit
    }

    /// Hits over shots fired, zero before the first shot.
    pub fn accuracy(&self) -> f64 {
        ratio(self.shots_hit, self.shots_fired)
    }

    /// The turn flag: `true` only while it is our move.
    pub fn should_fire(&self) -> bool {
        self.phase == Phase::InProgress(Turn::Yours)
    }

    /// Seconds a new turn starts with: the service's value, or the default.
    pub fn turn_seconds(&self) -> u32 {
        match self.server_timer {
            Some(secs) if secs > 0 => secs,
            _ => DEFAULT_TURN_SECONDS,
        }
    }

    /// Leave the menu for a new match. Clears everything from the previous one.
    pub fn request_match(&mut self) -> Result<(), SessionError> {
        match self.phase {
            Phase::MenuSelection | Phase::Ended(_) | Phase::Abandoned => {}
            _ => return Err(SessionError::InvalidPhase("request_match")),
        }
        self.opponent = Profile::default();
        self.own_ships.clear();
        self.own_grid = Grid::new();
        self.opponent_grid = Grid::new();
        self.server_timer = None;
        self.shots_fired = 0;
        self.shots_hit = 0;
        self.enemy_fleet = FleetCounts::full();
        self.phase = Phase::MatchPending;
        Ok(())
    }

    /// The service reported the match as started: load our fleet and both
    /// profiles, then apply the first status.
    pub fn start(
        &mut self,
        report: &StatusReport,
        own_ships: Vec<Coord>,
        player: Profile,
        opponent: Profile,
    ) -> Result<StatusEffect, SessionError> {
        if self.phase != Phase::MatchPending {
            return Err(SessionError::InvalidPhase("start"));
        }
        self.own_grid = Grid::with_ships(&own_ships);
        self.own_ships = own_ships;
        if !player.nick.is_empty() {
            self.player = player;
        }
        self.opponent = opponent;
        self.phase = Phase::InProgress(Turn::Opponent);
        let mut effect = self.apply_status(report)?;
        effect.turn_changed = self.should_fire();
        Ok(effect)
    }

    /// Fold one status poll into the session.
    ///
    /// Opponent shots are applied before the turn flag is looked at, so our
    /// board is current by the time the turn becomes ours. Terminal phases
    /// ignore further reports.
    pub fn apply_status(&mut self, report: &StatusReport) -> Result<StatusEffect, SessionError> {
        let mut effect = StatusEffect::default();
        match self.phase {
            Phase::MenuSelection => return Err(SessionError::InvalidPhase("apply_status")),
            Phase::Ended(_) | Phase::Abandoned => return Ok(effect),
            Phase::MatchPending => {
                if report.state == MatchState::Ended {
                    effect.ended = Some(self.finish(report.last_outcome));
                }
                return Ok(effect);
            }
            Phase::InProgress(_) => {}
        }

        effect.new_opponent_shots = self.apply_opponent_shots(&report.opponent_shots);
        if let Some(secs) = report.timer {
            self.server_timer = Some(secs);
        }

        match report.state {
            MatchState::Ended => effect.ended = Some(self.finish(report.last_outcome)),
            MatchState::InProgress => {
                let turn = if report.your_turn {
                    Turn::Yours
                } else {
                    Turn::Opponent
                };
                effect.turn_changed = self.phase != Phase::InProgress(turn);
                self.phase = Phase::InProgress(turn);
            }
            MatchState::Pending => {}
        }
        Ok(effect)
    }

    /// Classify opponent shots against our fleet. Cells already resolved stay as they are.
    fn apply_opponent_shots(&mut self, shots: &[Coord]) -> usize {
        let mut applied = 0;
        for &shot in shots {
            let next = match self.own_grid[shot] {
                CellState::Hit | CellState::Miss => continue,
                CellState::Ship => CellState::Hit,
                CellState::Empty | CellState::Candidate => CellState::Miss,
            };
            self.own_grid[shot] = next;
            applied += 1;
        }
        applied
    }

    /// `false` for cells already resolved on the opponent board.
    pub fn can_target(&self, coord: Coord) -> bool {
        !self.opponent_grid[coord].is_resolved()
    }

    /// Record the service's answer to one of our shots.
    ///
    /// Hits and sinks keep the turn, a miss hands it to the opponent. A sink
    /// flood-fills the hit cluster, blocks its perimeter, upgrades it to a
    /// confirmed ship and crosses one ship of that length off the enemy fleet.
    pub fn record_shot(&mut self, coord: Coord, result: ShotResult) -> Result<ShotEffect, SessionError> {
        match self.phase {
            Phase::InProgress(Turn::Yours) => {}
            Phase::InProgress(Turn::Opponent) => return Err(SessionError::NotYourTurn),
            _ => return Err(SessionError::InvalidPhase("record_shot")),
        }
        if !self.can_target(coord) {
            return Err(SessionError::AlreadyTargeted);
        }

        self.shots_fired += 1;
        let mut effect = ShotEffect {
            result,
            keeps_turn: result.keeps_turn(),
            sunk: None,
            excluded: 0,
            fleet_mismatch: false,
        };

        match result {
            ShotResult::Miss => {
                self.opponent_grid[coord] = CellState::Miss;
                self.phase = Phase::InProgress(Turn::Opponent);
            }
            ShotResult::Hit => {
                self.opponent_grid[coord] = CellState::Hit;
                self.shots_hit += 1;
            }
            ShotResult::Sunk => {
                self.opponent_grid[coord] = CellState::Hit;
                self.shots_hit += 1;
                let cluster = extract_cluster(&self.opponent_grid, coord);
                effect.excluded = mark_exclusion_zone(&mut self.opponent_grid, &cluster);
                for &cell in &cluster {
                    self.opponent_grid[cell] = CellState::Ship;
                }
                effect.fleet_mismatch = !self.enemy_fleet.sink(cluster.len());
                effect.sunk = Some(cluster);
            }
        }
        Ok(effect)
    }

    /// Leave the match voluntarily.
    pub fn abandon(&mut self) -> Result<(), SessionError> {
        match self.phase {
            Phase::MatchPending | Phase::InProgress(_) => {
                self.phase = Phase::Abandoned;
                Ok(())
            }
            _ => Err(SessionError::InvalidPhase("abandon")),
        }
    }

    fn finish(&mut self, outcome: Option<Outcome>) -> Outcome {
        let outcome = outcome.unwrap_or(Outcome::Lost);
        self.last_outcome = Some(outcome);
        self.phase = Phase::Ended(outcome);
        outcome
    }

    /// Data for the display surface.
    pub fn snapshot(&self, countdown: u32) -> Snapshot {
        Snapshot {
            phase: self.phase,
            player: self.player.clone(),
            opponent: self.opponent.clone(),
            own_grid: self.own_grid,
            opponent_grid: self.opponent_grid,
            countdown,
            shots_hit: self.shots_hit,
            shots_fired: self.shots_fired,
            enemy_fleet: self.enemy_fleet,
        }
    }
}

fn ratio(hit: u32, fired: u32) -> f64 {
    if fired == 0 {
        0.0
    } else {
        hit as f64 / fired as f64
    }
}
