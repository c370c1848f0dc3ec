//! A self-contained match against a random-firing bot, no network needed.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use log::debug;
use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;

use crate::core::{Coord, FleetBuilder, ShotResult, DEFAULT_TURN_SECONDS};
use crate::domain::{DescriptionResponse, ListEntry, PlayerStats, StatusResponse};
use crate::service::{GameService, MatchRequest, ServiceError};

const BOT_NICK: &str = "local-bot";

struct Referee {
    rng: SmallRng,
    request: Option<MatchRequest>,
    player_fleet: HashSet<Coord>,
    bot_ships: Vec<Vec<Coord>>,
    player_shots: HashSet<Coord>,
    bot_shots: Vec<Coord>,
    player_turn: bool,
    outcome: Option<&'static str>,
}

impl Referee {
    fn new(rng: SmallRng) -> Self {
        Self {
            rng,
            request: None,
            player_fleet: HashSet::new(),
            bot_ships: Vec::new(),
            player_shots: HashSet::new(),
            bot_shots: Vec::new(),
            player_turn: true,
            outcome: None,
        }
    }

    fn started(&self) -> Result<(), ServiceError> {
        if self.request.is_none() {
            return Err(ServiceError::Protocol("no session token, create a match first".into()));
        }
        Ok(())
    }

    /// Split a flat fleet into ships by joining orthogonal neighbours.
    fn split_ships(fleet: &[Coord]) -> Vec<Vec<Coord>> {
        let cells: HashSet<Coord> = fleet.iter().copied().collect();
        let mut seen = HashSet::new();
        let mut ships = Vec::new();
        for &start in fleet {
            if !seen.insert(start) {
                continue;
            }
            let mut ship = vec![start];
            let mut i = 0;
            while i < ship.len() {
                for next in ship[i].neighbors4() {
                    if cells.contains(&next) && seen.insert(next) {
                        ship.push(next);
                    }
                }
                i += 1;
            }
            ships.push(ship);
        }
        ships
    }

    fn bot_turn(&mut self) {
        loop {
            let shot = Coord::all()
                .filter(|c| !self.bot_shots.contains(c))
                .choose(&mut self.rng);
            let Some(shot) = shot else { return };
            self.bot_shots.push(shot);
            if !self.player_fleet.contains(&shot) {
                return;
            }
            let sunk_all = self
                .player_fleet
                .iter()
                .all(|cell| self.bot_shots.contains(cell));
            if sunk_all {
                self.outcome = Some("lose");
                return;
            }
        }
    }

    fn fire(&mut self, coord: Coord) -> Result<ShotResult, ServiceError> {
        self.started()?;
        if self.outcome.is_some() || !self.player_turn {
            return Err(ServiceError::Status(400));
        }
        self.player_shots.insert(coord);
        let ship = self.bot_ships.iter().find(|ship| ship.contains(&coord));
        let result = match ship {
            None => ShotResult::Miss,
            Some(ship) if ship.iter().all(|c| self.player_shots.contains(c)) => ShotResult::Sunk,
            Some(_) => ShotResult::Hit,
        };
        match result {
            ShotResult::Miss => {
                self.player_turn = false;
                self.bot_turn();
                self.player_turn = true;
            }
            ShotResult::Sunk => {
                let all_sunk = self
                    .bot_ships
                    .iter()
                    .flatten()
                    .all(|c| self.player_shots.contains(c));
                if all_sunk {
                    self.outcome = Some("win");
                }
            }
            ShotResult::Hit => {}
        }
        debug!("local referee: {} -> {:?}", coord, result);
        Ok(result)
    }

    fn status(&self) -> Result<StatusResponse, ServiceError> {
        self.started()?;
        let nick = self.request.as_ref().map(|r| r.nick.clone()).unwrap_or_default();
        let mut status = match self.outcome {
            Some(last) => StatusResponse::ended(last),
            None => StatusResponse::in_progress(self.player_turn, self.bot_shots.clone()),
        };
        status.opp_shots = self.bot_shots.clone();
        status.nick = nick;
        status.opponent = BOT_NICK.to_string();
        status.timer = i64::from(DEFAULT_TURN_SECONDS);
        Ok(status)
    }
}

/// [`GameService`] that referees a match against a bot in-process.
pub struct LocalReferee {
    referee: Mutex<Referee>,
}

impl LocalReferee {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_rng(&mut rand::rng()))
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            referee: Mutex::new(Referee::new(rng)),
        }
    }

    fn referee(&self) -> MutexGuard<'_, Referee> {
        self.referee.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for LocalReferee {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl GameService for LocalReferee {
    async fn create_match(&self, req: &MatchRequest) -> anyhow::Result<String> {
        let mut referee = self.referee();
        let player_fleet = match &req.fleet {
            Some(fleet) => fleet.clone(),
            None => FleetBuilder::random(&mut referee.rng),
        };
        let bot_fleet = FleetBuilder::random(&mut referee.rng);
        let fresh = Referee::new(referee.rng.clone());
        *referee = fresh;
        referee.player_fleet = player_fleet.into_iter().collect();
        referee.bot_ships = Referee::split_ships(&bot_fleet);
        referee.request = Some(req.clone());
        Ok("local".to_string())
    }

    async fn status(&self) -> anyhow::Result<StatusResponse> {
        Ok(self.referee().status()?)
    }

    async fn board(&self) -> anyhow::Result<Vec<Coord>> {
        let referee = self.referee();
        referee.started()?;
        let mut board: Vec<Coord> = referee.player_fleet.iter().copied().collect();
        board.sort();
        Ok(board)
    }

    async fn descriptions(&self) -> anyhow::Result<DescriptionResponse> {
        let referee = self.referee();
        referee.started()?;
        let req = referee.request.clone().unwrap_or_default();
        Ok(DescriptionResponse {
            desc: req.description,
            nick: req.nick,
            opp_desc: "Fires at random and never gets tired.".to_string(),
            opponent: BOT_NICK.to_string(),
        })
    }

    async fn fire(&self, coord: Coord) -> anyhow::Result<ShotResult> {
        Ok(self.referee().fire(coord)?)
    }

    async fn refresh(&self) -> anyhow::Result<()> {
        Ok(self.referee().started()?)
    }

    async fn abandon(&self) -> anyhow::Result<()> {
        let mut referee = self.referee();
        referee.started()?;
        referee.outcome = Some("lose");
        Ok(())
    }

    async fn leaderboard(&self) -> anyhow::Result<Vec<PlayerStats>> {
        Ok(Vec::new())
    }

    async fn player_stats(&self, nick: &str) -> anyhow::Result<PlayerStats> {
        Ok(PlayerStats {
            nick: nick.to_string(),
            ..PlayerStats::default()
        })
    }

    async fn waiting_players(&self) -> anyhow::Result<Vec<ListEntry>> {
        Ok(vec![ListEntry {
            game_status: "waiting_wpbot".to_string(),
            nick: BOT_NICK.to_string(),
        }])
    }
}
