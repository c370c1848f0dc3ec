use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::time::{sleep, Duration};

use crate::core::{Coord, ShotResult};
use crate::domain::{DescriptionResponse, ListEntry, PlayerStats, StatusResponse};
use crate::service::{GameService, MatchRequest, ServiceError};

/// Number of calls made to each [`GameService`] operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calls {
    pub create_match: usize,
    pub status: usize,
    pub board: usize,
    pub descriptions: usize,
    pub fire: usize,
    pub refresh: usize,
    pub abandon: usize,
    pub leaderboard: usize,
    pub player_stats: usize,
    pub waiting_players: usize,
}

#[derive(Default)]
struct Script {
    statuses: VecDeque<Result<StatusResponse, ServiceError>>,
    last_status: Option<StatusResponse>,
    fire_results: VecDeque<Result<ShotResult, ServiceError>>,
    board: Vec<Coord>,
    descriptions: DescriptionResponse,
    leaderboard: Vec<PlayerStats>,
    waiting: Vec<ListEntry>,
    token: Option<String>,
    requests: Vec<MatchRequest>,
    fired: Vec<Coord>,
    fire_delay: Duration,
    calls: Calls,
}

/// In-process [`GameService`] that replays scripted responses.
///
/// Status responses are consumed in order; once the queue runs dry the last
/// one keeps being returned. Clones share the same script, so a test can
/// keep a handle and inspect calls after handing the service to a driver.
#[derive(Clone, Default)]
pub struct ScriptedService {
    script: Arc<Mutex<Script>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Our fleet as returned by `board`.
    pub fn with_board(self, board: Vec<Coord>) -> Self {
        self.script().board = board;
        self
    }

    pub fn with_descriptions(self, descriptions: DescriptionResponse) -> Self {
        self.script().descriptions = descriptions;
        self
    }

    pub fn with_leaderboard(self, stats: Vec<PlayerStats>) -> Self {
        self.script().leaderboard = stats;
        self
    }

    pub fn with_waiting(self, waiting: Vec<ListEntry>) -> Self {
        self.script().waiting = waiting;
        self
    }

    /// Hold every fire call this long before answering.
    pub fn with_fire_delay(self, delay: Duration) -> Self {
        self.script().fire_delay = delay;
        self
    }

    pub fn push_status(&self, status: StatusResponse) -> &Self {
        self.script().statuses.push_back(Ok(status));
        self
    }

    pub fn push_status_error(&self, err: ServiceError) -> &Self {
        self.script().statuses.push_back(Err(err));
        self
    }

    pub fn push_fire(&self, result: ShotResult) -> &Self {
        self.script().fire_results.push_back(Ok(result));
        self
    }

    pub fn push_fire_error(&self, err: ServiceError) -> &Self {
        self.script().fire_results.push_back(Err(err));
        self
    }

    pub fn calls(&self) -> Calls {
        self.script().calls.clone()
    }

    /// Coordinates passed to `fire`, in order.
    pub fn fired(&self) -> Vec<Coord> {
        self.script().fired.clone()
    }

    /// Requests passed to `create_match`, in order.
    pub fn requests(&self) -> Vec<MatchRequest> {
        self.script().requests.clone()
    }

    fn require_token(script: &Script) -> Result<(), ServiceError> {
        if script.token.is_none() {
            return Err(ServiceError::Protocol("no session token, create a match first".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl GameService for ScriptedService {
    async fn create_match(&self, req: &MatchRequest) -> anyhow::Result<String> {
        let mut script = self.script();
        script.calls.create_match += 1;
        script.requests.push(req.clone());
        let token = format!("token-{}", script.calls.create_match);
        script.token = Some(token.clone());
        Ok(token)
    }

    async fn status(&self) -> anyhow::Result<StatusResponse> {
        let mut script = self.script();
        script.calls.status += 1;
        Self::require_token(&script)?;
        match script.statuses.pop_front() {
            Some(Ok(status)) => {
                script.last_status = Some(status.clone());
                Ok(status)
            }
            Some(Err(e)) => Err(e.into()),
            None => script
                .last_status
                .clone()
                .ok_or_else(|| ServiceError::Protocol("no status scripted".into()).into()),
        }
    }

    async fn board(&self) -> anyhow::Result<Vec<Coord>> {
        let mut script = self.script();
        script.calls.board += 1;
        Self::require_token(&script)?;
        Ok(script.board.clone())
    }

    async fn descriptions(&self) -> anyhow::Result<DescriptionResponse> {
        let mut script = self.script();
        script.calls.descriptions += 1;
        Self::require_token(&script)?;
        Ok(script.descriptions.clone())
    }

    async fn fire(&self, coord: Coord) -> anyhow::Result<ShotResult> {
        let delay = self.script().fire_delay;
        if !delay.is_zero() {
            sleep(delay).await;
        }
        let mut script = self.script();
        script.calls.fire += 1;
        Self::require_token(&script)?;
        match script.fire_results.pop_front() {
            Some(Ok(result)) => {
                script.fired.push(coord);
                Ok(result)
            }
            Some(Err(e)) => Err(e.into()),
            None => Err(ServiceError::Protocol("no fire result scripted".into()).into()),
        }
    }

    async fn refresh(&self) -> anyhow::Result<()> {
        let mut script = self.script();
        script.calls.refresh += 1;
        Self::require_token(&script)?;
        Ok(())
    }

    async fn abandon(&self) -> anyhow::Result<()> {
        let mut script = self.script();
        script.calls.abandon += 1;
        Self::require_token(&script)?;
        Ok(())
    }

    async fn leaderboard(&self) -> anyhow::Result<Vec<PlayerStats>> {
        let mut script = self.script();
        script.calls.leaderboard += 1;
        Ok(script.leaderboard.clone())
    }

    async fn player_stats(&self, nick: &str) -> anyhow::Result<PlayerStats> {
        let mut script = self.script();
        script.calls.player_stats += 1;
        script
            .leaderboard
            .iter()
            .find(|s| s.nick == nick)
            .cloned()
            .ok_or_else(|| ServiceError::Status(404).into())
    }

    async fn waiting_players(&self) -> anyhow::Result<Vec<ListEntry>> {
        let mut script = self.script();
        script.calls.waiting_players += 1;
        Ok(script.waiting.clone())
    }
}
