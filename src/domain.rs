//! Wire types of the game service's JSON API.

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{Coord, MatchState, Outcome, ShotResult, StatusReport};

/// Body of `POST /game`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InitGameRequest {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub coords: Option<Vec<Coord>>,
    pub desc: String,
    pub nick: String,
    pub target_nick: String,
    pub wpbot: bool,
}

/// `game_status` values. Everything that is neither running nor over counts as pending.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    #[serde(rename = "game_in_progress")]
    InProgress,
    #[serde(rename = "ended")]
    Ended,
    #[serde(rename = "waiting")]
    Waiting,
    #[serde(rename = "waiting_wpbot")]
    WaitingBot,
    #[serde(rename = "no_game")]
    #[serde(other)]
    NoGame,
}

/// The service sends `null` for empty lists.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Option::unwrap_or_default)
}

/// Body of `GET /game`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub game_status: GameStatus,
    #[serde(default)]
    pub last_game_status: String,
    #[serde(default)]
    pub nick: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub opp_shots: Vec<Coord>,
    #[serde(default)]
    pub opponent: String,
    #[serde(default)]
    pub should_fire: bool,
    #[serde(default)]
    pub timer: i64,
}

impl StatusResponse {
    /// Still in the matchmaking queue.
    pub fn pending() -> Self {
        Self {
            game_status: GameStatus::Waiting,
            last_game_status: String::new(),
            nick: String::new(),
            opp_shots: Vec::new(),
            opponent: String::new(),
            should_fire: false,
            timer: 0,
        }
    }

    /// Running match with the given turn flag and opponent shot history.
    pub fn in_progress(should_fire: bool, opp_shots: Vec<Coord>) -> Self {
        Self {
            game_status: GameStatus::InProgress,
            should_fire,
            opp_shots,
            timer: i64::from(crate::core::DEFAULT_TURN_SECONDS),
            ..Self::pending()
        }
    }

    /// Finished match; `last` is the raw `last_game_status` value (`win` / `lose`).
    pub fn ended(last: &str) -> Self {
        Self {
            game_status: GameStatus::Ended,
            last_game_status: last.to_string(),
            ..Self::pending()
        }
    }
}

impl From<&StatusResponse> for StatusReport {
    fn from(res: &StatusResponse) -> Self {
        let state = match res.game_status {
            GameStatus::InProgress => MatchState::InProgress,
            GameStatus::Ended => MatchState::Ended,
            GameStatus::Waiting | GameStatus::WaitingBot | GameStatus::NoGame => {
                MatchState::Pending
            }
        };
        let last_outcome = if res.last_game_status.is_empty() {
            None
        } else {
            Some(Outcome::from_last_status(&res.last_game_status))
        };
        StatusReport {
            state,
            your_turn: res.should_fire,
            opponent_shots: res.opp_shots.clone(),
            last_outcome,
            timer: u32::try_from(res.timer).ok().filter(|secs| *secs > 0),
        }
    }
}

/// Body of `GET /game/board`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardResponse {
    pub board: Vec<Coord>,
}

/// Body of `GET /game/desc`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DescriptionResponse {
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub nick: String,
    #[serde(default)]
    pub opp_desc: String,
    #[serde(default)]
    pub opponent: String,
}

/// Body of `POST /game/fire`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FireRequest {
    pub coord: Coord,
}

/// Answer to `POST /game/fire`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FireResponse {
    pub result: ShotResult,
}

/// One entry of `GET /game/list`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListEntry {
    pub game_status: String,
    pub nick: String,
}

/// One leaderboard row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerStats {
    #[serde(default)]
    pub rank: u32,
    pub nick: String,
    #[serde(default)]
    pub games: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub points: u32,
}

/// Body of `GET /stats`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsResponse {
    pub stats: Vec<PlayerStats>,
}

/// Body of `GET /stats/{nick}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerStatsResponse {
    pub stats: PlayerStats,
}
