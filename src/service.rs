use crate::core::{Coord, ShotResult};
use crate::domain::{DescriptionResponse, InitGameRequest, ListEntry, PlayerStats, StatusResponse};

/// Parameters for a new match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchRequest {
    /// Hand-placed fleet; `None` lets the service place ships.
    pub fleet: Option<Vec<Coord>>,
    pub description: String,
    pub nick: String,
    /// Challenge a specific waiting player.
    pub opponent_nick: Option<String>,
    pub vs_bot: bool,
}

impl From<&MatchRequest> for InitGameRequest {
    fn from(req: &MatchRequest) -> Self {
        InitGameRequest {
            coords: req.fleet.clone(),
            desc: req.description.clone(),
            nick: req.nick.clone(),
            target_nick: req.opponent_nick.clone().unwrap_or_default(),
            wpbot: req.vs_bot,
        }
    }
}

/// Failure of a single remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The request never got a response.
    Network(String),
    /// The service answered with a non-success status code.
    Status(u16),
    /// The response broke the API contract (bad body, missing token, malformed coordinate).
    Protocol(String),
}

impl ServiceError {
    /// Network errors and bad status codes are worth retrying, contract violations are not.
    pub fn is_transient(&self) -> bool {
        matches!(self, ServiceError::Network(_) | ServiceError::Status(_))
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Network(e) => write!(f, "error sending request: {}", e),
            ServiceError::Status(code) => write!(f, "unexpected status code: {}", code),
            ServiceError::Protocol(e) => write!(f, "protocol violation: {}", e),
        }
    }
}

impl std::error::Error for ServiceError {}

/// `true` if `err` is a [`ServiceError`] worth retrying.
pub fn is_transient(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ServiceError>()
        .map(ServiceError::is_transient)
        .unwrap_or(false)
}

/// The remote game service.
///
/// Every call after [`GameService::create_match`] is authenticated with the
/// token that call returned; implementations keep it.
#[async_trait::async_trait]
pub trait GameService: Send + Sync {
    /// Register for a match and return the session token.
    async fn create_match(&self, req: &MatchRequest) -> anyhow::Result<String>;
    async fn status(&self) -> anyhow::Result<StatusResponse>;
    /// Our ship coordinates.
    async fn board(&self) -> anyhow::Result<Vec<Coord>>;
    async fn descriptions(&self) -> anyhow::Result<DescriptionResponse>;
    async fn fire(&self, coord: Coord) -> anyhow::Result<ShotResult>;
    /// Keep-alive while waiting in the matchmaking queue.
    async fn refresh(&self) -> anyhow::Result<()>;
    async fn abandon(&self) -> anyhow::Result<()>;
    async fn leaderboard(&self) -> anyhow::Result<Vec<PlayerStats>>;
    async fn player_stats(&self, nick: &str) -> anyhow::Result<PlayerStats>;
    /// Players currently in the matchmaking list.
    async fn waiting_players(&self) -> anyhow::Result<Vec<ListEntry>>;
}

#[async_trait::async_trait]
impl<S: GameService + ?Sized> GameService for Box<S> {
    async fn create_match(&self, req: &MatchRequest) -> anyhow::Result<String> {
        (**self).create_match(req).await
    }
    async fn status(&self) -> anyhow::Result<StatusResponse> {
        (**self).status().await
    }
    async fn board(&self) -> anyhow::Result<Vec<Coord>> {
        (**self).board().await
    }
    async fn descriptions(&self) -> anyhow::Result<DescriptionResponse> {
        (**self).descriptions().await
    }
    async fn fire(&self, coord: Coord) -> anyhow::Result<ShotResult> {
        (**self).fire(coord).await
    }
    async fn refresh(&self) -> anyhow::Result<()> {
        (**self).refresh().await
    }
    async fn abandon(&self) -> anyhow::Result<()> {
        (**self).abandon().await
    }
    async fn leaderboard(&self) -> anyhow::Result<Vec<PlayerStats>> {
        (**self).leaderboard().await
    }
    async fn player_stats(&self, nick: &str) -> anyhow::Result<PlayerStats> {
        (**self).player_stats(nick).await
    }
    async fn waiting_players(&self) -> anyhow::Result<Vec<ListEntry>> {
        (**self).waiting_players().await
    }
}
