use std::sync::RwLock;

use log::debug;
use reqwest::{Client, IntoUrl, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tokio::time::Duration;

use crate::core::{Coord, ShotResult};
use crate::domain::{
    BoardResponse, DescriptionResponse, FireRequest, FireResponse, InitGameRequest, ListEntry,
    PlayerStats, PlayerStatsResponse, StatsResponse, StatusResponse,
};
use crate::service::{GameService, MatchRequest, ServiceError};

/// Header carrying the per-match session token.
pub const AUTH_HEADER: &str = "X-Auth-Token";

/// Default request timeout (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// [`GameService`] over the JSON HTTP API.
pub struct HttpService {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpService {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    /// Token of the current match, if one was created.
    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/stats/{nick}` with the nick as one escaped path segment.
    fn stats_url(&self, nick: &str) -> Result<Url, ServiceError> {
        let mut url = Url::parse(&self.url("/stats"))
            .map_err(|e| ServiceError::Protocol(format!("invalid service url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ServiceError::Protocol("service url cannot take a path".into()))?
            .push(nick);
        Ok(url)
    }

    fn authed(&self, req: RequestBuilder) -> Result<RequestBuilder, ServiceError> {
        let token = self
            .token()
            .ok_or_else(|| ServiceError::Protocol("no session token, create a match first".into()))?;
        Ok(req.header(AUTH_HEADER, token))
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, ServiceError> {
        let res = req
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        if !res.status().is_success() {
            return Err(ServiceError::Status(res.status().as_u16()));
        }
        Ok(res)
    }

    async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, ServiceError> {
        let body = res
            .bytes()
            .await
            .map_err(|e| ServiceError::Network(format!("error reading body: {}", e)))?;
        serde_json::from_slice(&body)
            .map_err(|e| ServiceError::Protocol(format!("error deserializing body: {}", e)))
    }

    async fn get_authed<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let req = self.authed(self.client.get(self.url(path)))?;
        let res = self.send(req).await?;
        Self::decode(res).await
    }

    async fn get_public<T: DeserializeOwned>(&self, url: impl IntoUrl) -> Result<T, ServiceError> {
        let res = self.send(self.client.get(url)).await?;
        Self::decode(res).await
    }
}

#[async_trait::async_trait]
impl GameService for HttpService {
    async fn create_match(&self, req: &MatchRequest) -> anyhow::Result<String> {
        let body = InitGameRequest::from(req);
        let res = self.send(self.client.post(self.url("/game")).json(&body)).await?;
        let token = res
            .headers()
            .get(AUTH_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ServiceError::Protocol("token is missing".into()))?;
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.clone());
        }
        debug!("match created for {:?}", req.nick);
        Ok(token)
    }

    async fn status(&self) -> anyhow::Result<StatusResponse> {
        Ok(self.get_authed("/game").await?)
    }

    async fn board(&self) -> anyhow::Result<Vec<Coord>> {
        let res: BoardResponse = self.get_authed("/game/board").await?;
        Ok(res.board)
    }

    async fn descriptions(&self) -> anyhow::Result<DescriptionResponse> {
        Ok(self.get_authed("/game/desc").await?)
    }

    async fn fire(&self, coord: Coord) -> anyhow::Result<ShotResult> {
        let req = self.authed(self.client.post(self.url("/game/fire")).json(&FireRequest { coord }))?;
        let res = self.send(req).await?;
        let body: FireResponse = Self::decode(res).await?;
        Ok(body.result)
    }

    async fn refresh(&self) -> anyhow::Result<()> {
        let req = self.authed(self.client.get(self.url("/game/refresh")))?;
        self.send(req).await?;
        Ok(())
    }

    async fn abandon(&self) -> anyhow::Result<()> {
        let req = self.authed(self.client.delete(self.url("/game/abandon")))?;
        self.send(req).await?;
        Ok(())
    }

    async fn leaderboard(&self) -> anyhow::Result<Vec<PlayerStats>> {
        let res: StatsResponse = self.get_public(self.url("/stats")).await?;
        Ok(res.stats)
    }

    async fn player_stats(&self, nick: &str) -> anyhow::Result<PlayerStats> {
        let res: PlayerStatsResponse = self.get_public(self.stats_url(nick)?).await?;
        Ok(res.stats)
    }

    async fn waiting_players(&self) -> anyhow::Result<Vec<ListEntry>> {
        Ok(self.get_public(self.url("/game/list")).await?)
    }
}
