use std::future::Future;

use log::warn;
use tokio::time::{sleep, Duration};

use crate::core::{Coord, ShotResult};
use crate::domain::{DescriptionResponse, ListEntry, PlayerStats, StatusResponse};
use crate::service::{is_transient, GameService, MatchRequest};

/// Bounded retry with a fixed delay between attempts.
///
/// Only transient [`ServiceError`](crate::ServiceError)s are retried. Anything
/// else, and the last transient failure, is handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// `max_attempts` counts the first try; it is clamped to at least one.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// A single attempt, no retries.
    pub fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `op` until it succeeds, fails permanently, or attempts run out.
    pub async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> anyhow::Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_attempts && is_transient(&e) => {
                    warn!(
                        "{} failed (attempt {}/{}): {}; retrying in {:?}",
                        what, attempt, self.max_attempts, e, self.delay
                    );
                    sleep(self.delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    return Err(e.context(format!("{} failed after {} attempt(s)", what, attempt)))
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(500))
    }
}

/// [`GameService`] wrapper that runs every call through a [`RetryPolicy`].
pub struct Resilient<S: GameService> {
    inner: S,
    policy: RetryPolicy,
}

impl<S: GameService> Resilient<S> {
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait::async_trait]
impl<S: GameService> GameService for Resilient<S> {
    async fn create_match(&self, req: &MatchRequest) -> anyhow::Result<String> {
        self.policy.run("create match", || self.inner.create_match(req)).await
    }

    async fn status(&self) -> anyhow::Result<StatusResponse> {
        self.policy.run("status", || self.inner.status()).await
    }

    async fn board(&self) -> anyhow::Result<Vec<Coord>> {
        self.policy.run("board", || self.inner.board()).await
    }

    async fn descriptions(&self) -> anyhow::Result<DescriptionResponse> {
        self.policy.run("descriptions", || self.inner.descriptions()).await
    }

    async fn fire(&self, coord: Coord) -> anyhow::Result<ShotResult> {
        self.policy.run("fire", || self.inner.fire(coord)).await
    }

    async fn refresh(&self) -> anyhow::Result<()> {
        self.policy.run("refresh", || self.inner.refresh()).await
    }

    async fn abandon(&self) -> anyhow::Result<()> {
        self.policy.run("abandon", || self.inner.abandon()).await
    }

    async fn leaderboard(&self) -> anyhow::Result<Vec<PlayerStats>> {
        self.policy.run("leaderboard", || self.inner.leaderboard()).await
    }

    async fn player_stats(&self, nick: &str) -> anyhow::Result<PlayerStats> {
        self.policy.run("player stats", || self.inner.player_stats(nick)).await
    }

    async fn waiting_players(&self) -> anyhow::Result<Vec<ListEntry>> {
        self.policy.run("waiting players", || self.inner.waiting_players()).await
    }
}
