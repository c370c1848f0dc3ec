//! Turn scheduler: drives one match from registration to its end.
//!
//! A single coordination task alternates between the wait loop (polling
//! while it is not our turn) and the fire loop (taking targets from the
//! input while it is). A second task runs the countdown display. Both stop
//! when the match's [`Shutdown`] is raised; raising it from outside abandons
//! the match.

use std::future::Future;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::core::{
    MatchState, Outcome, Phase, Profile, Session, ShotResult, StatusReport, Turn,
    DEFAULT_TURN_SECONDS, REFRESH_EVERY_POLLS,
};
use crate::domain::StatusResponse;
use crate::service::{GameService, MatchRequest};
use crate::shutdown::Shutdown;
use crate::surface::{DisplaySink, TargetInput};
use crate::timer::Countdown;

/// Default cadence of status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How a match finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEnd {
    Finished(Outcome),
    Abandoned,
}

/// Runs one match against a [`GameService`].
pub struct MatchDriver<'a> {
    service: Arc<dyn GameService>,
    session: Session,
    input: &'a mut dyn TargetInput,
    display: &'a mut dyn DisplaySink,
    shutdown: Shutdown,
    poll_interval: Duration,
}

impl<'a> MatchDriver<'a> {
    pub fn new(
        service: Arc<dyn GameService>,
        session: Session,
        input: &'a mut dyn TargetInput,
        display: &'a mut dyn DisplaySink,
    ) -> Self {
        Self {
            service,
            session,
            input,
            display,
            shutdown: Shutdown::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Handle that abandons the match when raised.
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Hand the session back, e.g. to start the next match.
    pub fn into_session(self) -> Session {
        self.session
    }

    /// Register for a match and play it to the end.
    ///
    /// On error the match is left where it was; the countdown task is
    /// stopped either way before this returns. A driver plays a single
    /// match: once its shutdown is raised, `play` refuses to start.
    pub async fn play(&mut self, req: &MatchRequest) -> anyhow::Result<MatchEnd> {
        if self.shutdown.is_cancelled() {
            return Err(anyhow::anyhow!("match driver already shut down"));
        }
        self.session.request_match().map_err(|e| anyhow::anyhow!(e))?;
        let countdown = Countdown::spawn(self.shutdown.clone(), DEFAULT_TURN_SECONDS);

        let result = self.drive(req, &countdown).await;

        self.shutdown.cancel();
        countdown.join().await;
        if let Err(e) = &result {
            warn!("match stopped: {:#}", e);
        }
        result
    }

    async fn drive(&mut self, req: &MatchRequest, countdown: &Countdown) -> anyhow::Result<MatchEnd> {
        let service = self.service.clone();
        match guarded(&self.shutdown, service.create_match(req)).await {
            Some(token) => {
                token?;
                info!("registered as {:?}, waiting for an opponent", req.nick);
            }
            None => self.abandon(countdown).await?,
        }
        self.publish(countdown);

        loop {
            match self.session.phase() {
                Phase::MatchPending | Phase::InProgress(Turn::Opponent) => {
                    self.wait_loop(countdown).await?
                }
                Phase::InProgress(Turn::Yours) => self.fire_loop(countdown).await?,
                Phase::Ended(outcome) => return Ok(MatchEnd::Finished(outcome)),
                Phase::Abandoned => return Ok(MatchEnd::Abandoned),
                Phase::MenuSelection => {
                    return Err(anyhow::anyhow!("match loop reached the menu phase"))
                }
            }
        }
    }

    /// Poll once per interval until it is our turn or the match is over.
    async fn wait_loop(&mut self, countdown: &Countdown) -> anyhow::Result<()> {
        countdown.pause();
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut pending_polls: u32 = 0;
        let service = self.service.clone();

        loop {
            let cancelled = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => true,
                _ = ticker.tick() => false,
            };
            if cancelled {
                return self.abandon(countdown).await;
            }
            let status = match guarded(&self.shutdown, service.status()).await {
                Some(status) => status?,
                None => return self.abandon(countdown).await,
            };
            let report = StatusReport::from(&status);

            if self.session.phase() == Phase::MatchPending {
                match report.state {
                    MatchState::Pending => {
                        pending_polls += 1;
                        if pending_polls % REFRESH_EVERY_POLLS == 0 {
                            info!("still waiting for an opponent");
                            service.refresh().await?;
                        }
                        continue;
                    }
                    MatchState::InProgress => self.begin(&status, &report).await?,
                    MatchState::Ended => {
                        self.session
                            .apply_status(&report)
                            .map_err(|e| anyhow::anyhow!(e))?;
                    }
                }
            } else {
                let effect = self
                    .session
                    .apply_status(&report)
                    .map_err(|e| anyhow::anyhow!(e))?;
                if let Some(secs) = report.timer {
                    countdown.sync(secs);
                }
                if effect.new_opponent_shots > 0 {
                    debug!("opponent fired {} new shot(s)", effect.new_opponent_shots);
                }
                if effect.new_opponent_shots == 0 && !effect.turn_changed && effect.ended.is_none() {
                    continue;
                }
            }

            self.publish(countdown);
            match self.session.phase() {
                Phase::Ended(outcome) => {
                    self.announce(outcome);
                    return Ok(());
                }
                Phase::InProgress(Turn::Yours) => return Ok(()),
                _ => {}
            }
        }
    }

    /// The match has started: load our board and both descriptions, once.
    async fn begin(&mut self, status: &StatusResponse, report: &StatusReport) -> anyhow::Result<()> {
        let board = self.service.board().await?;
        let desc = self.service.descriptions().await?;
        let player = Profile {
            nick: if desc.nick.is_empty() { status.nick.clone() } else { desc.nick },
            description: desc.desc,
        };
        let opponent = Profile {
            nick: if desc.opponent.is_empty() { status.opponent.clone() } else { desc.opponent },
            description: desc.opp_desc,
        };
        info!("match started: {} vs {}", player.nick, opponent.nick);
        self.session
            .start(report, board, player, opponent)
            .map_err(|e| anyhow::anyhow!(e))?;
        Ok(())
    }

    /// Take targets and fire until a shot misses or the match ends.
    async fn fire_loop(&mut self, countdown: &Countdown) -> anyhow::Result<()> {
        countdown.start(self.session.turn_seconds());
        self.publish(countdown);

        while self.session.should_fire() {
            let snapshot = self.session.snapshot(countdown.value());
            let target = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => None,
                target = self.input.next_target(&snapshot) => target,
            };
            let Some(coord) = target else {
                if !self.shutdown.is_cancelled() {
                    info!("player left the match");
                }
                return self.abandon(countdown).await;
            };
            if self.shutdown.is_cancelled() {
                return self.abandon(countdown).await;
            }
            if !self.session.can_target(coord) {
                debug!("{} was already targeted, ignoring", coord);
                continue;
            }

            let service = self.service.clone();
            let result = match guarded(&self.shutdown, service.fire(coord)).await {
                Some(result) => result?,
                None => return self.abandon(countdown).await,
            };
            let effect = self
                .session
                .record_shot(coord, result)
                .map_err(|e| anyhow::anyhow!(e))?;
            match result {
                ShotResult::Miss => countdown.pause(),
                ShotResult::Hit | ShotResult::Sunk => countdown.start(DEFAULT_TURN_SECONDS),
            }
            debug!(
                "fired at {}: {:?} (accuracy {}/{})",
                coord,
                result,
                self.session.shots_hit(),
                self.session.shots_fired()
            );
            if effect.fleet_mismatch {
                warn!(
                    "sunk a ship of length {} that was not left in the enemy fleet",
                    effect.sunk.as_ref().map(Vec::len).unwrap_or(0)
                );
            }
            self.publish(countdown);

            if effect.sunk.is_some() {
                let status = match guarded(&self.shutdown, service.status()).await {
                    Some(status) => status?,
                    None => return self.abandon(countdown).await,
                };
                let report = StatusReport::from(&status);
                self.session
                    .apply_status(&report)
                    .map_err(|e| anyhow::anyhow!(e))?;
                if let Some(secs) = report.timer {
                    countdown.sync(secs);
                }
                self.publish(countdown);
                if let Phase::Ended(outcome) = self.session.phase() {
                    self.announce(outcome);
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    /// Leave the match: local state first, then tell the service.
    async fn abandon(&mut self, countdown: &Countdown) -> anyhow::Result<()> {
        if self.session.phase().is_terminal() {
            return Ok(());
        }
        self.session.abandon().map_err(|e| anyhow::anyhow!(e))?;
        info!("abandoning match");
        if let Err(e) = self.service.abandon().await {
            warn!("abandon request failed: {:#}", e);
        }
        self.publish(countdown);
        self.display.notice("Match abandoned.");
        Ok(())
    }

    fn announce(&mut self, outcome: Outcome) {
        info!("match ended: {:?}", outcome);
        match outcome {
            Outcome::Won => self.display.notice("You won!"),
            Outcome::Lost => self.display.notice("You lost!"),
        }
    }

    fn publish(&mut self, countdown: &Countdown) {
        let snapshot = self.session.snapshot(countdown.value());
        self.display.show(&snapshot);
    }
}

/// Run `fut` unless `shutdown` is raised first.
async fn guarded<T>(
    shutdown: &Shutdown,
    fut: impl Future<Output = anyhow::Result<T>>,
) -> Option<anyhow::Result<T>> {
    tokio::select! {
        biased;
        _ = shutdown.cancelled() => None,
        res = fut => Some(res),
    }
}
