//! Per-turn countdown shown to the player.
//!
//! The countdown is display state only. The service enforces the real turn
//! limit; the local value is resynchronised from every status poll and never
//! ends a turn by itself.

use std::sync::Arc;

use log::debug;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::shutdown::Shutdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerCmd {
    /// Set the value and start ticking.
    Start(u32),
    /// Set the value, keep ticking or paused as before.
    Sync(u32),
    Pause,
}

/// Handle to the countdown task.
pub struct Countdown {
    cmd_tx: mpsc::UnboundedSender<TimerCmd>,
    value: Arc<watch::Sender<u32>>,
    handle: JoinHandle<()>,
}

impl Countdown {
    /// Spawn a paused countdown showing `initial` that ticks once per second.
    pub fn spawn(shutdown: Shutdown, initial: u32) -> Self {
        Self::with_period(shutdown, initial, Duration::from_secs(1))
    }

    pub fn with_period(shutdown: Shutdown, initial: u32, period: Duration) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (value, _) = watch::channel(initial);
        let value = Arc::new(value);
        let handle = tokio::spawn(run(shutdown, cmd_rx, value.clone(), initial, period));
        Self {
            cmd_tx,
            value,
            handle,
        }
    }

    /// Restart the countdown from `secs`. The new value is visible at once.
    pub fn start(&self, secs: u32) {
        self.value.send_replace(secs);
        let _ = self.cmd_tx.send(TimerCmd::Start(secs));
    }

    /// Adopt the service's authoritative value.
    pub fn sync(&self, secs: u32) {
        self.value.send_replace(secs);
        let _ = self.cmd_tx.send(TimerCmd::Sync(secs));
    }

    pub fn pause(&self) {
        let _ = self.cmd_tx.send(TimerCmd::Pause);
    }

    /// Value currently on display.
    pub fn value(&self) -> u32 {
        *self.value.borrow()
    }

    /// Stop accepting commands and wait for the task to finish.
    pub async fn join(self) {
        drop(self.cmd_tx);
        if let Err(e) = self.handle.await {
            debug!("countdown task ended abnormally: {}", e);
        }
    }
}

async fn run(
    shutdown: Shutdown,
    mut cmd_rx: mpsc::UnboundedReceiver<TimerCmd>,
    value_tx: Arc<watch::Sender<u32>>,
    mut remaining: u32,
    period: Duration,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut running = false;

    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            cmd = cmd_rx.recv() => {
                match cmd {
                    None => break,
                    Some(TimerCmd::Start(secs)) => {
                        remaining = secs;
                        running = true;
                        ticker.reset();
                    }
                    Some(TimerCmd::Sync(secs)) => remaining = secs,
                    Some(TimerCmd::Pause) => running = false,
                }
            }
            _ = ticker.tick(), if running => {
                remaining = remaining.saturating_sub(1);
                value_tx.send_replace(remaining);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn ticks_only_while_started() {
        let shutdown = Shutdown::new();
        let countdown = Countdown::spawn(shutdown.clone(), 60);

        sleep(Duration::from_millis(3500)).await;
        assert_eq!(countdown.value(), 60);

        countdown.start(10);
        sleep(Duration::from_millis(3500)).await;
        assert_eq!(countdown.value(), 7);

        countdown.pause();
        sleep(Duration::from_secs(5)).await;
        assert_eq!(countdown.value(), 7);

        shutdown.cancel();
        countdown.join().await;
    }

    #[tokio::test(start_paused = true)]
    async fn never_goes_below_zero() {
        let shutdown = Shutdown::new();
        let countdown = Countdown::spawn(shutdown.clone(), 0);
        countdown.start(2);
        sleep(Duration::from_secs(10)).await;
        assert_eq!(countdown.value(), 0);
        shutdown.cancel();
        countdown.join().await;
    }

    #[tokio::test(start_paused = true)]
    async fn sync_keeps_the_running_state() {
        let shutdown = Shutdown::new();
        let countdown = Countdown::spawn(shutdown.clone(), 60);
        countdown.start(60);
        sleep(Duration::from_millis(1500)).await;
        countdown.sync(30);
        assert_eq!(countdown.value(), 30);
        sleep(Duration::from_millis(1000)).await;
        assert_eq!(countdown.value(), 29);
        shutdown.cancel();
        countdown.join().await;
    }
}
