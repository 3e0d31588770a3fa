use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Sends a tick on every interval until stopped or dropped. The first tick
/// fires one full interval after start.
pub struct RefreshScheduler {
    handle: Option<JoinHandle<()>>,
    interval: Duration,
    tx: mpsc::Sender<()>,
}

impl RefreshScheduler {
    pub fn new(interval: Duration, tx: mpsc::Sender<()>) -> Self {
        Self {
            handle: None,
            interval,
            tx,
        }
    }

    pub fn start(&mut self) {
        self.stop();

        let period = self.interval;
        let tx = self.tx.clone();
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                // A full channel means a tick is already pending.
                if let Err(mpsc::error::TrySendError::Closed(_)) = tx.try_send(()) {
                    break;
                }
            }
        }));
        tracing::debug!(interval_secs = period.as_secs(), "Auto refresh started");
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("Auto refresh stopped");
        }
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
        if self.is_running() {
            self.start();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
