use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

/// Once-per-period tick source for a running attempt.
///
/// The ticking task lives exactly as long as this handle: dropping it (normal
/// completion, expiry, or the host walking away) aborts the task.
#[derive(Debug)]
pub struct TickerHandle {
    task: JoinHandle<()>,
}

/// Receiving end of a [`TickerHandle`].
///
/// Periods are counted, never dropped: a receiver that was busy for several
/// periods gets them all back from its next [`TickReceiver::recv`].
#[derive(Debug)]
pub struct TickReceiver {
    rx: watch::Receiver<u64>,
    seen: u64,
}

impl TickReceiver {
    /// Wait for the next tick and return how many periods elapsed since the
    /// previous call. `None` once the ticker has stopped.
    pub async fn recv(&mut self) -> Option<u32> {
        self.rx.changed().await.ok()?;
        let total = *self.rx.borrow_and_update();
        let elapsed = total.saturating_sub(self.seen);
        self.seen = total;
        Some(u32::try_from(elapsed).unwrap_or(u32::MAX))
    }
}

impl TickerHandle {
    /// Spawn a ticker on the current tokio runtime.
    ///
    /// The first tick arrives one `period` after spawning.
    #[must_use]
    pub fn spawn(period: Duration) -> (Self, TickReceiver) {
        let (tx, rx) = watch::channel(0_u64);
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.is_closed() {
                    break;
                }
                tx.send_modify(|count| *count += 1);
            }
            debug!("ticker receiver closed");
        });
        (Self { task }, TickReceiver { rx, seen: 0 })
    }

    /// One tick per second.
    #[must_use]
    pub fn every_second() -> (Self, TickReceiver) {
        Self::spawn(Duration::from_secs(1))
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop ticking now.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
