//! Cancellable timer tasks feeding actions back into the app channel.
//!
//! Both timers are plain spawned tasks holding a cloned action sender, and
//! both abort their task on drop, so replacing the handle is how a caller
//! cancels. Two live tickers would double-count the clock; the memory page
//! therefore always overwrites its ticker slot on (re)start.

use std::time::Duration;

use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle};
use tracing::debug;

use crate::action::Action;

/// Repeating interval task driving the game clock.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn start(tx: UnboundedSender<Action>, period: Duration) -> Self {
        debug!(?period, "clock ticker started");
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first interval tick completes immediately; skip it so the
            // clock shows 0 for a full period.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(Action::ClockTick).is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// One-shot task flipping a mismatched pair back after a visible delay.
/// Carries the game epoch it was scheduled under.
#[derive(Debug)]
pub struct Delay {
    handle: JoinHandle<()>,
}

impl Delay {
    pub fn flip_back(tx: UnboundedSender<Action>, delay: Duration, epoch: u64) -> Self {
        debug!(?delay, epoch, "flip-back scheduled");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tx.send(Action::FlipConcealed { epoch }).ok();
        });
        Self { handle }
    }
}

impl Drop for Delay {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn delay_delivers_its_epoch() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _delay = Delay::flip_back(tx, Duration::from_millis(5), 42);
        let action = timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("delay did not fire")
            .expect("channel closed");
        assert_eq!(action, Action::FlipConcealed { epoch: 42 });
    }

    #[tokio::test]
    async fn dropped_delay_never_fires() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let delay = Delay::flip_back(tx, Duration::from_millis(20), 1);
        drop(delay);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn ticker_ticks_repeatedly() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _ticker = Ticker::start(tx, Duration::from_millis(5));
        for _ in 0..2 {
            let action = timeout(Duration::from_secs(1), rx.recv())
                .await
                .expect("ticker did not tick")
                .expect("channel closed");
            assert_eq!(action, Action::ClockTick);
        }
    }

    #[tokio::test]
    async fn dropped_ticker_stops() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = Ticker::start(tx, Duration::from_millis(5));
        drop(ticker);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(rx.try_recv().is_err());
    }
}
