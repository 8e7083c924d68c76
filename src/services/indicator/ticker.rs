//! Background task that keeps the current-time marker fresh.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::{Clock, CurrentTimeTracker, IndicatorParams, IndicatorUpdate, TICK_INTERVAL};

const UPDATE_CHANNEL_CAPACITY: usize = 16;

/// Handle to a running ticker task. Dropping it stops the task.
#[derive(Debug)]
pub struct IndicatorTicker {
    handle: JoinHandle<()>,
}

impl IndicatorTicker {
    /// Start ticking: once immediately, then every [`TICK_INTERVAL`] and
    /// whenever `params` changes.
    ///
    /// The task ends when the params sender or the update receiver goes away.
    pub fn spawn(
        clock: Arc<dyn Clock>,
        mut params: watch::Receiver<IndicatorParams>,
    ) -> (Self, mpsc::Receiver<IndicatorUpdate>) {
        let (tx, rx) = mpsc::channel(UPDATE_CHANNEL_CAPACITY);

        let handle = tokio::spawn(async move {
            let mut tracker = CurrentTimeTracker::new(params.borrow_and_update().clone());
            let mut ticker = interval(TICK_INTERVAL);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    changed = params.changed() => {
                        if changed.is_err() {
                            log::debug!("Indicator params closed, stopping ticker");
                            break;
                        }
                        tracker.set_params(params.borrow_and_update().clone());
                    }
                }

                let update = tracker.tick(clock.as_ref());
                if tx.send(update).await.is_err() {
                    log::debug!("Indicator receiver dropped, stopping ticker");
                    break;
                }
            }
        });

        (Self { handle }, rx)
    }
}

impl Drop for IndicatorTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
