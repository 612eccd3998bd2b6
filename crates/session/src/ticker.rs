//! Periodic elapsed-time display refresh.
//!
//! The ticker only renders; recorded timestamps come from sample arrival
//! time, so pausing or losing ticks never affects recorded data.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use gyrolog_common::clock::{format_elapsed, Clock, RecordingClock};

use crate::display::DisplaySink;

/// A running elapsed-time refresh task.
pub struct ElapsedTicker {
    stop_flag: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl ElapsedTicker {
    /// Start refreshing `display` every `period`.
    ///
    /// Returns `None` when called outside a Tokio runtime; the session then
    /// runs without a live timer.
    pub fn spawn(
        clock: Arc<dyn Clock>,
        anchor: RecordingClock,
        period: Duration,
        display: Arc<dyn DisplaySink>,
    ) -> Option<Self> {
        let runtime = tokio::runtime::Handle::try_current().ok()?;
        let stop_flag = Arc::new(AtomicBool::new(false));
        let task_stop = stop_flag.clone();
        let period = period.max(Duration::from_millis(1));

        let handle = runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if task_stop.load(Ordering::SeqCst) {
                    break;
                }
                let elapsed = anchor.elapsed_ms(clock.now_ms());
                display.elapsed(&format_elapsed(elapsed));
            }
        });

        Some(Self { stop_flag, handle })
    }

    /// Stop the refresh. No further tick renders once this returns, except
    /// one already in progress on another worker thread.
    pub fn cancel(self) {
        self.stop_flag.store(true, Ordering::SeqCst);
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ElapsedTicker {
    fn drop(&mut self) {
        self.stop_flag.store(true, Ordering::SeqCst);
        self.handle.abort();
    }
}
