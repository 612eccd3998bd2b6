//! Clock and timing utilities for the recording pipeline.
//!
//! Sample timestamps are milliseconds relative to a monotonic anchor
//! captured when recording starts. This module provides:
//! - A [`Clock`] abstraction with a real and a manually driven implementation
//! - The per-session [`RecordingClock`] anchor
//! - Elapsed-time formatting for the live timer readout
//! - Refresh rate limiting for terminal displays

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};

/// Source of monotonic milliseconds.
///
/// Readings never go backwards for a given clock instance.
pub trait Clock: Send + Sync {
    /// Milliseconds since an arbitrary, fixed origin.
    fn now_ms(&self) -> u64;
}

/// Clock backed by [`Instant`], anchored at construction.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can hold one handle while the
/// session under test holds another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    /// Move the clock forward by `delta_ms`.
    pub fn advance(&self, delta_ms: u64) {
        self.now.fetch_add(delta_ms, Ordering::SeqCst);
    }

    /// Jump to an absolute reading. Values earlier than the current reading
    /// are ignored to preserve monotonicity.
    pub fn set(&self, now_ms: u64) {
        self.now.fetch_max(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Anchor for one recording session.
#[derive(Debug, Clone)]
pub struct RecordingClock {
    /// Monotonic reading at recording start.
    start_ms: u64,

    /// Wall-clock time at recording start.
    epoch_wall: DateTime<Utc>,
}

impl RecordingClock {
    /// Anchor a new recording at the clock's current reading.
    pub fn start(clock: &dyn Clock) -> Self {
        Self {
            start_ms: clock.now_ms(),
            epoch_wall: Utc::now(),
        }
    }

    /// Create an anchor from known values (replays, tests).
    pub fn from_parts(start_ms: u64, epoch_wall: DateTime<Utc>) -> Self {
        Self {
            start_ms,
            epoch_wall,
        }
    }

    /// Milliseconds between the anchor and `now_ms`, zero if `now_ms` is earlier.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.start_ms)
    }

    /// Monotonic reading at recording start.
    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    /// Wall-clock time at recording start.
    pub fn epoch_wall(&self) -> DateTime<Utc> {
        self.epoch_wall
    }

    /// Wall-clock recording start as Unix milliseconds.
    pub fn epoch_unix_ms(&self) -> i64 {
        self.epoch_wall.timestamp_millis()
    }

    /// Convert milliseconds to fractional seconds.
    pub fn ms_to_secs(ms: u64) -> f64 {
        ms as f64 / 1_000.0
    }
}

/// Format an elapsed duration as `MM:SS:CC` (minutes, seconds, centiseconds).
///
/// Minutes wrap at 60, matching the live timer readout.
pub fn format_elapsed(elapsed_ms: u64) -> String {
    let centis = (elapsed_ms % 1_000) / 10;
    let secs = (elapsed_ms / 1_000) % 60;
    let mins = (elapsed_ms / 60_000) % 60;
    format!("{mins:02}:{secs:02}:{centis:02}")
}

/// Rate limiter for display refreshes.
#[derive(Debug)]
pub struct RateController {
    target_interval_ms: u64,
    last_tick_ms: Option<u64>,
}

impl RateController {
    /// Create a controller targeting the given Hz rate.
    pub fn new(target_hz: u32) -> Self {
        Self {
            target_interval_ms: 1_000 / target_hz.max(1) as u64,
            last_tick_ms: None,
        }
    }

    /// Check if enough time has passed for the next tick.
    /// Returns true and updates internal state if ready.
    /// The first call always returns true.
    pub fn should_tick(&mut self, now_ms: u64) -> bool {
        match self.last_tick_ms {
            None => {
                self.last_tick_ms = Some(now_ms);
                true
            }
            Some(last) if now_ms >= last + self.target_interval_ms => {
                self.last_tick_ms = Some(now_ms);
                true
            }
            _ => false,
        }
    }

    /// Target interval in milliseconds.
    pub fn interval_ms(&self) -> u64 {
        self.target_interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_clock_never_goes_back() {
        let clock = MonotonicClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn test_manual_clock_is_shared_between_clones() {
        let clock = ManualClock::new(100);
        let handle = clock.clone();
        handle.advance(25);
        assert_eq!(clock.now_ms(), 125);

        handle.set(50); // earlier reading is ignored
        assert_eq!(clock.now_ms(), 125);
        handle.set(400);
        assert_eq!(clock.now_ms(), 400);
    }

    #[test]
    fn test_recording_clock_elapsed() {
        let clock = ManualClock::new(1_000);
        let anchor = RecordingClock::start(&clock);
        assert_eq!(anchor.start_ms(), 1_000);
        assert_eq!(anchor.elapsed_ms(1_000), 0);
        assert_eq!(anchor.elapsed_ms(1_250), 250);
        assert_eq!(anchor.elapsed_ms(900), 0);
    }

    #[test]
    fn test_ms_to_secs_conversion() {
        assert!((RecordingClock::ms_to_secs(1_500) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_rate_controller() {
        let mut ctrl = RateController::new(10);
        assert_eq!(ctrl.interval_ms(), 100);
        assert!(ctrl.should_tick(0)); // first tick always fires
        assert!(!ctrl.should_tick(40));
        assert!(ctrl.should_tick(100));
        assert!(!ctrl.should_tick(199));
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00:00");
        assert_eq!(format_elapsed(9), "00:00:00");
        assert_eq!(format_elapsed(61_234), "01:01:23");
        assert_eq!(format_elapsed(59_999), "00:59:99");
        // minutes wrap at one hour
        assert_eq!(format_elapsed(3_600_000 + 5_000), "00:05:00");
    }
}
