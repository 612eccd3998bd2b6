//! Recording session state machine.

use std::sync::Arc;
use std::time::Duration;

use gyrolog_common::clock::{format_elapsed, Clock, RecordingClock};
use gyrolog_common::config::RecordingDefaults;
use gyrolog_common::error::{GyrologError, GyrologResult};
use gyrolog_export::{export_csv, CsvExport};
use gyrolog_processing::chart::AccelChart;
use gyrolog_processing::normalize::{normalize_motion, normalize_orientation};
use gyrolog_processing::readout::{format_speed, OrientationReadout};
use gyrolog_processing::speed::SpeedIntegrator;
use gyrolog_sensor_model::event::{MotionEvent, OrientationEvent};
use gyrolog_sensor_model::sample::RecordingBuffer;

use crate::display::{DisplaySink, SessionStatus};
use crate::recorder;
use crate::ticker::ElapsedTicker;
use crate::SensorObserver;

/// State of a recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not recording. Any previous buffer is frozen and exportable.
    Idle,
    /// Motion events are appended to the buffer.
    Recording,
}

/// Owns the recording state, buffer, speed estimate, and start anchor.
///
/// Orientation and motion events drive the live display in every state;
/// only motion events in [`SessionState::Recording`] reach the buffer.
pub struct SessionController {
    state: SessionState,
    buffer: RecordingBuffer,
    speed: SpeedIntegrator,
    chart: AccelChart,
    anchor: Option<RecordingClock>,
    clock: Arc<dyn Clock>,
    display: Arc<dyn DisplaySink>,
    ticker: Option<ElapsedTicker>,
    timer_period: Duration,
}

impl SessionController {
    pub fn new(
        defaults: &RecordingDefaults,
        clock: Arc<dyn Clock>,
        display: Arc<dyn DisplaySink>,
    ) -> Self {
        Self {
            state: SessionState::Idle,
            buffer: RecordingBuffer::new(),
            speed: SpeedIntegrator::from_defaults(defaults),
            chart: AccelChart::new(defaults.chart_window),
            anchor: None,
            clock,
            display,
            ticker: None,
            timer_period: Duration::from_millis(defaults.timer_period_ms),
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == SessionState::Recording
    }

    /// Start recording.
    ///
    /// Allocates a fresh buffer, anchors the recording clock, zeroes the
    /// speed estimate, and starts the elapsed-time ticker. Fails if a
    /// recording is already running; use [`restart`](Self::restart) to
    /// force a stop first.
    pub fn start(&mut self) -> GyrologResult<()> {
        if self.state == SessionState::Recording {
            return Err(GyrologError::invalid_state("Recording already in progress"));
        }

        let anchor = RecordingClock::start(self.clock.as_ref());
        self.buffer = RecordingBuffer::new();
        self.speed.reset();
        self.ticker = ElapsedTicker::spawn(
            self.clock.clone(),
            anchor.clone(),
            self.timer_period,
            self.display.clone(),
        );
        if self.ticker.is_none() {
            tracing::debug!("No async runtime available, elapsed timer disabled");
        }

        tracing::info!(
            epoch_wall = %anchor.epoch_wall().to_rfc3339(),
            "Recording started"
        );

        self.anchor = Some(anchor);
        self.state = SessionState::Recording;

        self.display.sample_count(0);
        self.display.elapsed(&format_elapsed(0));
        self.display.speed(&format_speed(0.0));
        self.display.status(SessionStatus::Recording);
        Ok(())
    }

    /// Stop recording. A no-op when already idle.
    ///
    /// The ticker is cancelled and the buffer frozen before this returns,
    /// so a following export sees a stable snapshot.
    pub fn stop(&mut self) {
        if self.state != SessionState::Recording {
            return;
        }

        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        self.buffer.freeze();
        self.state = SessionState::Idle;

        let elapsed_ms = self.elapsed_ms();
        self.display.elapsed(&format_elapsed(elapsed_ms));
        self.display.status(SessionStatus::Stopped);

        tracing::info!(
            samples = self.buffer.len(),
            duration_ms = elapsed_ms,
            "Recording stopped"
        );
    }

    /// Stop any running recording, then start a new one.
    pub fn restart(&mut self) -> GyrologResult<()> {
        self.stop();
        self.start()
    }

    /// Handle an orientation event. Never touches recording state.
    pub fn handle_orientation(&mut self, event: &OrientationEvent) -> OrientationReadout {
        let readout = OrientationReadout::from_orientation(&normalize_orientation(event));
        self.display.orientation(&readout);
        readout
    }

    /// Handle a motion event.
    ///
    /// Always updates speed and chart. While recording, also appends one
    /// sample and returns the new buffer length.
    pub fn handle_motion(&mut self, event: &MotionEvent) -> Option<usize> {
        let now_ms = self.clock.now_ms();
        let motion = normalize_motion(event);

        self.speed.on_motion(motion.linear_accel, now_ms);
        self.display.speed(&format_speed(self.speed.speed_ft_s()));

        self.chart.push(motion.accel_with_gravity);
        self.display.chart(&self.chart);

        if self.state != SessionState::Recording {
            return None;
        }
        let anchor = self.anchor.as_ref()?;

        match recorder::record(&mut self.buffer, &motion, anchor, now_ms) {
            Ok(count) => {
                self.display.sample_count(count);
                Some(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Dropped motion sample");
                None
            }
        }
    }

    /// Build the CSV export of the last stopped recording.
    ///
    /// Returns `Ok(None)` while recording or when the buffer is empty; no
    /// artifact is produced in either case.
    pub fn export(&self) -> GyrologResult<Option<CsvExport>> {
        if self.state == SessionState::Recording {
            tracing::warn!("Export requested while recording, ignoring");
            return Ok(None);
        }
        let Some(anchor) = self.anchor.as_ref() else {
            return Ok(None);
        };
        export_csv(self.buffer.samples(), anchor.epoch_unix_ms())
    }

    /// Zero the speed estimate and refresh its readout.
    pub fn reset_speed(&mut self) {
        self.speed.reset();
        self.display.speed(&format_speed(0.0));
    }

    /// Reset the reference time for the next speed integration step.
    pub fn mark_motion_reference(&mut self) {
        self.speed.mark(self.clock.now_ms());
    }

    /// Refill the live chart with zeros.
    pub fn reset_chart(&mut self) {
        self.chart.reset();
        self.display.chart(&self.chart);
    }

    /// The recording buffer: live while recording, frozen afterwards.
    pub fn buffer(&self) -> &RecordingBuffer {
        &self.buffer
    }

    pub fn sample_count(&self) -> usize {
        self.buffer.len()
    }

    pub fn speed_mps(&self) -> f64 {
        self.speed.speed_mps()
    }

    pub fn speed_ft_s(&self) -> f64 {
        self.speed.speed_ft_s()
    }

    pub fn chart(&self) -> &AccelChart {
        &self.chart
    }

    /// Anchor of the current or most recent recording.
    pub fn recording_clock(&self) -> Option<&RecordingClock> {
        self.anchor.as_ref()
    }

    /// Milliseconds since the current recording started; for a stopped
    /// recording, the time covered by its last sample.
    pub fn elapsed_ms(&self) -> u64 {
        match (self.state, self.anchor.as_ref()) {
            (SessionState::Recording, Some(anchor)) => anchor.elapsed_ms(self.clock.now_ms()),
            _ => self.buffer.last_timestamp_ms().unwrap_or(0),
        }
    }

    /// Whether a live elapsed ticker is running.
    pub fn has_ticker(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn display(&self) -> &Arc<dyn DisplaySink> {
        &self.display
    }
}

impl SensorObserver for SessionController {
    fn on_orientation(&mut self, event: &OrientationEvent) {
        self.handle_orientation(event);
    }

    fn on_motion(&mut self, event: &MotionEvent) {
        self.handle_motion(event);
    }

    fn on_start(&mut self) -> GyrologResult<()> {
        self.start()
    }

    fn on_stop(&mut self) {
        self.stop();
    }
}
