//! Observer interface for the live display.

use gyrolog_processing::chart::AccelChart;
use gyrolog_processing::readout::OrientationReadout;

/// What the status line shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Subscribed, not recording yet.
    Ready,
    Recording,
    /// A recording has been stopped and can be exported.
    Stopped,
    /// Unsubscribed from sensors.
    Inactive,
}

impl SessionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Recording => "Recording...",
            Self::Stopped => "Recording Stopped",
            Self::Inactive => "Inactive",
        }
    }
}

/// Receives live display updates.
///
/// Calls arrive from sensor handlers and, for [`elapsed`](Self::elapsed),
/// from the ticker task, hence `Send + Sync`. Every method defaults to a
/// no-op so sinks only implement what they render.
pub trait DisplaySink: Send + Sync {
    fn orientation(&self, _readout: &OrientationReadout) {}

    /// Speed in ft/s, already formatted.
    fn speed(&self, _text: &str) {}

    fn chart(&self, _chart: &AccelChart) {}

    fn sample_count(&self, _count: usize) {}

    /// Elapsed recording time as `MM:SS:CC`.
    fn elapsed(&self, _text: &str) {}

    fn status(&self, _status: SessionStatus) {}
}

/// Display that renders nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl DisplaySink for NullDisplay {}

/// Display that emits every update as a `tracing` event at trace level,
/// except status changes which are logged at info.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDisplay;

impl DisplaySink for TracingDisplay {
    fn orientation(&self, readout: &OrientationReadout) {
        tracing::trace!(
            x = %readout.beta_text,
            y = %readout.gamma_text,
            z = %readout.alpha_text,
            "orientation"
        );
    }

    fn speed(&self, text: &str) {
        tracing::trace!(ft_s = %text, "speed");
    }

    fn sample_count(&self, count: usize) {
        tracing::trace!(count, "samples");
    }

    fn elapsed(&self, text: &str) {
        tracing::trace!(elapsed = %text, "timer");
    }

    fn status(&self, status: SessionStatus) {
        tracing::info!(status = status.label(), "Session status");
    }
}
