//! Terminal rendering of the live session display.

use std::io::Write;
use std::sync::Mutex;
use std::time::Instant;

use gyrolog_common::clock::RateController;
use gyrolog_processing::chart::AccelChart;
use gyrolog_processing::readout::OrientationReadout;
use gyrolog_session::{DisplaySink, SessionStatus};

const REFRESH_HZ: u32 = 10;

#[derive(Default)]
struct Readings {
    orientation: Option<OrientationReadout>,
    speed: String,
    accel: Option<(f64, f64, f64)>,
    samples: usize,
    elapsed: String,
}

/// Renders display updates to stdout.
///
/// With a live line, readings are redrawn in place at a capped rate.
/// Status changes always get their own line.
pub struct TerminalDisplay {
    live_line: bool,
    started: Instant,
    readings: Mutex<Readings>,
    rate: Mutex<RateController>,
}

impl TerminalDisplay {
    pub fn new(live_line: bool) -> Self {
        Self {
            live_line,
            started: Instant::now(),
            readings: Mutex::new(Readings {
                speed: "0.00".to_string(),
                elapsed: "00:00:00".to_string(),
                ..Default::default()
            }),
            rate: Mutex::new(RateController::new(REFRESH_HZ)),
        }
    }

    /// End the live line so subsequent output starts on a fresh line.
    pub fn finish_line(&self) {
        if self.live_line {
            self.redraw();
            println!();
        }
    }

    fn maybe_redraw(&self) {
        if !self.live_line {
            return;
        }
        let now_ms = self.started.elapsed().as_millis() as u64;
        let due = match self.rate.lock() {
            Ok(mut rate) => rate.should_tick(now_ms),
            Err(_) => false,
        };
        if due {
            self.redraw();
        }
    }

    fn redraw(&self) {
        let Ok(readings) = self.readings.lock() else {
            return;
        };
        let (beta, gamma, alpha) = readings
            .orientation
            .as_ref()
            .map(|r| (r.beta_text.as_str(), r.gamma_text.as_str(), r.alpha_text.as_str()))
            .unwrap_or(("0.00", "0.00", "0.00"));
        let (x, y, z) = readings.accel.unwrap_or_default();

        let mut stdout = std::io::stdout().lock();
        let _ = write!(
            stdout,
            "\r  {} | β {beta:>7} γ {gamma:>7} α {alpha:>7} | a {x:>6.2} {y:>6.2} {z:>6.2} | {} ft/s | {} samples   ",
            readings.elapsed, readings.speed, readings.samples,
        );
        let _ = stdout.flush();
    }
}

impl DisplaySink for TerminalDisplay {
    fn orientation(&self, readout: &OrientationReadout) {
        if let Ok(mut readings) = self.readings.lock() {
            readings.orientation = Some(readout.clone());
        }
        self.maybe_redraw();
    }

    fn speed(&self, text: &str) {
        if let Ok(mut readings) = self.readings.lock() {
            readings.speed = text.to_string();
        }
    }

    fn chart(&self, chart: &AccelChart) {
        if let Ok(mut readings) = self.readings.lock() {
            let latest = chart.latest();
            readings.accel = Some((latest.x, latest.y, latest.z));
        }
        self.maybe_redraw();
    }

    fn sample_count(&self, count: usize) {
        if let Ok(mut readings) = self.readings.lock() {
            readings.samples = count;
        }
    }

    fn elapsed(&self, text: &str) {
        if let Ok(mut readings) = self.readings.lock() {
            readings.elapsed = text.to_string();
        }
        self.maybe_redraw();
    }

    fn status(&self, status: SessionStatus) {
        if self.live_line {
            println!();
        }
        println!("[{}]", status.label());
    }
}
