//! Rolling window behind the live acceleration graph.

use std::collections::VecDeque;

use crate::normalize::Vector3;

/// Default number of points kept per axis.
pub const DEFAULT_CHART_WINDOW: usize = 50;

/// Fixed-width, zero-initialised history of accelerometer output per axis.
///
/// Each push appends one point per axis and drops the oldest, so the
/// series always hold exactly `window` points.
#[derive(Debug, Clone)]
pub struct AccelChart {
    window: usize,
    x: VecDeque<f64>,
    y: VecDeque<f64>,
    z: VecDeque<f64>,
}

impl Default for AccelChart {
    fn default() -> Self {
        Self::new(DEFAULT_CHART_WINDOW)
    }
}

impl AccelChart {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            x: VecDeque::from(vec![0.0; window]),
            y: VecDeque::from(vec![0.0; window]),
            z: VecDeque::from(vec![0.0; window]),
        }
    }

    pub fn push(&mut self, accel: Vector3) {
        for (series, value) in [
            (&mut self.x, accel.x),
            (&mut self.y, accel.y),
            (&mut self.z, accel.z),
        ] {
            series.push_back(value);
            series.pop_front();
        }
    }

    /// Refill every series with zeros.
    pub fn reset(&mut self) {
        *self = Self::new(self.window);
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Series in chronological order, oldest first.
    pub fn series_x(&self) -> impl Iterator<Item = f64> + '_ {
        self.x.iter().copied()
    }

    pub fn series_y(&self) -> impl Iterator<Item = f64> + '_ {
        self.y.iter().copied()
    }

    pub fn series_z(&self) -> impl Iterator<Item = f64> + '_ {
        self.z.iter().copied()
    }

    /// Most recent point on each axis.
    pub fn latest(&self) -> Vector3 {
        Vector3::new(
            self.x.back().copied().unwrap_or(0.0),
            self.y.back().copied().unwrap_or(0.0),
            self.z.back().copied().unwrap_or(0.0),
        )
    }
}
