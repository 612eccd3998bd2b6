//! Per-column statistics over a recording, used by `gyrolog inspect`.

use serde::Serialize;

use gyrolog_sensor_model::sample::MotionSample;

use crate::csv_export::CSV_HEADER;

/// Range of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Summary of a recording.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordingSummary {
    pub samples: usize,
    pub first_ms: u64,
    pub last_ms: u64,
    pub columns: Vec<ColumnRange>,
}

impl RecordingSummary {
    pub fn duration_ms(&self) -> u64 {
        self.last_ms.saturating_sub(self.first_ms)
    }

    /// Mean sampling rate in Hz, if the recording spans any time.
    pub fn sample_rate_hz(&self) -> Option<f64> {
        let duration_ms = self.duration_ms();
        if duration_ms == 0 || self.samples < 2 {
            return None;
        }
        Some((self.samples - 1) as f64 * 1_000.0 / duration_ms as f64)
    }
}

/// Summarize samples. Returns `None` for an empty recording.
pub fn summarize(samples: &[MotionSample]) -> Option<RecordingSummary> {
    let first = samples.first()?;
    let last = samples.last()?;

    let mut min = [f64::INFINITY; 6];
    let mut max = [f64::NEG_INFINITY; 6];
    let mut sum = [0.0f64; 6];
    for sample in samples {
        for (i, value) in sample.channels().into_iter().enumerate() {
            min[i] = min[i].min(value);
            max[i] = max[i].max(value);
            sum[i] += value;
        }
    }

    let columns = CSV_HEADER[1..]
        .iter()
        .enumerate()
        .map(|(i, &name)| ColumnRange {
            name,
            min: min[i],
            max: max[i],
            mean: sum[i] / samples.len() as f64,
        })
        .collect();

    Some(RecordingSummary {
        samples: samples.len(),
        first_ms: first.timestamp_ms,
        last_ms: last.timestamp_ms,
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(timestamp_ms: u64, accel_x: f64) -> MotionSample {
        MotionSample {
            timestamp_ms,
            gyro_alpha: 0.0,
            gyro_beta: 0.0,
            gyro_gamma: 0.0,
            accel_x,
            accel_y: 0.0,
            accel_z: 9.8,
        }
    }

    #[test]
    fn test_empty_has_no_summary() {
        assert_eq!(summarize(&[]), None);
    }

    #[test]
    fn test_summary_ranges() {
        let summary = summarize(&[sample(0, -1.0), sample(500, 3.0), sample(1_000, 1.0)]).unwrap();
        assert_eq!(summary.samples, 3);
        assert_eq!(summary.duration_ms(), 1_000);
        assert!((summary.sample_rate_hz().unwrap() - 2.0).abs() < 1e-12);

        let accel_x = &summary.columns[3];
        assert_eq!(accel_x.name, "Accel_X");
        assert_eq!(accel_x.min, -1.0);
        assert_eq!(accel_x.max, 3.0);
        assert!((accel_x.mean - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_sample_has_no_rate() {
        let summary = summarize(&[sample(10, 0.0)]).unwrap();
        assert_eq!(summary.duration_ms(), 0);
        assert_eq!(summary.sample_rate_hz(), None);
    }
}
