//! Recorded motion samples and the session recording buffer.

use serde::{Deserialize, Serialize};

/// Milliseconds since recording start.
pub type TimestampMs = u64;

/// One recorded motion sample. Immutable once appended to a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    /// Milliseconds since recording start.
    pub timestamp_ms: TimestampMs,

    /// Rotation rate (deg/s).
    pub gyro_alpha: f64,
    pub gyro_beta: f64,
    pub gyro_gamma: f64,

    /// Acceleration including gravity (m/s²).
    pub accel_x: f64,
    pub accel_y: f64,
    pub accel_z: f64,
}

impl MotionSample {
    /// The six numeric channels in export column order.
    pub fn channels(&self) -> [f64; 6] {
        [
            self.gyro_alpha,
            self.gyro_beta,
            self.gyro_gamma,
            self.accel_x,
            self.accel_y,
            self.accel_z,
        ]
    }
}

/// Reasons an append to a [`RecordingBuffer`] is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("recording buffer is frozen")]
    Frozen,

    #[error("sample at {timestamp_ms}ms precedes previous sample at {previous_ms}ms")]
    OutOfOrder {
        previous_ms: TimestampMs,
        timestamp_ms: TimestampMs,
    },
}

/// Ordered, append-only sequence of samples for one recording session.
///
/// A buffer accepts appends until [`freeze`](Self::freeze) is called, after
/// which it is read-only. Timestamps never decrease. There is no capacity
/// bound; long sessions grow without limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingBuffer {
    samples: Vec<MotionSample>,
    frozen: bool,
}

impl RecordingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample, returning the new length.
    pub fn push(&mut self, sample: MotionSample) -> Result<usize, BufferError> {
        if self.frozen {
            return Err(BufferError::Frozen);
        }
        if let Some(previous_ms) = self.last_timestamp_ms() {
            if sample.timestamp_ms < previous_ms {
                return Err(BufferError::OutOfOrder {
                    previous_ms,
                    timestamp_ms: sample.timestamp_ms,
                });
            }
        }
        self.samples.push(sample);
        Ok(self.samples.len())
    }

    /// Stop accepting appends.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[MotionSample] {
        &self.samples
    }

    pub fn last_timestamp_ms(&self) -> Option<TimestampMs> {
        self.samples.last().map(|s| s.timestamp_ms)
    }

    /// Time spanned by the buffer, first to last sample.
    pub fn duration_ms(&self) -> TimestampMs {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.timestamp_ms - first.timestamp_ms,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_at(timestamp_ms: TimestampMs) -> MotionSample {
        MotionSample {
            timestamp_ms,
            gyro_alpha: 1.0,
            gyro_beta: 2.0,
            gyro_gamma: 3.0,
            accel_x: 0.1,
            accel_y: 0.2,
            accel_z: 9.8,
        }
    }

    #[test]
    fn test_push_returns_new_length() {
        let mut buffer = RecordingBuffer::new();
        assert_eq!(buffer.push(sample_at(0)).unwrap(), 1);
        assert_eq!(buffer.push(sample_at(0)).unwrap(), 2);
        assert_eq!(buffer.push(sample_at(17)).unwrap(), 3);
        assert_eq!(buffer.duration_ms(), 17);
    }

    #[test]
    fn test_frozen_buffer_rejects_appends() {
        let mut buffer = RecordingBuffer::new();
        buffer.push(sample_at(0)).unwrap();
        buffer.freeze();
        assert_eq!(buffer.push(sample_at(5)), Err(BufferError::Frozen));
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_out_of_order_sample_rejected() {
        let mut buffer = RecordingBuffer::new();
        buffer.push(sample_at(40)).unwrap();
        assert_eq!(
            buffer.push(sample_at(39)),
            Err(BufferError::OutOfOrder {
                previous_ms: 40,
                timestamp_ms: 39
            })
        );
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_channels_follow_export_order() {
        let s = sample_at(0);
        assert_eq!(s.channels(), [1.0, 2.0, 3.0, 0.1, 0.2, 9.8]);
    }

    proptest! {
        #[test]
        fn prop_sorted_timestamps_always_accepted(
            mut stamps in proptest::collection::vec(0u64..100_000, 0..200)
        ) {
            stamps.sort_unstable();
            let mut buffer = RecordingBuffer::new();
            for (i, t) in stamps.iter().enumerate() {
                prop_assert_eq!(buffer.push(sample_at(*t)).unwrap(), i + 1);
            }
            let recorded: Vec<u64> = buffer.samples().iter().map(|s| s.timestamp_ms).collect();
            prop_assert_eq!(recorded, stamps);
        }
    }
}
