//! Sample recorder: one normalized motion event in, one buffer row out.

use gyrolog_common::clock::RecordingClock;
use gyrolog_processing::normalize::NormalizedMotion;
use gyrolog_sensor_model::sample::{BufferError, MotionSample, RecordingBuffer};

/// Build the sample for a motion event arriving at `now_ms`.
///
/// The timestamp is `now_ms` relative to the recording start; the first
/// sample may be stamped 0.
pub fn build_sample(
    motion: &NormalizedMotion,
    anchor: &RecordingClock,
    now_ms: u64,
) -> MotionSample {
    MotionSample {
        timestamp_ms: anchor.elapsed_ms(now_ms),
        gyro_alpha: motion.rotation_rate.alpha,
        gyro_beta: motion.rotation_rate.beta,
        gyro_gamma: motion.rotation_rate.gamma,
        accel_x: motion.accel_with_gravity.x,
        accel_y: motion.accel_with_gravity.y,
        accel_z: motion.accel_with_gravity.z,
    }
}

/// Append a sample to `buffer`, returning the new buffer length.
pub fn record(
    buffer: &mut RecordingBuffer,
    motion: &NormalizedMotion,
    anchor: &RecordingClock,
    now_ms: u64,
) -> Result<usize, BufferError> {
    buffer.push(build_sample(motion, anchor, now_ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gyrolog_common::clock::ManualClock;
    use gyrolog_processing::normalize::{RotationRate, Vector3};

    fn motion() -> NormalizedMotion {
        NormalizedMotion {
            accel_with_gravity: Vector3::new(0.1, 0.2, 9.8),
            linear_accel: Vector3::new(5.0, 5.0, 5.0),
            rotation_rate: RotationRate {
                alpha: 10.0,
                beta: 20.0,
                gamma: 30.0,
            },
        }
    }

    #[test]
    fn test_first_sample_may_be_zero() {
        let clock = ManualClock::new(5_000);
        let anchor = RecordingClock::start(&clock);
        let mut buffer = RecordingBuffer::new();
        assert_eq!(record(&mut buffer, &motion(), &anchor, 5_000).unwrap(), 1);
        assert_eq!(buffer.samples()[0].timestamp_ms, 0);
    }

    #[test]
    fn test_sample_uses_gravity_accel_not_linear() {
        let clock = ManualClock::new(0);
        let anchor = RecordingClock::start(&clock);
        let sample = build_sample(&motion(), &anchor, 42);
        assert_eq!(sample.timestamp_ms, 42);
        assert_eq!(sample.accel_x, 0.1);
        assert_eq!(sample.accel_z, 9.8);
        assert_eq!(sample.gyro_alpha, 10.0);
        assert_eq!(sample.gyro_gamma, 30.0);
    }
}
