//! Scalar speed estimate from linear acceleration.
//!
//! The estimate is plain forward integration of the acceleration
//! magnitude. It only ever grows: there is no decay and no drift
//! correction, so a long session drifts upward without bound. Callers
//! reset it at activation and at each recording start.

use gyrolog_common::config::RecordingDefaults;

use crate::normalize::Vector3;

/// Linear acceleration (m/s²) at or below which a step is treated as noise.
pub const DEFAULT_NOISE_THRESHOLD: f64 = 0.2;

/// Conversion factor from m/s to ft/s.
pub const FEET_PER_METER: f64 = 3.28084;

/// Running speed estimate in m/s.
#[derive(Debug, Clone)]
pub struct SpeedIntegrator {
    current_speed: f64,
    noise_threshold: f64,
    last_motion_ms: Option<u64>,
}

impl Default for SpeedIntegrator {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_THRESHOLD)
    }
}

impl SpeedIntegrator {
    pub fn new(noise_threshold: f64) -> Self {
        Self {
            current_speed: 0.0,
            noise_threshold,
            last_motion_ms: None,
        }
    }

    pub fn from_defaults(defaults: &RecordingDefaults) -> Self {
        Self::new(defaults.speed_noise_threshold)
    }

    /// Integrate one step of `dt_secs` seconds.
    ///
    /// Negative or non-finite `dt_secs` is treated as zero. Returns the
    /// updated speed in m/s.
    pub fn integrate(&mut self, ax: f64, ay: f64, az: f64, dt_secs: f64) -> f64 {
        let dt = if dt_secs.is_finite() {
            dt_secs.max(0.0)
        } else {
            0.0
        };
        let magnitude = Vector3::new(ax, ay, az).magnitude();
        if magnitude > self.noise_threshold {
            self.current_speed += magnitude * dt;
        }
        self.current_speed
    }

    /// Integrate a motion event arriving at `now_ms`.
    ///
    /// `dt` is the time since the previous motion event (or since
    /// [`mark`](Self::mark)). The first event with no prior mark
    /// integrates over zero time.
    pub fn on_motion(&mut self, linear_accel: Vector3, now_ms: u64) -> f64 {
        let dt_secs = match self.last_motion_ms {
            Some(last) if now_ms >= last => (now_ms - last) as f64 / 1_000.0,
            _ => 0.0,
        };
        self.last_motion_ms = Some(now_ms);
        self.integrate(linear_accel.x, linear_accel.y, linear_accel.z, dt_secs)
    }

    /// Set the reference time for the next `dt`.
    pub fn mark(&mut self, now_ms: u64) {
        self.last_motion_ms = Some(now_ms);
    }

    /// Zero the speed. The `dt` reference time is left untouched.
    pub fn reset(&mut self) {
        self.current_speed = 0.0;
    }

    pub fn speed_mps(&self) -> f64 {
        self.current_speed
    }

    pub fn speed_ft_s(&self) -> f64 {
        self.current_speed * FEET_PER_METER
    }

    pub fn noise_threshold(&self) -> f64 {
        self.noise_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_constant_accel_two_seconds() {
        let mut speed = SpeedIntegrator::default();
        for _ in 0..20 {
            speed.integrate(1.0, 0.0, 0.0, 0.1);
        }
        assert!((speed.speed_mps() - 2.0).abs() < 1e-9);
        assert!((speed.speed_ft_s() - 6.56168).abs() < 1e-6);
        assert_eq!(format!("{:.2}", speed.speed_ft_s()), "6.56");
    }

    #[test]
    fn test_magnitude_combines_axes() {
        let mut speed = SpeedIntegrator::default();
        speed.integrate(0.6, 0.8, 0.0, 1.0);
        assert!((speed.speed_mps() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut speed = SpeedIntegrator::default();
        speed.integrate(0.2, 0.0, 0.0, 1.0);
        assert_eq!(speed.speed_mps(), 0.0);
    }

    #[test]
    fn test_negative_and_nan_dt_are_zero() {
        let mut speed = SpeedIntegrator::default();
        speed.integrate(5.0, 0.0, 0.0, -1.0);
        speed.integrate(5.0, 0.0, 0.0, f64::NAN);
        assert_eq!(speed.speed_mps(), 0.0);
    }

    #[test]
    fn test_no_decay_when_still() {
        let mut speed = SpeedIntegrator::default();
        speed.integrate(2.0, 0.0, 0.0, 1.0);
        for _ in 0..100 {
            speed.integrate(0.0, 0.0, 0.0, 1.0);
        }
        assert!((speed.speed_mps() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_on_motion_uses_time_between_events() {
        let mut speed = SpeedIntegrator::default();
        speed.mark(1_000);
        speed.on_motion(Vector3::new(0.0, 0.0, 1.0), 1_500);
        assert!((speed.speed_mps() - 0.5).abs() < 1e-12);

        // clock skew backwards integrates nothing
        speed.on_motion(Vector3::new(0.0, 0.0, 1.0), 1_400);
        assert!((speed.speed_mps() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_first_unmarked_event_integrates_zero_time() {
        let mut speed = SpeedIntegrator::default();
        speed.on_motion(Vector3::new(10.0, 0.0, 0.0), 5_000);
        assert_eq!(speed.speed_mps(), 0.0);
    }

    #[test]
    fn test_reset_keeps_reference_time() {
        let mut speed = SpeedIntegrator::default();
        speed.mark(0);
        speed.on_motion(Vector3::new(1.0, 0.0, 0.0), 1_000);
        speed.reset();
        assert_eq!(speed.speed_mps(), 0.0);
        speed.on_motion(Vector3::new(1.0, 0.0, 0.0), 2_000);
        assert!((speed.speed_mps() - 1.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_sub_threshold_never_changes_speed(
            steps in proptest::collection::vec(
                (-0.11f64..0.11, -0.11f64..0.11, -0.11f64..0.11, 0.0f64..5.0),
                0..100,
            )
        ) {
            let mut speed = SpeedIntegrator::default();
            speed.integrate(1.0, 0.0, 0.0, 0.5);
            let before = speed.speed_mps();
            for (ax, ay, az, dt) in steps {
                speed.integrate(ax, ay, az, dt);
            }
            prop_assert_eq!(speed.speed_mps(), before);
        }
    }
}
