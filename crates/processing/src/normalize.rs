//! Event normalization.
//!
//! Orientation angles keep their presence information so the display can
//! tell a genuine 0° apart from a missing reading. Motion channels are
//! zero-filled because recording and integration need a number for every
//! field.

use serde::{Deserialize, Serialize};

use gyrolog_sensor_model::event::{
    AccelerationReading, MotionEvent, OrientationEvent, RotationRateReading,
};

/// Three-axis vector with every component defined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Rotation rate with every component defined (deg/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RotationRate {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

/// Orientation angles, each finite or absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalizedOrientation {
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub gamma: Option<f64>,
}

/// Motion channels with absent fields replaced by zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalizedMotion {
    /// Raw accelerometer output; recorded and charted.
    pub accel_with_gravity: Vector3,

    /// Gravity-removed acceleration; only feeds speed integration.
    pub linear_accel: Vector3,

    pub rotation_rate: RotationRate,
}

/// Normalize an orientation event. Non-finite angles count as absent.
pub fn normalize_orientation(event: &OrientationEvent) -> NormalizedOrientation {
    NormalizedOrientation {
        alpha: finite(event.alpha),
        beta: finite(event.beta),
        gamma: finite(event.gamma),
    }
}

/// Normalize a motion event. Never fails: a missing sub-object or field is 0.
pub fn normalize_motion(event: &MotionEvent) -> NormalizedMotion {
    NormalizedMotion {
        accel_with_gravity: vector_or_zero(event.acceleration_including_gravity.as_ref()),
        linear_accel: vector_or_zero(event.acceleration.as_ref()),
        rotation_rate: rotation_or_zero(event.rotation_rate.as_ref()),
    }
}

fn vector_or_zero(reading: Option<&AccelerationReading>) -> Vector3 {
    match reading {
        Some(r) => Vector3::new(or_zero(r.x), or_zero(r.y), or_zero(r.z)),
        None => Vector3::default(),
    }
}

fn rotation_or_zero(reading: Option<&RotationRateReading>) -> RotationRate {
    match reading {
        Some(r) => RotationRate {
            alpha: or_zero(r.alpha),
            beta: or_zero(r.beta),
            gamma: or_zero(r.gamma),
        },
        None => RotationRate::default(),
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Absent, non-finite, and negative zero all become `0.0`.
fn or_zero(value: Option<f64>) -> f64 {
    match finite(value) {
        Some(v) if v != 0.0 => v,
        _ => 0.0,
    }
}
