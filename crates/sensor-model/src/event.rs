//! Raw sensor event types.
//!
//! Availability of any field is platform-dependent. Absence is data, so
//! every reading is an `Option` and a JSON `null` is the same as a missing key.

use serde::{Deserialize, Serialize};

/// Device attitude angles in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationEvent {
    /// Heading, `[0, 360)`.
    pub alpha: Option<f64>,
    /// Front-back tilt, `[-180, 180]`.
    pub beta: Option<f64>,
    /// Left-right tilt, `[-90, 90]`.
    pub gamma: Option<f64>,
}

/// Three-axis acceleration in m/s².
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccelerationReading {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

/// Rotation rate around each axis in deg/s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationRateReading {
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub gamma: Option<f64>,
}

/// A device motion event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MotionEvent {
    /// Raw accelerometer output, used for recording and the live chart.
    pub acceleration_including_gravity: Option<AccelerationReading>,

    /// Gravity-removed acceleration, used only for speed integration.
    pub acceleration: Option<AccelerationReading>,

    pub rotation_rate: Option<RotationRateReading>,

    /// Host-reported sampling interval in ms. Informational only.
    pub interval: Option<f64>,
}

/// One event in a captured sensor stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorEvent {
    /// Optional offset (ms) from the start of the stream, used for paced replay.
    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    pub offset_ms: Option<u64>,

    #[serde(flatten)]
    pub kind: SensorEventKind,
}

/// Discriminated union of sensor event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SensorEventKind {
    Orientation(OrientationEvent),
    Motion(MotionEvent),
}

impl OrientationEvent {
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self {
            alpha: Some(alpha),
            beta: Some(beta),
            gamma: Some(gamma),
        }
    }
}

impl AccelerationReading {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }
}

impl RotationRateReading {
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self {
            alpha: Some(alpha),
            beta: Some(beta),
            gamma: Some(gamma),
        }
    }
}

impl MotionEvent {
    /// Motion event carrying only raw accelerometer output.
    pub fn with_gravity(x: f64, y: f64, z: f64) -> Self {
        Self {
            acceleration_including_gravity: Some(AccelerationReading::new(x, y, z)),
            ..Self::default()
        }
    }

    /// Add gravity-removed acceleration.
    pub fn linear(mut self, x: f64, y: f64, z: f64) -> Self {
        self.acceleration = Some(AccelerationReading::new(x, y, z));
        self
    }

    /// Add a rotation rate.
    pub fn rotating(mut self, alpha: f64, beta: f64, gamma: f64) -> Self {
        self.rotation_rate = Some(RotationRateReading::new(alpha, beta, gamma));
        self
    }
}

impl SensorEvent {
    /// Create an orientation event without a stream offset.
    pub fn orientation(event: OrientationEvent) -> Self {
        Self {
            offset_ms: None,
            kind: SensorEventKind::Orientation(event),
        }
    }

    /// Create a motion event without a stream offset.
    pub fn motion(event: MotionEvent) -> Self {
        Self {
            offset_ms: None,
            kind: SensorEventKind::Motion(event),
        }
    }

    /// Attach a stream offset.
    pub fn at(mut self, offset_ms: u64) -> Self {
        self.offset_ms = Some(offset_ms);
        self
    }
}

/// Parse events from JSONL content (one JSON object per line).
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_events(jsonl: &str) -> Result<Vec<SensorEvent>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Serialize events to JSONL format.
pub fn serialize_events(events: &[SensorEvent]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}
