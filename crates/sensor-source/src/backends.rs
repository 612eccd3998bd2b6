//! Sensor backend implementations.

use std::collections::VecDeque;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use gyrolog_common::error::{GyrologError, GyrologResult};
use gyrolog_sensor_model::event::{parse_events, SensorEvent};

use crate::SensorBackend;

/// Stub backend for testing: hands out pre-loaded events in order.
pub struct StubBackend {
    events: Vec<SensorEvent>,
    index: usize,
}

impl StubBackend {
    /// Create a stub backend with pre-loaded events.
    pub fn new(events: Vec<SensorEvent>) -> Self {
        Self { events, index: 0 }
    }

    /// Create an empty stub that never produces events.
    pub fn empty() -> Self {
        Self {
            events: vec![],
            index: 0,
        }
    }
}

impl SensorBackend for StubBackend {
    fn poll(&mut self) -> GyrologResult<Option<SensorEvent>> {
        if self.index < self.events.len() {
            let event = self.events[self.index].clone();
            self.index += 1;
            Ok(Some(event))
        } else {
            Ok(None)
        }
    }

    fn name(&self) -> &str {
        "stub"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn is_exhausted(&self) -> bool {
        self.index >= self.events.len()
    }
}

/// Replays a captured JSONL event stream.
///
/// With pacing enabled, an event carrying an offset `t` is held back until
/// `t` milliseconds have passed since the first poll. Events without an
/// offset are released immediately.
pub struct ReplayBackend {
    pending: VecDeque<SensorEvent>,
    realtime: bool,
    started: Option<Instant>,
}

impl ReplayBackend {
    pub fn from_events(events: Vec<SensorEvent>, realtime: bool) -> Self {
        Self {
            pending: events.into(),
            realtime,
            started: None,
        }
    }

    /// Parse a JSONL stream from any reader.
    pub fn from_reader(mut reader: impl Read, realtime: bool) -> GyrologResult<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let events = parse_events(&content)
            .map_err(|e| GyrologError::source(format!("Invalid sensor event stream: {e}")))?;
        tracing::debug!(events = events.len(), realtime, "Loaded replay stream");
        Ok(Self::from_events(events, realtime))
    }

    /// Load a JSONL file, or standard input when `path` is `-`.
    pub fn from_path(path: &Path, realtime: bool) -> GyrologResult<Self> {
        if path == Path::new("-") {
            return Self::from_reader(std::io::stdin().lock(), realtime);
        }
        let file = std::fs::File::open(path).map_err(|e| {
            GyrologError::source(format!("Failed to open {}: {e}", path.display()))
        })?;
        Self::from_reader(std::io::BufReader::new(file), realtime)
    }

    /// Events not yet handed out.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    fn is_due(&mut self, offset_ms: Option<u64>) -> bool {
        if !self.realtime {
            return true;
        }
        let started = *self.started.get_or_insert_with(Instant::now);
        match offset_ms {
            Some(offset_ms) => started.elapsed().as_millis() as u64 >= offset_ms,
            None => true,
        }
    }
}

impl SensorBackend for ReplayBackend {
    fn poll(&mut self) -> GyrologResult<Option<SensorEvent>> {
        let offset_ms = match self.pending.front() {
            Some(front) => front.offset_ms,
            None => return Ok(None),
        };
        if self.is_due(offset_ms) {
            Ok(self.pending.pop_front())
        } else {
            Ok(None)
        }
    }

    fn name(&self) -> &str {
        "replay"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gyrolog_sensor_model::event::{MotionEvent, OrientationEvent};

    fn sample_events() -> Vec<SensorEvent> {
        vec![
            SensorEvent::orientation(OrientationEvent::new(0.0, 10.0, 20.0)),
            SensorEvent::motion(MotionEvent::with_gravity(0.0, 0.0, 9.8)),
        ]
    }

    #[test]
    fn test_stub_backend_drains_in_order() {
        let mut backend = StubBackend::new(sample_events());
        assert!(!backend.is_exhausted());
        assert_eq!(backend.poll().unwrap(), Some(sample_events()[0].clone()));
        assert_eq!(backend.poll().unwrap(), Some(sample_events()[1].clone()));
        assert_eq!(backend.poll().unwrap(), None);
        assert!(backend.is_exhausted());
    }

    #[test]
    fn test_empty_stub_is_exhausted() {
        let mut backend = StubBackend::empty();
        assert!(backend.is_exhausted());
        assert_eq!(backend.poll().unwrap(), None);
    }

    #[test]
    fn test_replay_without_pacing_releases_everything() {
        let events = vec![
            SensorEvent::motion(MotionEvent::with_gravity(1.0, 0.0, 0.0)).at(60_000),
            SensorEvent::motion(MotionEvent::with_gravity(2.0, 0.0, 0.0)).at(120_000),
        ];
        let mut backend = ReplayBackend::from_events(events, false);
        assert!(backend.poll().unwrap().is_some());
        assert!(backend.poll().unwrap().is_some());
        assert!(backend.is_exhausted());
    }

    #[test]
    fn test_paced_replay_holds_future_events() {
        let events = vec![
            SensorEvent::motion(MotionEvent::with_gravity(1.0, 0.0, 0.0)).at(0),
            SensorEvent::motion(MotionEvent::with_gravity(2.0, 0.0, 0.0)).at(60_000),
        ];
        let mut backend = ReplayBackend::from_events(events, true);
        assert!(backend.poll().unwrap().is_some());
        assert_eq!(backend.poll().unwrap(), None);
        assert_eq!(backend.remaining(), 1);
        assert!(!backend.is_exhausted());
    }

    #[test]
    fn test_replay_from_reader_rejects_garbage() {
        let err = ReplayBackend::from_reader("{not json}\n".as_bytes(), false)
            .err()
            .unwrap();
        assert!(err.to_string().contains("Invalid sensor event stream"));
    }

    #[test]
    fn test_replay_from_reader() {
        let jsonl = "# phone capture\n{\"t\":0,\"type\":\"orientation\",\"alpha\":90}\n{\"t\":16,\"type\":\"motion\"}\n";
        let backend = ReplayBackend::from_reader(jsonl.as_bytes(), false).unwrap();
        assert_eq!(backend.remaining(), 2);
    }
}
