//! Gyrolog Sensor Source
//!
//! Produces the two asynchronous event streams the pipeline consumes:
//! orientation events and motion events. Uses a pluggable backend
//! architecture so the pipeline can run against different hosts:
//!
//! - **Stub:** pre-loaded events, for tests and demos
//! - **Replay:** a captured JSONL stream, optionally paced in real time
//!
//! A [`SensorFeed`] drives a backend and forwards its events over a
//! channel. Nothing here knows about recording state.

pub mod backends;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use gyrolog_common::error::GyrologResult;
use gyrolog_sensor_model::event::SensorEvent;

/// Trait for sensor event backends.
pub trait SensorBackend: Send {
    /// Poll for the next event. Returns `None` if no event is available yet.
    fn poll(&mut self) -> GyrologResult<Option<SensorEvent>>;

    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Check if the backend can produce events on this system.
    fn is_available(&self) -> bool;

    /// Whether the backend will never produce another event.
    fn is_exhausted(&self) -> bool {
        false
    }
}

/// Drives a backend and forwards its events to a channel.
pub struct SensorFeed {
    backend: Box<dyn SensorBackend>,
    sender: mpsc::Sender<SensorEvent>,
    stop_flag: Arc<AtomicBool>,
    events_forwarded: u64,
}

impl SensorFeed {
    /// Create a feed writing into `sender`.
    pub fn new(backend: Box<dyn SensorBackend>, sender: mpsc::Sender<SensorEvent>) -> Self {
        Self {
            backend,
            sender,
            stop_flag: Arc::new(AtomicBool::new(false)),
            events_forwarded: 0,
        }
    }

    /// Create a feed together with the receiving end of its channel.
    pub fn with_channel(
        backend: Box<dyn SensorBackend>,
        capacity: usize,
    ) -> (Self, mpsc::Receiver<SensorEvent>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self::new(backend, sender), receiver)
    }

    /// Run until the stop flag is set, the backend is exhausted, or the
    /// receiver is dropped. Returns the number of events forwarded.
    pub async fn run(&mut self) -> GyrologResult<u64> {
        tracing::info!(backend = %self.backend.name(), "Sensor feed started");

        while !self.stop_flag.load(Ordering::Relaxed) {
            match self.backend.poll() {
                Ok(Some(event)) => {
                    if self.sender.send(event).await.is_err() {
                        tracing::debug!("Sensor feed receiver dropped");
                        break;
                    }
                    self.events_forwarded += 1;
                }
                Ok(None) => {
                    if self.backend.is_exhausted() {
                        break;
                    }
                    // No event available, yield briefly
                    tokio::time::sleep(tokio::time::Duration::from_millis(1)).await;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Sensor source error");
                    tokio::time::sleep(tokio::time::Duration::from_millis(1)).await;
                }
            }
        }

        tracing::info!(events = self.events_forwarded, "Sensor feed stopped");
        Ok(self.events_forwarded)
    }

    /// Set the stop flag.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Get the stop flag for external coordination.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Number of events forwarded so far.
    pub fn events_forwarded(&self) -> u64 {
        self.events_forwarded
    }
}
