//! Gyrolog Session
//!
//! Turns the host's orientation and motion event streams into a recorded
//! time series while driving the live display from the same events.
//!
//! # Architecture
//!
//! ```text
//!  orientation / motion events
//!              │
//!              ▼
//!  ┌──────────────────────────────────────────────┐
//!  │ MotionApp (consent, subscription, back)      │
//!  │  ┌────────────────────────────────────────┐  │
//!  │  │ SessionController (Idle ⇄ Recording)   │  │
//!  │  │   normalize ─┬─► chart / readouts ─────┼──┼─► DisplaySink
//!  │  │              ├─► SpeedIntegrator ──────┼──┼─►
//!  │  │              └─► recorder ─► buffer    │  │
//!  │  │   ElapsedTicker (10 ms, display only) ─┼──┼─►
//!  │  └────────────────────────────────────────┘  │
//!  └──────────────────────────────────────────────┘
//!              │ stop, then export
//!              ▼
//!      gyro_data_<token>.csv
//! ```
//!
//! All handlers take `&mut self` and run to completion, so a buffer
//! append or state transition is never observed half-done. Hosts that
//! share a session between threads wrap it in a `Mutex`.

pub mod app;
pub mod controller;
pub mod display;
pub mod recorder;
pub mod ticker;

pub use app::*;
pub use controller::*;
pub use display::*;

use gyrolog_common::error::GyrologResult;
use gyrolog_sensor_model::event::{MotionEvent, OrientationEvent, SensorEvent, SensorEventKind};

/// Narrow interface between event producers and the pipeline.
///
/// Lets the pipeline be driven by synthetic events without a live host.
pub trait SensorObserver {
    fn on_orientation(&mut self, event: &OrientationEvent);

    fn on_motion(&mut self, event: &MotionEvent);

    fn on_start(&mut self) -> GyrologResult<()>;

    fn on_stop(&mut self);

    /// Route a stream event to the matching handler.
    fn dispatch(&mut self, event: &SensorEvent) {
        match &event.kind {
            SensorEventKind::Orientation(o) => self.on_orientation(o),
            SensorEventKind::Motion(m) => self.on_motion(m),
        }
    }
}
