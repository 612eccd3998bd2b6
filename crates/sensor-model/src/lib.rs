//! Gyrolog Sensor Model
//!
//! Defines the data contracts shared by the recording pipeline:
//! - **Events:** Raw orientation and motion events as delivered by the host,
//!   with every field optional
//! - **Samples:** Recorded motion samples and the ordered recording buffer
//!
//! Raw events keep the host's field names on the wire (`rotationRate`,
//! `accelerationIncludingGravity`) so captured streams can be replayed as-is.

pub mod event;
pub mod sample;

pub use event::*;
pub use sample::*;
