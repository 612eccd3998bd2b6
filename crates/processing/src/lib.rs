//! Gyrolog Processing
//!
//! Pure, synchronous building blocks of the sensor pipeline:
//! - **Normalizer:** raw host events to finite numbers, zero-filling gaps
//! - **Speed:** forward integration of linear acceleration magnitude
//! - **Chart:** rolling window feeding the live acceleration graph
//! - **Readout:** text and bar values for the live display
//!
//! Nothing here owns session state; the session crate composes these.

pub mod chart;
pub mod normalize;
pub mod readout;
pub mod speed;

pub use chart::AccelChart;
pub use normalize::*;
pub use readout::*;
pub use speed::*;
