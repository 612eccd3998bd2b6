//! Gyrolog Common Utilities
//!
//! Shared infrastructure for all Gyrolog crates:
//! - Error types and result aliases
//! - Monotonic clocks and elapsed-time formatting
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
