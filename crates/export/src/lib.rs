//! Gyrolog Export
//!
//! Turns a finished recording buffer into a fixed-schema CSV file:
//!
//! ```text
//! Timestamp_ms,Gyro_Alpha,Gyro_Beta,Gyro_Gamma,Accel_X,Accel_Y,Accel_Z
//! 0,1.2346,0.0000,0.0000,0.1000,0.2000,9.8100
//! 16,...
//! ```
//!
//! Also reads exports back for inspection.

pub mod csv_export;
pub mod summary;

pub use csv_export::*;
pub use summary::*;
