//! Configuration types
//!
//! Compile-time controller configuration (timing, limits, calibration) and
//! the operator settings that persist in flash.

pub mod calibration;
pub mod settings;
pub mod types;

pub use calibration::*;
pub use settings::*;
pub use types::*;
