//! Real-time clock abstraction
//!
//! A battery-backed seconds counter. The core reduces the raw value modulo
//! one day, so implementations may count from any epoch.

/// Seconds counter with a load register
pub trait RealTimeClock {
    /// Raw seconds counter value
    fn seconds(&mut self) -> u32;

    /// Load an absolute value into the counter
    fn set_load(&mut self, seconds: u32);
}
