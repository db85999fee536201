//! Capture timer abstraction
//!
//! An up-counting tick counter used to time comparator edges. The tick rate
//! is board specific; calibration constants are expressed in these ticks.

/// Free-running up counter
pub trait CaptureTimer {
    /// Enable counting
    fn start(&mut self);

    /// Set the counter back to zero without stopping it
    fn reset(&mut self);

    /// Current counter value in ticks since the last reset
    fn read(&mut self) -> u32;
}
