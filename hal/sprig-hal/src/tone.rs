//! Tone generator abstraction
//!
//! A periodic timer whose expiry toggles the speaker output, producing a
//! square wave. On hardware this is one interrupt (or a PWM slice); the
//! sequencing logic above it only starts and stops the generator.

/// Reference clock that tone reload values are expressed in
pub const TONE_REFERENCE_HZ: u32 = 40_000_000;

/// Periodic square-wave generator
pub trait ToneTimer {
    /// Start toggling the output every `reload` reference ticks
    fn start(&mut self, reload: u32);

    /// Stop toggling and leave the output idle
    fn stop(&mut self);
}

/// Frequency of the square wave produced by a given reload value
///
/// Two toggles make one period, so the tone is `reference / (2 * reload)`.
pub fn tone_frequency_hz(reload: u32, reference_hz: u32) -> u32 {
    match reload.checked_mul(2) {
        Some(0) => 0,
        Some(half_periods) => reference_hz / half_periods,
        None => 0,
    }
}
