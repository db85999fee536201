//! Analog sampling abstraction
//!
//! The peripheral owns channel multiplexing and hardware (or software)
//! averaging; callers only name the channel and the averaging depth.

/// Full-scale code count of a 12-bit converter
pub const ADC_FULL_SCALE: u16 = 4096;

/// Analog input channel number as wired on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcChannel(pub u8);

/// Errors from an analog conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// Channel not wired on this board
    InvalidChannel,
    /// Conversion did not complete
    Conversion,
}

/// Averaging 12-bit analog sampler
pub trait AdcSampler {
    /// Select `channel`, average `2^averaging_log2` conversions and return
    /// the mean as a 12-bit code (0-4095).
    fn read(&mut self, channel: AdcChannel, averaging_log2: u8) -> Result<u16, AdcError>;
}
