//! Hardware abstraction traits
//!
//! Peripheral capabilities come from `sprig-hal`; this module bundles them
//! into the set a watering controller board must provide.

pub mod board;

pub use board::{Board, Peripherals};
pub use embedded_hal::delay::DelayNs;
pub use sprig_hal::{
    AdcChannel, AdcError, AdcSampler, CaptureTimer, Comparator, OutputPin, RealTimeClock,
    ToneTimer, Uart, UartRx, UartTx,
};
