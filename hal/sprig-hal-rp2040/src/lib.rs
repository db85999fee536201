//! RP2040 implementations of the plant-watering peripheral traits
//!
//! - GPIO outputs and inputs
//! - Buffered UART console
//! - Blocking ADC with software averaging
//! - Capture timer and seconds clock on the embassy time base
//! - PWM tone generator for the alert speaker
//! - Flash storage driver (implements `sprig_hal::FlashStorage`)

#![no_std]

pub mod adc;
pub mod clock;
pub mod flash;
pub mod gpio;
pub mod timer;
pub mod tone;
pub mod uart;

pub use adc::Rp2040Adc;
pub use clock::UptimeClock;
pub use flash::Rp2040FlashStorage;
pub use gpio::{PinInput, PinOutput};
pub use timer::InstantTimer;
pub use tone::PwmTone;
pub use uart::IoSerial;
