//! Sprig Hardware Abstraction Layer
//!
//! This crate defines the peripheral capabilities the watering controller
//! consumes. Chip-specific crates implement them; host tests implement them
//! with fakes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  sprig-core (controller, metrics)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sprig-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  sprig-hal-   │       │  test fakes   │
//! │    rp2040     │       │   (host)      │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`adc::AdcSampler`] - Averaged analog sampling
//! - [`timer::CaptureTimer`] - Free-running tick counter
//! - [`comparator::Comparator`] - Analog comparator status
//! - [`clock::RealTimeClock`] - Seconds counter with load register
//! - [`tone::ToneTimer`] - Periodic square-wave generator
//! - [`flash::FlashStorage`] - Persistent storage

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod clock;
pub mod comparator;
pub mod flash;
pub mod gpio;
pub mod timer;
pub mod tone;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use adc::{AdcChannel, AdcError, AdcSampler};
pub use clock::RealTimeClock;
pub use comparator::{Comparator, DigitalComparator};
pub use flash::{FlashError, FlashStorage, StorageKey};
pub use gpio::{InputPin, OutputPin};
pub use timer::CaptureTimer;
pub use tone::ToneTimer;
pub use uart::{Uart, UartRx, UartTx};
