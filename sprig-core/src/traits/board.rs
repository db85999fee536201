//! Board capability bundle

use embedded_hal::delay::DelayNs;
use sprig_hal::{
    AdcSampler, CaptureTimer, Comparator, OutputPin, RealTimeClock, ToneTimer, Uart,
};

use crate::config::SettingsStore;

/// Peripheral types of a concrete board
///
/// Implemented by a zero-sized marker type per board; the controller is
/// generic over it so every peripheral call is statically dispatched.
pub trait Board {
    /// Operator console
    type Serial: Uart;
    /// Pump relay output
    type Pump: OutputPin;
    /// Volume probe discharge control line
    type Discharge: OutputPin;
    /// Comparator watching the probe capacitor
    type Comparator: Comparator;
    /// Capture timer used to time the probe discharge
    type Timer: CaptureTimer;
    /// Analog sampler for light, moisture and battery
    type Adc: AdcSampler;
    /// Seconds-of-day clock
    type Clock: RealTimeClock;
    /// Alert speaker tone generator
    type Tone: ToneTimer;
    /// Blocking delay provider
    type Delay: DelayNs;
    /// Operator settings persistence
    type Store: SettingsStore;
}

/// Owned peripherals of a board, handed to the controller at startup
pub struct Peripherals<B: Board> {
    pub serial: B::Serial,
    pub pump: B::Pump,
    pub discharge: B::Discharge,
    pub comparator: B::Comparator,
    pub timer: B::Timer,
    pub adc: B::Adc,
    pub clock: B::Clock,
    pub tone: B::Tone,
    pub delay: B::Delay,
    pub store: B::Store,
}
