//! GPIO outputs and inputs

use embassy_rp::gpio::{Input, Output};
use sprig_hal::{InputPin, OutputPin};

/// Push-pull output driving a relay or the probe discharge transistor
pub struct PinOutput<'d> {
    pin: Output<'d>,
}

impl<'d> PinOutput<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl OutputPin for PinOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Digital input, used for the external probe comparator
pub struct PinInput<'d> {
    pin: Input<'d>,
}

impl<'d> PinInput<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }
}

impl InputPin for PinInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
