//! Digital pin abstractions
//!
//! The controller drives two digital outputs (pump relay and the probe
//! discharge line). Inputs are used by boards whose comparator is an
//! external part wired to a GPIO.

/// Digital output pin
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Drive the pin to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}
