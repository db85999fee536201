//! Analog comparator abstraction

use crate::gpio::InputPin;

/// Analog comparator watching the probe capacitor voltage
pub trait Comparator {
    /// True while the input is above the reference ("charged"),
    /// false when it has returned to rest
    fn is_charged(&mut self) -> bool;
}

/// External comparator whose output is read through a digital input
pub struct DigitalComparator<P> {
    pin: P,
    charged_high: bool,
}

impl<P: InputPin> DigitalComparator<P> {
    /// Comparator output high while the capacitor is charged
    pub fn active_high(pin: P) -> Self {
        Self {
            pin,
            charged_high: true,
        }
    }

    /// Comparator output low while the capacitor is charged
    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            charged_high: false,
        }
    }
}

impl<P: InputPin> Comparator for DigitalComparator<P> {
    fn is_charged(&mut self) -> bool {
        self.pin.is_high() == self.charged_high
    }
}
