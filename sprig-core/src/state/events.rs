//! Events that trigger state transitions

use crate::alert::AlertKind;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Loop entry
    /// A serial byte is waiting
    InputAvailable,
    /// No serial byte is waiting
    NoInput,

    // Interactive
    /// The command line was read and dispatched
    LineProcessed,

    // Autonomous
    /// An alert condition holds
    AlertTriggered(AlertKind),
    /// The alert sequence and its cooldown ended
    AlertFinished,
    /// Watering conditions hold; the duty cycle begins
    WateringStarted,
    /// The duty cycle ended and the pump is off
    WateringFinished,
    /// All checks ran without starting a watering run
    MonitorComplete,
}

impl Event {
    /// Check if this event comes from the serial side
    pub fn is_interactive(&self) -> bool {
        matches!(self, Event::InputAvailable | Event::LineProcessed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interactive_events() {
        assert!(Event::InputAvailable.is_interactive());
        assert!(Event::LineProcessed.is_interactive());
        assert!(!Event::NoInput.is_interactive());
        assert!(!Event::AlertTriggered(AlertKind::LowWater).is_interactive());
    }
}
