//! State machine definition
//!
//! Pump and speaker behavior is a function of the current state and an
//! event.

use super::events::Event;
use crate::alert::AlertKind;

/// Control-loop states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Between loop iterations
    #[default]
    Idle,
    /// Reading and executing one command line
    Interactive,
    /// Sampling metrics and checking thresholds
    Autonomous,
    /// Sounding an alert, then cooling down
    AlertPlayback(AlertKind),
    /// Running the pump duty cycle
    Watering,
}

impl State {
    /// Check if the pump may be switched on
    pub fn pump_allowed(&self) -> bool {
        matches!(self, State::Interactive | State::Watering)
    }

    /// Check if the speaker may be sounding
    pub fn tone_allowed(&self) -> bool {
        matches!(self, State::AlertPlayback(_) | State::Interactive)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Idle transitions
            (Idle, InputAvailable) => Interactive,
            (Idle, NoInput) => Autonomous,

            // Interactive transitions
            (Interactive, LineProcessed) => Idle,

            // Autonomous transitions
            (Autonomous, AlertTriggered(kind)) => AlertPlayback(kind),
            (Autonomous, WateringStarted) => Watering,
            (Autonomous, MonitorComplete) => Idle,

            // Remaining checks of the same iteration still run
            (AlertPlayback(_), AlertFinished) => Autonomous,

            // Watering transitions
            (Watering, WateringFinished) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}
