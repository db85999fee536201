//! Watering schedule window
//!
//! A daily interval during which autonomous watering is permitted. Both
//! bounds are exclusive.

use serde::{Deserialize, Serialize};
use sprig_protocol::SECONDS_PER_DAY;

/// Default window start (12:00)
pub const DEFAULT_WINDOW_START_S: u32 = 43_200;

/// Default window end (17:00)
pub const DEFAULT_WINDOW_END_S: u32 = 61_200;

/// Time-of-day interval in seconds past midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScheduleWindow {
    /// Lower bound, seconds of day
    pub start_s: u32,
    /// Upper bound, seconds of day
    pub end_s: u32,
}

impl Default for ScheduleWindow {
    fn default() -> Self {
        Self {
            start_s: DEFAULT_WINDOW_START_S,
            end_s: DEFAULT_WINDOW_END_S,
        }
    }
}

impl ScheduleWindow {
    /// Create a window; bounds are reduced into one day
    pub const fn new(start_s: u32, end_s: u32) -> Self {
        Self {
            start_s: start_s % SECONDS_PER_DAY,
            end_s: end_s % SECONDS_PER_DAY,
        }
    }

    /// Check whether `seconds_of_day` lies strictly between the bounds
    ///
    /// A window whose end is not after its start contains nothing.
    pub fn contains(&self, seconds_of_day: u32) -> bool {
        seconds_of_day > self.start_s && seconds_of_day < self.end_s
    }
}

/// Reduce a raw clock value to seconds past midnight
pub fn seconds_of_day(raw_seconds: u32) -> u32 {
    raw_seconds % SECONDS_PER_DAY
}
