//! Seconds clock on the embassy time base
//!
//! The board has no battery-backed RTC; the clock counts from the last
//! `time` command and restarts from zero after reset.

use embassy_time::Instant;
use sprig_hal::RealTimeClock;

pub struct UptimeClock {
    load: u32,
    loaded_at: Instant,
}

impl UptimeClock {
    pub fn new() -> Self {
        Self {
            load: 0,
            loaded_at: Instant::now(),
        }
    }
}

impl Default for UptimeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl RealTimeClock for UptimeClock {
    fn seconds(&mut self) -> u32 {
        let elapsed = self.loaded_at.elapsed().as_secs() as u32;
        self.load.wrapping_add(elapsed)
    }

    fn set_load(&mut self, seconds: u32) {
        self.load = seconds;
        self.loaded_at = Instant::now();
    }
}
