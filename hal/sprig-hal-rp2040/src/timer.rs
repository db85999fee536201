//! Capture timer on the embassy time base
//!
//! Counts embassy-time ticks (1 MHz on the RP2040) since the last reset.

use embassy_time::Instant;
use sprig_hal::CaptureTimer;

pub struct InstantTimer {
    base: Instant,
}

impl InstantTimer {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
        }
    }
}

impl Default for InstantTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureTimer for InstantTimer {
    fn start(&mut self) {
        self.base = Instant::now();
    }

    fn reset(&mut self) {
        self.base = Instant::now();
    }

    fn read(&mut self) -> u32 {
        let ticks = Instant::now().duration_since(self.base).as_ticks();
        ticks.min(u64::from(u32::MAX)) as u32
    }
}
