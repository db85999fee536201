//! Alert speaker on a PWM slice
//!
//! Tone reload values are defined against a 40 MHz reference; the PWM
//! period is scaled to the system clock so the pitch matches.

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};
use fixed::types::U12F4;
use sprig_hal::tone::{tone_frequency_hz, TONE_REFERENCE_HZ};
use sprig_hal::ToneTimer;

/// Largest integer part of the PWM clock divider
const MAX_DIVIDER: u64 = 255;

/// Square-wave generator on PWM channel A
pub struct PwmTone<'d> {
    pwm: Pwm<'d>,
    sys_hz: u32,
}

impl<'d> PwmTone<'d> {
    /// Take a PWM slice configured for output A; starts silent
    pub fn new(mut pwm: Pwm<'d>) -> Self {
        let mut config = Config::default();
        config.enable = false;
        pwm.set_config(&config);
        Self {
            pwm,
            sys_hz: clk_sys_freq(),
        }
    }

    fn config_for(&self, reload: u32) -> Config {
        let hz = tone_frequency_hz(reload, TONE_REFERENCE_HZ).max(1);
        let period = u64::from(self.sys_hz / hz);
        let divider = period.div_ceil(1 << 16).clamp(1, MAX_DIVIDER);
        let top = (period / divider).saturating_sub(1).min(u64::from(u16::MAX)) as u16;

        let mut config = Config::default();
        config.divider = U12F4::from_num(divider as u32);
        config.top = top;
        config.compare_a = top / 2;
        config.enable = true;
        config
    }
}

impl ToneTimer for PwmTone<'_> {
    fn start(&mut self, reload: u32) {
        if reload == 0 {
            self.stop();
            return;
        }
        let config = self.config_for(reload);
        self.pwm.set_config(&config);
    }

    fn stop(&mut self) {
        let mut config = Config::default();
        config.enable = false;
        config.compare_a = 0;
        self.pwm.set_config(&config);
    }
}
