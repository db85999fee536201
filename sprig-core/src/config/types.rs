//! Controller configuration
//!
//! Timing and decision limits for the autonomous loop. These are fixed at
//! build time; only [`Settings`](super::Settings) change at runtime.

use super::calibration::{AnalogCalibration, SensorChannels, VolumeCalibration};

/// Durations used by the control loop, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Pump ON phase of one watering cycle
    pub pump_on_ms: u32,
    /// Pump OFF (soak) phase of one watering cycle
    pub pump_off_ms: u32,
    /// Quiet period after an autonomous alert
    pub alert_cooldown_ms: u32,
    /// Pause between two alerts sounded by one `alert` command
    pub alert_gap_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            pump_on_ms: 5_000,
            pump_off_ms: 30_000,
            alert_cooldown_ms: 10_000,
            alert_gap_ms: 1_000,
        }
    }
}

/// Decision thresholds that are not operator settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Limits {
    /// Reservoir volume below which the low-water alert sounds and above
    /// which watering may run (mL)
    pub reservoir_min_ml: u32,
    /// Battery voltage below which the low-battery alert sounds
    pub battery_min_volts: f32,
    /// Watering continues while moisture is at or below this percentage
    pub moisture_target_percent: f32,
    /// Upper bound on duty cycles in one watering run
    pub max_watering_cycles: u16,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            reservoir_min_ml: 200,
            battery_min_volts: 4.0,
            moisture_target_percent: 60.0,
            max_watering_cycles: 120,
        }
    }
}

/// Complete build-time configuration of the controller
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    pub timing: Timing,
    pub limits: Limits,
    pub volume: VolumeCalibration,
    pub analog: AnalogCalibration,
    pub channels: SensorChannels,
}
