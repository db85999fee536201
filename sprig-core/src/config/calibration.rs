//! Sensor calibration parameters
//!
//! The constants are specific to the sensing hardware. Boards with a
//! different tick rate or divider override them through
//! [`ControllerConfig`](super::ControllerConfig).

use sprig_hal::adc::ADC_FULL_SCALE;

/// Time-of-flight volume probe calibration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VolumeCalibration {
    /// Discharge ticks measured with an empty reservoir
    pub offset_ticks: f32,
    /// Additional ticks per millilitre of water
    pub ticks_per_ml: f32,
    /// Give up on a comparator edge after this many ticks
    pub timeout_ticks: u32,
}

impl Default for VolumeCalibration {
    /// Values for a 40 MHz capture timer
    fn default() -> Self {
        Self {
            offset_ticks: 344.0,
            ticks_per_ml: 1.472,
            timeout_ticks: 4_000_000, // 100 ms at 40 MHz
        }
    }
}

/// ADC front-end calibration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogCalibration {
    /// ADC reference voltage (V)
    pub vref_volts: f32,
    /// Number of codes across the full scale (4096 for 12-bit)
    pub full_scale_codes: f32,
    /// Photo-sensor voltage that reads as 100 % light
    pub light_full_volts: f32,
    /// Moisture probe voltage in completely dry soil (0 %)
    pub moisture_dry_volts: f32,
    /// Battery divider ratio (R1 + R2) / R2
    pub battery_divider: f32,
    /// log2 of the number of averaged conversions per reading
    pub averaging_log2: u8,
}

impl Default for AnalogCalibration {
    fn default() -> Self {
        Self {
            vref_volts: 3.3,
            full_scale_codes: ADC_FULL_SCALE as f32,
            light_full_volts: 0.51,
            moisture_dry_volts: 3.264148,
            battery_divider: 147_000.0 / 47_000.0,
            averaging_log2: 4,
        }
    }
}

/// ADC channel assignment for the three analog sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorChannels {
    pub light: u8,
    pub moisture: u8,
    pub battery: u8,
}

impl Default for SensorChannels {
    fn default() -> Self {
        Self {
            light: 3,
            moisture: 2,
            battery: 1,
        }
    }
}
