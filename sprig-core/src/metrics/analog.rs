//! ADC-derived metrics
//!
//! Every reading converts the averaged 12-bit code to volts with half-LSB
//! rounding, `(raw + 0.5) / 4096 * Vref`, then scales per sensor.

use sprig_hal::{AdcChannel, AdcSampler};

use super::Reading;
use crate::config::{AnalogCalibration, SensorChannels};

/// Convert a 12-bit code to volts at the ADC pin
pub fn code_to_volts(raw: u16, cal: &AnalogCalibration) -> f32 {
    (raw as f32 + 0.5) / cal.full_scale_codes * cal.vref_volts
}

/// Photo-sensor voltage to light percentage, clamped to 0-100
pub fn light_percent(volts: f32, cal: &AnalogCalibration) -> f32 {
    (volts / cal.light_full_volts * 100.0).clamp(0.0, 100.0)
}

/// Moisture probe voltage to moisture percentage, clamped to 0-100
///
/// The probe voltage falls as moisture rises; a reading above the dry
/// reference would otherwise go negative.
pub fn moisture_percent(volts: f32, cal: &AnalogCalibration) -> f32 {
    (100.0 - volts / cal.moisture_dry_volts * 100.0).clamp(0.0, 100.0)
}

/// Divider tap voltage to battery voltage
pub fn battery_volts(volts: f32, cal: &AnalogCalibration) -> f32 {
    volts * cal.battery_divider
}

/// Light, moisture and battery sensors sharing one ADC
pub struct AnalogSensors<A> {
    adc: A,
    calibration: AnalogCalibration,
    channels: SensorChannels,
}

impl<A: AdcSampler> AnalogSensors<A> {
    pub fn new(adc: A, calibration: AnalogCalibration, channels: SensorChannels) -> Self {
        Self {
            adc,
            calibration,
            channels,
        }
    }

    fn volts(&mut self, channel: u8) -> Reading<f32> {
        let raw = self
            .adc
            .read(AdcChannel(channel), self.calibration.averaging_log2)?;
        Ok(code_to_volts(raw, &self.calibration))
    }

    /// Ambient light, 0-100 %
    pub fn light_percent(&mut self) -> Reading<f32> {
        let volts = self.volts(self.channels.light)?;
        Ok(light_percent(volts, &self.calibration))
    }

    /// Soil moisture, 0-100 %
    pub fn moisture_percent(&mut self) -> Reading<f32> {
        let volts = self.volts(self.channels.moisture)?;
        Ok(moisture_percent(volts, &self.calibration))
    }

    /// Battery voltage
    pub fn battery_volts(&mut self) -> Reading<f32> {
        let volts = self.volts(self.channels.battery)?;
        Ok(battery_volts(volts, &self.calibration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::SensorError;
    use crate::testing::FakeAdc;
    use proptest::prelude::*;

    fn cal() -> AnalogCalibration {
        AnalogCalibration::default()
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_code_to_volts_half_lsb() {
        assert!(close(code_to_volts(0, &cal()), 0.5 / 4096.0 * 3.3));
        assert!(close(code_to_volts(4095, &cal()), 3.3));
        assert!(close(code_to_volts(2048, &cal()), 1.65));
    }

    #[test]
    fn test_light_scales_to_full_volts() {
        assert!(close(light_percent(0.255, &cal()), 50.0));
        assert_eq!(light_percent(0.51, &cal()), 100.0);
        assert_eq!(light_percent(3.3, &cal()), 100.0);
    }

    #[test]
    fn test_moisture_is_clamped() {
        assert!(close(moisture_percent(3.264148 / 2.0, &cal()), 50.0));
        // Full-scale code exceeds the dry reference: unclamped this is -1.1 %
        assert_eq!(moisture_percent(code_to_volts(4095, &cal()), &cal()), 0.0);
        assert!(moisture_percent(0.0, &cal()) <= 100.0);
    }

    #[test]
    fn test_battery_divider() {
        assert!(close(battery_volts(1.0, &cal()), 147.0 / 47.0));
        // 4 V battery sits at 1.279 V on the tap
        assert!(close(battery_volts(1.2789, &cal()), 4.0));
    }

    #[test]
    fn test_channel_selection_and_averaging() {
        let adc = FakeAdc::new();
        adc.set(3, 2048);
        adc.set(2, 0);
        adc.set(1, 4095);
        let mut sensors = AnalogSensors::new(adc.clone(), cal(), SensorChannels::default());

        assert_eq!(sensors.light_percent(), Ok(100.0));
        assert!(close(sensors.moisture_percent().unwrap(), 99.99));
        assert!(sensors.battery_volts().unwrap() > 10.0);

        let reads = adc.reads();
        assert_eq!(reads, vec![(3, 4), (2, 4), (1, 4)]);
    }

    #[test]
    fn test_adc_failure_is_conversion_error() {
        let adc = FakeAdc::new();
        adc.fail(2);
        let mut sensors = AnalogSensors::new(adc, cal(), SensorChannels::default());
        assert_eq!(sensors.moisture_percent(), Err(SensorError::Conversion));
    }

    proptest! {
        #[test]
        fn prop_light_never_exceeds_full(raw in 0u16..4096) {
            let p = light_percent(code_to_volts(raw, &cal()), &cal());
            prop_assert!((0.0..=100.0).contains(&p));
        }

        #[test]
        fn prop_light_saturates_above_full_volts(volts in 0.51f32..10.0) {
            prop_assert_eq!(light_percent(volts, &cal()), 100.0);
        }

        #[test]
        fn prop_moisture_in_range(raw in 0u16..4096) {
            let p = moisture_percent(code_to_volts(raw, &cal()), &cal());
            prop_assert!((0.0..=100.0).contains(&p));
        }
    }
}
