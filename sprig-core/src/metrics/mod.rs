//! Metric engine
//!
//! Turns raw peripheral samples into calibrated values: reservoir volume
//! from a timed capacitor discharge, and light, moisture and battery
//! voltage from averaged ADC codes.

pub mod analog;
pub mod volume;

pub use analog::AnalogSensors;
pub use volume::VolumeProbe;

use sprig_hal::{AdcError, AdcSampler, CaptureTimer, Comparator, OutputPin};

use crate::config::ControllerConfig;

/// Errors that can occur while taking a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// A comparator edge did not arrive within the timeout
    Timeout,
    /// ADC conversion failed
    Conversion,
}

impl From<AdcError> for SensorError {
    fn from(_: AdcError) -> Self {
        SensorError::Conversion
    }
}

/// Result of one measurement
pub type Reading<T> = Result<T, SensorError>;

/// One sample of every metric
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Metrics {
    pub volume_ml: Reading<u32>,
    pub light_percent: Reading<f32>,
    pub moisture_percent: Reading<f32>,
    pub battery_volts: Reading<f32>,
}

/// All sensors of the controller behind one interface
pub struct MetricEngine<D, C, T, A> {
    probe: VolumeProbe<D, C, T>,
    analog: AnalogSensors<A>,
}

impl<D, C, T, A> MetricEngine<D, C, T, A>
where
    D: OutputPin,
    C: Comparator,
    T: CaptureTimer,
    A: AdcSampler,
{
    /// Build the engine from its peripherals and the board configuration
    pub fn new(discharge: D, comparator: C, timer: T, adc: A, config: &ControllerConfig) -> Self {
        Self {
            probe: VolumeProbe::new(discharge, comparator, timer, config.volume),
            analog: AnalogSensors::new(adc, config.analog, config.channels),
        }
    }

    /// Measure the reservoir volume in millilitres
    pub fn volume_ml(&mut self) -> Reading<u32> {
        self.probe.measure_ml()
    }

    /// Ambient light, 0-100 %
    pub fn light_percent(&mut self) -> Reading<f32> {
        self.analog.light_percent()
    }

    /// Soil moisture, 0-100 %
    pub fn moisture_percent(&mut self) -> Reading<f32> {
        self.analog.moisture_percent()
    }

    /// Battery voltage
    pub fn battery_volts(&mut self) -> Reading<f32> {
        self.analog.battery_volts()
    }

    /// Sample every metric once, volume first
    pub fn sample(&mut self) -> Metrics {
        Metrics {
            volume_ml: self.volume_ml(),
            light_percent: self.light_percent(),
            moisture_percent: self.moisture_percent(),
            battery_volts: self.battery_volts(),
        }
    }
}
