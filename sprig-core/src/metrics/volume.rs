//! Time-of-flight reservoir volume
//!
//! A probe capacitor is charged through the discharge line and then left to
//! discharge through the water column. The comparator stays asserted while
//! the capacitor is above its threshold; the time it takes to fall back is
//! proportional to the water volume.
//!
//! ```text
//!  discharge  ─┐┌──────┐_____________________
//!              └┘      │
//!  comparator  ___┌────┴──────────────┐______
//!                      ^ timer reset  ^ ticks read
//! ```
//!
//! Both comparator waits are bounded by the capture timer so a dead or
//! stuck comparator yields [`SensorError::Timeout`] instead of a hang.

use sprig_hal::{CaptureTimer, Comparator, OutputPin};

use super::{Reading, SensorError};
use crate::config::VolumeCalibration;

/// Convert discharge ticks to millilitres
///
/// Readings below the empty-reservoir offset clamp to zero.
pub fn ticks_to_ml(ticks: u32, cal: &VolumeCalibration) -> f32 {
    let ml = (ticks as f32 - cal.offset_ticks) / cal.ticks_per_ml;
    if ml > 0.0 {
        ml
    } else {
        0.0
    }
}

/// Volume probe: discharge line, comparator and capture timer
pub struct VolumeProbe<D, C, T> {
    discharge: D,
    comparator: C,
    timer: T,
    calibration: VolumeCalibration,
}

impl<D, C, T> VolumeProbe<D, C, T>
where
    D: OutputPin,
    C: Comparator,
    T: CaptureTimer,
{
    pub fn new(mut discharge: D, comparator: C, mut timer: T, calibration: VolumeCalibration) -> Self {
        discharge.set_low();
        timer.start();
        Self {
            discharge,
            comparator,
            timer,
            calibration,
        }
    }

    /// Time one discharge of the probe capacitor, in timer ticks
    pub fn measure_ticks(&mut self) -> Reading<u32> {
        // Pulse to clear any residual charge
        self.discharge.set_high();
        self.discharge.set_low();

        self.discharge.set_high();
        self.timer.reset();
        if let Err(e) = self.wait_for(true) {
            self.discharge.set_low();
            return Err(e);
        }

        self.timer.reset();
        self.discharge.set_low();
        self.wait_for(false)
    }

    /// Measure the reservoir volume in whole millilitres, truncated
    pub fn measure_ml(&mut self) -> Reading<u32> {
        let ticks = self.measure_ticks()?;
        Ok(ticks_to_ml(ticks, &self.calibration) as u32)
    }

    /// Poll until the comparator reads `charged`, returning the timer value
    fn wait_for(&mut self, charged: bool) -> Reading<u32> {
        loop {
            let ticks = self.timer.read();
            if self.comparator.is_charged() == charged {
                return Ok(ticks);
            }
            if ticks >= self.calibration.timeout_ticks {
                return Err(SensorError::Timeout);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeComparator, FakeDischarge, FakeProbe, FakeTimer};
    use proptest::prelude::*;

    fn probe(sim: &FakeProbe) -> VolumeProbe<FakeDischarge, FakeComparator, FakeTimer> {
        let (discharge, comparator, timer) = sim.parts();
        VolumeProbe::new(discharge, comparator, timer, VolumeCalibration::default())
    }

    #[test]
    fn test_offset_reads_empty() {
        let cal = VolumeCalibration::default();
        assert_eq!(ticks_to_ml(344, &cal), 0.0);
        assert_eq!(ticks_to_ml(0, &cal), 0.0);
        assert!((ticks_to_ml(344 + 1472, &cal) - 1000.0).abs() < 0.01);
    }

    #[test]
    fn test_measures_discharge_time() {
        let sim = FakeProbe::with_ticks(1080);
        let mut probe = probe(&sim);
        assert_eq!(probe.measure_ticks(), Ok(1080));
        assert_eq!(probe.measure_ml(), Ok(500));
        assert!(!sim.discharge_high());
    }

    #[test]
    fn test_fractional_volume_truncates() {
        // 296 ticks past the offset is 199.6 mL
        let sim = FakeProbe::with_ticks(640);
        let (discharge, comparator, timer) = sim.parts();
        let cal = VolumeCalibration {
            ticks_per_ml: 1.48297,
            ..VolumeCalibration::default()
        };
        let mut probe = VolumeProbe::new(discharge, comparator, timer, cal);
        assert_eq!(probe.measure_ml(), Ok(199));
    }

    #[test]
    fn test_dead_comparator_times_out() {
        let sim = FakeProbe::dead();
        let mut probe = probe(&sim);
        assert_eq!(probe.measure_ml(), Err(SensorError::Timeout));
        // The discharge line is released on failure
        assert!(!sim.discharge_high());
    }

    #[test]
    fn test_stuck_comparator_times_out() {
        let sim = FakeProbe::with_ticks(u32::MAX);
        let mut probe = probe(&sim);
        assert_eq!(probe.measure_ticks(), Err(SensorError::Timeout));
        assert!(!sim.discharge_high());
    }

    proptest! {
        #[test]
        fn prop_volume_monotonic(a in 344u32..4_000_000, b in 344u32..4_000_000) {
            let cal = VolumeCalibration::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(ticks_to_ml(lo, &cal) <= ticks_to_ml(hi, &cal));
        }

        #[test]
        fn prop_volume_never_negative(ticks in any::<u32>()) {
            prop_assert!(ticks_to_ml(ticks, &VolumeCalibration::default()) >= 0.0);
        }
    }
}
