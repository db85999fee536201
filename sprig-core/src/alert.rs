//! Alert tone sequences
//!
//! An alert is a short melody played on the speaker tone timer. Each note is
//! a timer reload value (the output toggles every `reload` reference ticks)
//! held for a fixed duration; the whole melody repeats a fixed number of
//! times.

use embedded_hal::delay::DelayNs;
use sprig_hal::ToneTimer;

/// One note of an alert melody
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TonePair {
    /// Tone timer reload value
    pub reload: u32,
    /// How long the note sounds
    pub duration_ms: u32,
}

impl TonePair {
    pub const fn new(reload: u32, duration_ms: u32) -> Self {
        Self {
            reload,
            duration_ms,
        }
    }
}

/// A melody and its repeat count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToneSequence {
    pub pairs: &'static [TonePair],
    pub repeats: u8,
}

impl ToneSequence {
    /// Total playing time
    pub fn duration_ms(&self) -> u32 {
        let once: u32 = self.pairs.iter().map(|p| p.duration_ms).sum();
        once * u32::from(self.repeats)
    }
}

/// Which alert is sounding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertKind {
    LowWater,
    LowBattery,
}

impl AlertKind {
    /// The melody for this alert
    pub fn sequence(self) -> &'static ToneSequence {
        match self {
            AlertKind::LowWater => &LOW_WATER,
            AlertKind::LowBattery => &LOW_BATTERY,
        }
    }
}

/// Reservoir nearly empty: six descending-then-rising notes
pub const LOW_WATER: ToneSequence = ToneSequence {
    pairs: &[
        TonePair::new(45455, 1000),
        TonePair::new(48135, 1000),
        TonePair::new(51020, 1000),
        TonePair::new(64309, 1000),
        TonePair::new(60698, 1000),
        TonePair::new(57307, 1000),
    ],
    repeats: 2,
};

/// Battery low: three rising notes
pub const LOW_BATTERY: ToneSequence = ToneSequence {
    pairs: &[
        TonePair::new(85837, 1000),
        TonePair::new(80972, 1000),
        TonePair::new(76336, 1000),
    ],
    repeats: 2,
};

/// Play a sequence to completion, blocking
///
/// The tone timer is stopped after every note, so the speaker is silent
/// when this returns.
pub fn play<T: ToneTimer, D: DelayNs>(sequence: &ToneSequence, tone: &mut T, delay: &mut D) {
    for _ in 0..sequence.repeats {
        for pair in sequence.pairs {
            tone.start(pair.reload);
            delay.delay_ms(pair.duration_ms);
            tone.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeDelay, FakeTone};

    #[test]
    fn test_low_water_plays_twice() {
        let tone = FakeTone::default();
        let delay = FakeDelay::default();
        play(&LOW_WATER, &mut tone.clone(), &mut delay.clone());

        let starts = tone.starts();
        assert_eq!(starts.len(), 12);
        assert_eq!(&starts[..6], &starts[6..]);
        assert_eq!(starts[0], 45455);
        assert_eq!(starts[5], 57307);
        assert_eq!(tone.stops(), 12);
        assert!(!tone.is_playing());
        assert_eq!(delay.total_ms(), 12_000);
    }

    #[test]
    fn test_low_battery_notes() {
        let tone = FakeTone::default();
        play(&LOW_BATTERY, &mut tone.clone(), &mut FakeDelay::default());
        assert_eq!(
            tone.starts(),
            vec![85837, 80972, 76336, 85837, 80972, 76336]
        );
    }

    #[test]
    fn test_durations() {
        assert_eq!(LOW_WATER.duration_ms(), 12_000);
        assert_eq!(LOW_BATTERY.duration_ms(), 6_000);
        assert_eq!(AlertKind::LowBattery.sequence(), &LOW_BATTERY);
    }
}
