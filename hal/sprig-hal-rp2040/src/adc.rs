//! Blocking ADC with software averaging
//!
//! The RP2040 ADC has no hardware averaging, so `read` takes
//! `2^averaging_log2` conversions and returns their mean.

use embassy_rp::adc::{Adc, Blocking, Channel};
use sprig_hal::{AdcChannel, AdcError, AdcSampler};

/// Number of selectable input channels
pub const CHANNEL_COUNT: usize = 4;

/// ADC with its input channels, indexed by [`AdcChannel`]
pub struct Rp2040Adc<'d> {
    adc: Adc<'d, Blocking>,
    channels: [Option<Channel<'d>>; CHANNEL_COUNT],
}

impl<'d> Rp2040Adc<'d> {
    pub fn new(adc: Adc<'d, Blocking>) -> Self {
        Self {
            adc,
            channels: [None, None, None, None],
        }
    }

    /// Attach an input under the given channel number
    pub fn with_channel(mut self, number: u8, channel: Channel<'d>) -> Self {
        if let Some(slot) = self.channels.get_mut(number as usize) {
            *slot = Some(channel);
        }
        self
    }
}

impl AdcSampler for Rp2040Adc<'_> {
    fn read(&mut self, channel: AdcChannel, averaging_log2: u8) -> Result<u16, AdcError> {
        let input = self
            .channels
            .get_mut(channel.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(AdcError::InvalidChannel)?;

        let samples = 1u32 << averaging_log2.min(8);
        let mut sum = 0u32;
        for _ in 0..samples {
            let raw = self
                .adc
                .blocking_read(input)
                .map_err(|_| AdcError::Conversion)?;
            sum += u32::from(raw);
        }
        Ok((sum >> averaging_log2.min(8)) as u16)
    }
}
