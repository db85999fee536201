//! Raspberry Pi Pico board wiring
//!
//! | function            | GPIO | peripheral      |
//! |---------------------|------|-----------------|
//! | console TX / RX     | 0, 1 | UART0, 115200   |
//! | speaker             | 8    | PWM slice 4 A   |
//! | comparator output   | 13   | input, no pull  |
//! | probe discharge     | 14   | output          |
//! | pump relay          | 15   | output          |
//! | light sensor        | 26   | ADC0            |
//! | moisture probe      | 27   | ADC1            |
//! | battery divider tap | 28   | ADC2            |

use embassy_rp::uart::BufferedUart;
use embassy_time::Delay;

use sprig_core::config::{
    ControllerConfig, FlashSettingsStore, SensorChannels, VolumeCalibration,
};
use sprig_core::traits::Board;
use sprig_hal::DigitalComparator;
use sprig_hal_rp2040::{
    InstantTimer, IoSerial, PinInput, PinOutput, PwmTone, Rp2040Adc, Rp2040FlashStorage,
    UptimeClock,
};

/// ADC input numbers of the analog sensors
pub const LIGHT_CHANNEL: u8 = 0;
pub const MOISTURE_CHANNEL: u8 = 1;
pub const BATTERY_CHANNEL: u8 = 2;

/// Marker type binding the Pico peripherals to the controller
pub struct PicoBoard;

impl Board for PicoBoard {
    type Serial = IoSerial<BufferedUart>;
    type Pump = PinOutput<'static>;
    type Discharge = PinOutput<'static>;
    type Comparator = DigitalComparator<PinInput<'static>>;
    type Timer = InstantTimer;
    type Adc = Rp2040Adc<'static>;
    type Clock = UptimeClock;
    type Tone = PwmTone<'static>;
    type Delay = Delay;
    type Store = FlashSettingsStore<Rp2040FlashStorage<'static>>;
}

/// Controller configuration for this board
///
/// The capture timer runs at 1 MHz instead of 40 MHz, so the probe
/// calibration is scaled down by 40.
pub fn controller_config() -> ControllerConfig {
    ControllerConfig {
        volume: VolumeCalibration {
            offset_ticks: 8.6,
            ticks_per_ml: 0.0368,
            timeout_ticks: 100_000,
        },
        channels: SensorChannels {
            light: LIGHT_CHANNEL,
            moisture: MOISTURE_CHANNEL,
            battery: BATTERY_CHANNEL,
        },
        ..ControllerConfig::default()
    }
}
