//! Sprig - Plant-Watering Controller Firmware
//!
//! Firmware binary for a Raspberry Pi Pico driving a pump, a time-of-flight
//! reservoir probe, light/moisture/battery sensors and an alert speaker,
//! with an operator console on UART0.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use sprig_core::config::FlashSettingsStore;
use sprig_core::controller::Controller;
use sprig_core::traits::Peripherals;
use sprig_hal::DigitalComparator;
use sprig_hal_rp2040::{
    InstantTimer, IoSerial, PinInput, PinOutput, PwmTone, Rp2040Adc, Rp2040FlashStorage,
    UptimeClock,
};

use crate::board::PicoBoard;

mod board;
mod control;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Sprig firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Operator console
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    info!("UART initialized for operator console");

    // Analog sensors
    let adc = Rp2040Adc::new(Adc::new_blocking(p.ADC, AdcConfig::default()))
        .with_channel(board::LIGHT_CHANNEL, Channel::new_pin(p.PIN_26, Pull::None))
        .with_channel(board::MOISTURE_CHANNEL, Channel::new_pin(p.PIN_27, Pull::None))
        .with_channel(board::BATTERY_CHANNEL, Channel::new_pin(p.PIN_28, Pull::None));

    // Speaker
    let pwm = Pwm::new_output_a(p.PWM_SLICE4, p.PIN_8, PwmConfig::default());

    let peripherals = Peripherals::<PicoBoard> {
        serial: IoSerial::new(uart),
        pump: PinOutput::new(Output::new(p.PIN_15, Level::Low)),
        discharge: PinOutput::new(Output::new(p.PIN_14, Level::Low)),
        comparator: DigitalComparator::active_high(PinInput::new(Input::new(p.PIN_13, Pull::None))),
        timer: InstantTimer::new(),
        adc,
        clock: UptimeClock::new(),
        tone: PwmTone::new(pwm),
        delay: Delay,
        store: FlashSettingsStore::new(Rp2040FlashStorage::new(p.FLASH)),
    };
    info!("Peripherals initialized");

    let mut controller = Controller::new(peripherals, board::controller_config());
    match controller.restore_settings() {
        Ok(true) => info!("Restored settings: {}", controller.settings()),
        Ok(false) => info!("No saved settings, using defaults"),
        Err(e) => warn!("Saved settings unreadable ({}), using defaults", e),
    }

    control::run(controller)
}
