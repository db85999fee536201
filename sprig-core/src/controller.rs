//! The control loop
//!
//! Each call to [`Controller::poll`] runs one iteration: if a serial byte is
//! waiting, one command line is read, echoed, tokenized and executed;
//! otherwise the metrics are sampled and the alert and watering rules run.
//! Every wait is blocking, so the serial port is not serviced while an
//! alert sounds or the pump duty cycle runs.

use core::fmt;

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use sprig_hal::{OutputPin, RealTimeClock, UartRx, UartTx};
use sprig_protocol::response::{self, StatusReport};
use sprig_protocol::{Command, CommandError, InputLine, LineEvent, Switch, Tokens};

use crate::alert::{self, AlertKind};
use crate::config::{ControllerConfig, Settings, SettingsStore, StorageError};
use crate::metrics::{MetricEngine, Metrics, SensorError};
use crate::schedule::{seconds_of_day, ScheduleWindow};
use crate::state::{Event, State};
use crate::traits::{Board, Peripherals};

/// Alerts sounded during one iteration
pub type Alerts = Vec<AlertKind, 2>;

/// Errors that abort a loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlError {
    /// Serial receive or transmit failed
    Serial,
}

/// What ended a watering run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WateringStop {
    /// Moisture rose above the target
    TargetReached,
    /// Reservoir fell to the minimum volume
    ReservoirLow,
    /// The cycle limit was hit
    CycleLimit,
    /// A re-sample failed
    Sensor(SensorError),
}

/// Outcome of a watering run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WateringReport {
    /// Completed pump on/off cycles
    pub cycles: u16,
    pub stop: WateringStop,
}

/// Outcome of one command line
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandReport {
    pub command: Result<Command, CommandError>,
    /// Alerts sounded by an `alert` command
    pub alerts: Alerts,
    /// Result of persisting changed settings, if any changed
    pub saved: Option<Result<(), StorageError>>,
}

/// Outcome of one autonomous pass
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorReport {
    pub metrics: Metrics,
    pub seconds_of_day: u32,
    pub alerts: Alerts,
    pub watering: Option<WateringReport>,
}

/// Outcome of one loop iteration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cycle {
    Command(CommandReport),
    Monitor(MonitorReport),
}

/// Adapts the serial transmitter to `core::fmt::Write`
struct SerialWriter<'a, S>(&'a mut S);

impl<S: UartTx> fmt::Write for SerialWriter<'_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_blocking(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

fn respond<S, F>(serial: &mut S, write: F) -> Result<(), ControlError>
where
    S: UartTx,
    F: FnOnce(&mut SerialWriter<'_, S>) -> fmt::Result,
{
    write(&mut SerialWriter(serial)).map_err(|_| ControlError::Serial)
}

/// Plant-watering controller for board `B`
pub struct Controller<B: Board> {
    serial: B::Serial,
    pump: B::Pump,
    metrics: MetricEngine<B::Discharge, B::Comparator, B::Timer, B::Adc>,
    clock: B::Clock,
    tone: B::Tone,
    delay: B::Delay,
    store: B::Store,
    config: ControllerConfig,
    settings: Settings,
    state: State,
    line: InputLine,
}

impl<B: Board> Controller<B> {
    /// Take ownership of the board peripherals
    ///
    /// The pump starts off and settings start at their defaults; call
    /// [`Controller::restore_settings`] to load saved ones.
    pub fn new(p: Peripherals<B>, config: ControllerConfig) -> Self {
        let mut pump = p.pump;
        pump.set_low();
        Self {
            serial: p.serial,
            pump,
            metrics: MetricEngine::new(p.discharge, p.comparator, p.timer, p.adc, &config),
            clock: p.clock,
            tone: p.tone,
            delay: p.delay,
            store: p.store,
            config,
            settings: Settings::default(),
            state: State::Idle,
            line: InputLine::new(),
        }
    }

    /// Load saved settings, keeping the current ones if none were saved
    ///
    /// Returns whether a saved record was applied.
    pub fn restore_settings(&mut self) -> Result<bool, StorageError> {
        match self.store.load()? {
            Some(settings) => {
                self.settings = settings;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Current operator settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current control-loop state
    pub fn state(&self) -> State {
        self.state
    }

    /// Check if the pump output is driven
    pub fn pump_is_on(&self) -> bool {
        self.pump.is_set_high()
    }

    /// Run one loop iteration
    pub fn poll(&mut self) -> Result<Cycle, ControlError> {
        self.state = State::Idle;
        if self.serial.is_readable() {
            self.state = self.state.transition(Event::InputAvailable);
            let result = self.interact();
            self.state = self.state.transition(Event::LineProcessed);
            result.map(Cycle::Command)
        } else {
            self.state = self.state.transition(Event::NoInput);
            Ok(Cycle::Monitor(self.monitor()))
        }
    }

    fn read_line(&mut self) -> Result<(), ControlError> {
        self.line.clear();
        loop {
            let byte = self.serial.read_byte().map_err(|_| ControlError::Serial)?;
            if self.line.push(byte) == LineEvent::Complete {
                return Ok(());
            }
        }
    }

    fn interact(&mut self) -> Result<CommandReport, ControlError> {
        self.read_line()?;
        respond(&mut self.serial, |out| response::write_echo(out, self.line.as_str()))?;

        let table = self.line.tokenize();
        let tokens = Tokens::new(&self.line, &table);
        respond(&mut self.serial, |out| response::write_field_table(out, &tokens))?;
        let command = Command::parse(&tokens);

        let mut report = CommandReport {
            command,
            alerts: Vec::new(),
            saved: None,
        };
        match command {
            Ok(command) => self.execute(command, &mut report)?,
            Err(_) => respond(&mut self.serial, |out| {
                response::write_line(out, response::INVALID_COMMAND)
            })?,
        }
        Ok(report)
    }

    fn execute(&mut self, command: Command, report: &mut CommandReport) -> Result<(), ControlError> {
        match command {
            Command::Alert { light_percent } => {
                self.settings.thresholds.light_alert_percent = light_percent;
                report.saved = Some(self.store.save(&self.settings));
                report.alerts = self.check_alerts_now();
            }
            Command::Status => {
                let metrics = self.metrics.sample();
                let status = StatusReport {
                    volume_ml: metrics.volume_ml.ok(),
                    light_percent: metrics.light_percent.ok(),
                    moisture_percent: metrics.moisture_percent.ok(),
                    battery_volts: metrics.battery_volts.ok(),
                    seconds_of_day: self.seconds_of_day(),
                    window_start_s: self.settings.window.start_s,
                    window_end_s: self.settings.window.end_s,
                };
                respond(&mut self.serial, |out| response::write_status(out, &status))?;
            }
            Command::Pump(switch) => self.set_pump(switch == Switch::On),
            Command::SetTime(time) => self.clock.set_load(time.as_seconds()),
            Command::Water { start, end } => {
                self.settings.window = ScheduleWindow::new(start.as_seconds(), end.as_seconds());
                report.saved = Some(self.store.save(&self.settings));
                let now = self.seconds_of_day();
                let message = if self.settings.window.contains(now) {
                    response::WATERING_ALLOWED
                } else {
                    response::WATERING_NOT_ALLOWED
                };
                respond(&mut self.serial, |out| response::write_line(out, message))?;
            }
            Command::Level { moisture_percent } => {
                self.settings.thresholds.moisture_cutoff_percent = moisture_percent;
                report.saved = Some(self.store.save(&self.settings));
            }
        }
        Ok(())
    }

    /// Evaluate both alert rules on fresh readings, for the `alert` command
    fn check_alerts_now(&mut self) -> Alerts {
        let mut alerts = Alerts::new();
        let light = self.metrics.light_percent();

        let volume = self.metrics.volume_ml();
        if self.light_alert(light) && self.low_water(volume) {
            self.sound(AlertKind::LowWater);
            let _ = alerts.push(AlertKind::LowWater);
        }

        let battery = self.metrics.battery_volts();
        if self.light_alert(light) && self.low_battery(battery) {
            self.delay.delay_ms(self.config.timing.alert_gap_ms);
            self.sound(AlertKind::LowBattery);
            let _ = alerts.push(AlertKind::LowBattery);
        }
        alerts
    }

    fn monitor(&mut self) -> MonitorReport {
        let metrics = self.metrics.sample();
        let now = self.seconds_of_day();
        let mut report = MonitorReport {
            metrics,
            seconds_of_day: now,
            alerts: Alerts::new(),
            watering: None,
        };

        let light_alert = self.light_alert(metrics.light_percent);
        if light_alert && self.low_water(metrics.volume_ml) {
            self.alert_with_cooldown(AlertKind::LowWater);
            let _ = report.alerts.push(AlertKind::LowWater);
        }
        if light_alert && self.low_battery(metrics.battery_volts) {
            self.alert_with_cooldown(AlertKind::LowBattery);
            let _ = report.alerts.push(AlertKind::LowBattery);
        }

        match (metrics.moisture_percent, metrics.volume_ml) {
            (Ok(moisture), Ok(volume))
                if self.settings.window.contains(now)
                    && moisture < f32::from(self.settings.thresholds.moisture_cutoff_percent)
                    && volume > self.config.limits.reservoir_min_ml =>
            {
                self.state = self.state.transition(Event::WateringStarted);
                report.watering = Some(self.water(moisture, volume));
                self.state = self.state.transition(Event::WateringFinished);
            }
            _ => self.state = self.state.transition(Event::MonitorComplete),
        }
        report
    }

    /// Pump duty cycle: on, off, re-sample, until a stop condition holds
    fn water(&mut self, mut moisture: f32, mut volume: u32) -> WateringReport {
        let timing = self.config.timing;
        let limits = self.config.limits;
        let mut cycles = 0u16;

        let stop = loop {
            if moisture > limits.moisture_target_percent {
                break WateringStop::TargetReached;
            }
            if volume <= limits.reservoir_min_ml {
                break WateringStop::ReservoirLow;
            }
            if cycles >= limits.max_watering_cycles {
                break WateringStop::CycleLimit;
            }

            self.set_pump(true);
            self.delay.delay_ms(timing.pump_on_ms);
            self.set_pump(false);
            self.delay.delay_ms(timing.pump_off_ms);
            cycles += 1;

            moisture = match self.metrics.moisture_percent() {
                Ok(m) => m,
                Err(e) => break WateringStop::Sensor(e),
            };
            volume = match self.metrics.volume_ml() {
                Ok(v) => v,
                Err(e) => break WateringStop::Sensor(e),
            };
        };

        self.set_pump(false);
        WateringReport { cycles, stop }
    }

    fn alert_with_cooldown(&mut self, kind: AlertKind) {
        self.state = self.state.transition(Event::AlertTriggered(kind));
        self.sound(kind);
        self.delay.delay_ms(self.config.timing.alert_cooldown_ms);
        self.state = self.state.transition(Event::AlertFinished);
    }

    fn sound(&mut self, kind: AlertKind) {
        if self.state.tone_allowed() {
            alert::play(kind.sequence(), &mut self.tone, &mut self.delay);
        }
    }

    fn set_pump(&mut self, on: bool) {
        if on && self.state.pump_allowed() {
            self.pump.set_high();
        } else if !on {
            self.pump.set_low();
        }
    }

    fn light_alert(&self, light: Result<f32, SensorError>) -> bool {
        matches!(light, Ok(l) if l >= f32::from(self.settings.thresholds.light_alert_percent))
    }

    fn low_water(&self, volume: Result<u32, SensorError>) -> bool {
        matches!(volume, Ok(v) if v < self.config.limits.reservoir_min_ml)
    }

    fn low_battery(&self, battery: Result<f32, SensorError>) -> bool {
        matches!(battery, Ok(v) if v < self.config.limits.battery_min_volts)
    }

    fn seconds_of_day(&mut self) -> u32 {
        seconds_of_day(self.clock.seconds())
    }
}
