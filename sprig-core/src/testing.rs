//! Host-side fakes of the peripheral capability traits
//!
//! Every fake is a cheap handle around shared state, so a test keeps one
//! clone for inspection and hands the other to the code under test.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use sprig_hal::flash::{FlashError, FlashStorage, StorageKey};
use sprig_hal::{
    AdcChannel, AdcError, AdcSampler, CaptureTimer, Comparator, OutputPin, RealTimeClock,
    ToneTimer, UartRx, UartTx,
};

use crate::config::{FlashSettingsStore, SettingsStore};
use crate::traits::{Board, Peripherals};

/// Key-value flash kept in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryFlash {
    slots: Rc<RefCell<[Option<Vec<u8>>; StorageKey::COUNT]>>,
    pub fail_writes: bool,
}

impl FlashStorage for MemoryFlash {
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let slots = self.slots.borrow();
        let data = slots[key.as_u8() as usize]
            .as_ref()
            .ok_or(FlashError::NotFound)?;
        let target = buffer
            .get_mut(..data.len())
            .ok_or(FlashError::BufferTooSmall)?;
        target.copy_from_slice(data);
        Ok(data.len())
    }

    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        if self.fail_writes {
            return Err(FlashError::Flash);
        }
        self.slots.borrow_mut()[key.as_u8() as usize] = Some(data.to_vec());
        Ok(())
    }
}

#[derive(Debug)]
pub struct SerialError;

#[derive(Debug, Default)]
struct SerialState {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
    fail_tx: bool,
}

/// Serial console with a scripted receive queue
#[derive(Debug, Clone, Default)]
pub struct FakeSerial(Rc<RefCell<SerialState>>);

impl FakeSerial {
    /// Queue bytes as if typed by the operator
    pub fn feed(&self, text: &str) {
        self.0.borrow_mut().rx.extend(text.bytes());
    }

    /// Queue raw bytes
    pub fn feed_bytes(&self, bytes: &[u8]) {
        self.0.borrow_mut().rx.extend(bytes.iter().copied());
    }

    /// Drain everything transmitted so far
    pub fn take_output(&self) -> String {
        let tx = core::mem::take(&mut self.0.borrow_mut().tx);
        String::from_utf8(tx).unwrap()
    }

    pub fn fail_writes(&self) {
        self.0.borrow_mut().fail_tx = true;
    }
}

impl UartTx for FakeSerial {
    type Error = SerialError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), SerialError> {
        let mut state = self.0.borrow_mut();
        if state.fail_tx {
            return Err(SerialError);
        }
        state.tx.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SerialError> {
        Ok(())
    }
}

impl UartRx for FakeSerial {
    type Error = SerialError;

    fn is_readable(&mut self) -> bool {
        !self.0.borrow().rx.is_empty()
    }

    fn read_byte(&mut self) -> Result<u8, SerialError> {
        // An exhausted script stands in for a broken link
        self.0.borrow_mut().rx.pop_front().ok_or(SerialError)
    }
}

/// Output pin that records every level it was driven to
#[derive(Debug, Clone, Default)]
pub struct FakePin(Rc<RefCell<Vec<bool>>>);

impl FakePin {
    pub fn is_high(&self) -> bool {
        self.0.borrow().last().copied().unwrap_or(false)
    }

    pub fn history(&self) -> Vec<bool> {
        self.0.borrow().clone()
    }
}

impl OutputPin for FakePin {
    fn set_high(&mut self) {
        self.0.borrow_mut().push(true);
    }

    fn set_low(&mut self) {
        self.0.borrow_mut().push(false);
    }

    fn is_set_high(&self) -> bool {
        self.is_high()
    }
}

#[derive(Debug, Default)]
struct ProbeState {
    discharge_high: bool,
    ticks: u32,
    discharge_ticks: Option<u32>,
}

/// Simulated volume probe
///
/// The comparator asserts as soon as the discharge line is driven and stays
/// asserted until the capture timer passes `discharge_ticks`. Each timer read
/// advances time by four ticks.
#[derive(Debug, Clone, Default)]
pub struct FakeProbe(Rc<RefCell<ProbeState>>);

pub struct FakeDischarge(FakeProbe);
pub struct FakeComparator(FakeProbe);
pub struct FakeTimer(FakeProbe);

impl FakeProbe {
    /// Probe whose discharge takes `ticks` timer ticks
    pub fn with_ticks(ticks: u32) -> Self {
        let probe = Self::default();
        probe.set_ticks(ticks);
        probe
    }

    /// Probe reading `ml` millilitres at the default calibration
    pub fn with_volume(ml: u32) -> Self {
        Self::with_ticks(Self::ticks_for(ml))
    }

    /// Probe whose comparator never asserts
    pub fn dead() -> Self {
        Self::default()
    }

    pub fn ticks_for(ml: u32) -> u32 {
        344 + (ml as f32 * 1.472).ceil() as u32
    }

    pub fn set_ticks(&self, ticks: u32) {
        self.0.borrow_mut().discharge_ticks = Some(ticks);
    }

    pub fn discharge_high(&self) -> bool {
        self.0.borrow().discharge_high
    }

    pub fn parts(&self) -> (FakeDischarge, FakeComparator, FakeTimer) {
        (
            FakeDischarge(self.clone()),
            FakeComparator(self.clone()),
            FakeTimer(self.clone()),
        )
    }
}

impl OutputPin for FakeDischarge {
    fn set_high(&mut self) {
        (self.0).0.borrow_mut().discharge_high = true;
    }

    fn set_low(&mut self) {
        (self.0).0.borrow_mut().discharge_high = false;
    }

    fn is_set_high(&self) -> bool {
        self.0.discharge_high()
    }
}

impl Comparator for FakeComparator {
    fn is_charged(&mut self) -> bool {
        let state = (self.0).0.borrow();
        match state.discharge_ticks {
            None => false,
            Some(_) if state.discharge_high => true,
            Some(limit) => state.ticks < limit,
        }
    }
}

impl CaptureTimer for FakeTimer {
    fn start(&mut self) {}

    fn reset(&mut self) {
        (self.0).0.borrow_mut().ticks = 0;
    }

    fn read(&mut self) -> u32 {
        let mut state = (self.0).0.borrow_mut();
        state.ticks = state.ticks.saturating_add(4);
        state.ticks
    }
}

#[derive(Debug, Default)]
struct AdcState {
    queued: HashMap<u8, VecDeque<u16>>,
    levels: HashMap<u8, u16>,
    failing: HashSet<u8>,
    reads: Vec<(u8, u8)>,
}

/// ADC returning scripted codes per channel
///
/// Queued codes are consumed first, then the channel's steady level.
#[derive(Debug, Clone, Default)]
pub struct FakeAdc(Rc<RefCell<AdcState>>);

impl FakeAdc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the steady code of a channel
    pub fn set(&self, channel: u8, raw: u16) {
        self.0.borrow_mut().levels.insert(channel, raw);
    }

    /// Queue a one-shot code ahead of the steady level
    pub fn push(&self, channel: u8, raw: u16) {
        self.0
            .borrow_mut()
            .queued
            .entry(channel)
            .or_default()
            .push_back(raw);
    }

    /// Make every read of a channel fail
    pub fn fail(&self, channel: u8) {
        self.0.borrow_mut().failing.insert(channel);
    }

    /// Channel and averaging depth of every read so far
    pub fn reads(&self) -> Vec<(u8, u8)> {
        self.0.borrow().reads.clone()
    }
}

impl AdcSampler for FakeAdc {
    fn read(&mut self, channel: AdcChannel, averaging_log2: u8) -> Result<u16, AdcError> {
        let mut state = self.0.borrow_mut();
        state.reads.push((channel.0, averaging_log2));
        if state.failing.contains(&channel.0) {
            return Err(AdcError::Conversion);
        }
        if let Some(raw) = state.queued.get_mut(&channel.0).and_then(|q| q.pop_front()) {
            return Ok(raw);
        }
        state
            .levels
            .get(&channel.0)
            .copied()
            .ok_or(AdcError::InvalidChannel)
    }
}

/// Clock that only changes when loaded
#[derive(Debug, Clone, Default)]
pub struct FakeClock(Rc<RefCell<u32>>);

impl FakeClock {
    pub fn set(&self, seconds: u32) {
        *self.0.borrow_mut() = seconds;
    }

    pub fn get(&self) -> u32 {
        *self.0.borrow()
    }
}

impl RealTimeClock for FakeClock {
    fn seconds(&mut self) -> u32 {
        *self.0.borrow()
    }

    fn set_load(&mut self, seconds: u32) {
        *self.0.borrow_mut() = seconds;
    }
}

#[derive(Debug, Default)]
struct ToneState {
    starts: Vec<u32>,
    stops: usize,
    playing: bool,
}

/// Tone timer recording the notes it was asked to play
#[derive(Debug, Clone, Default)]
pub struct FakeTone(Rc<RefCell<ToneState>>);

impl FakeTone {
    pub fn starts(&self) -> Vec<u32> {
        self.0.borrow().starts.clone()
    }

    pub fn stops(&self) -> usize {
        self.0.borrow().stops
    }

    pub fn is_playing(&self) -> bool {
        self.0.borrow().playing
    }
}

impl ToneTimer for FakeTone {
    fn start(&mut self, reload: u32) {
        let mut state = self.0.borrow_mut();
        state.starts.push(reload);
        state.playing = true;
    }

    fn stop(&mut self) {
        let mut state = self.0.borrow_mut();
        state.stops += 1;
        state.playing = false;
    }
}

/// Delay that returns immediately and records what was asked for
#[derive(Debug, Clone, Default)]
pub struct FakeDelay(Rc<RefCell<Vec<u32>>>);

impl FakeDelay {
    /// Every `delay_ms` request, in order
    pub fn calls_ms(&self) -> Vec<u32> {
        self.0.borrow().clone()
    }

    pub fn total_ms(&self) -> u64 {
        self.0.borrow().iter().map(|&ms| u64::from(ms)).sum()
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().push(ms);
    }
}

/// Board made of fakes
pub struct FakeBoard;

impl Board for FakeBoard {
    type Serial = FakeSerial;
    type Pump = FakePin;
    type Discharge = FakeDischarge;
    type Comparator = FakeComparator;
    type Timer = FakeTimer;
    type Adc = FakeAdc;
    type Clock = FakeClock;
    type Tone = FakeTone;
    type Delay = FakeDelay;
    type Store = FlashSettingsStore<MemoryFlash>;
}

/// Inspection handles for every fake peripheral of a [`FakeBoard`]
#[derive(Clone, Default)]
pub struct Rig {
    pub serial: FakeSerial,
    pub pump: FakePin,
    pub probe: FakeProbe,
    pub adc: FakeAdc,
    pub clock: FakeClock,
    pub tone: FakeTone,
    pub delay: FakeDelay,
    pub flash: MemoryFlash,
}

impl Rig {
    /// Hand out peripherals sharing state with this rig
    pub fn peripherals(&self) -> Peripherals<FakeBoard> {
        let (discharge, comparator, timer) = self.probe.parts();
        Peripherals {
            serial: self.serial.clone(),
            pump: self.pump.clone(),
            discharge,
            comparator,
            timer,
            adc: self.adc.clone(),
            clock: self.clock.clone(),
            tone: self.tone.clone(),
            delay: self.delay.clone(),
            store: FlashSettingsStore::new(self.flash.clone()),
        }
    }

    /// Saved settings, read back through a fresh store
    pub fn stored(&self) -> Option<crate::config::Settings> {
        FlashSettingsStore::new(self.flash.clone()).load().unwrap()
    }
}
