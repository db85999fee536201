//! Flash storage driver for RP2040
//!
//! Each storage key owns one erase sector at the end of flash. A record is
//! a little-endian `u16` length followed by the data; an erased sector
//! reads back as length `0xFFFF` and means "not found".
//!
//! Implements the `FlashStorage` trait from `sprig-hal`.

use embassy_rp::flash::{Blocking, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;

pub use sprig_hal::flash::{FlashError, FlashStorage, StorageKey};

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB flash on the Pico
pub const STORAGE_SIZE: usize = StorageKey::COUNT * ERASE_SIZE;
pub const STORAGE_START: usize = FLASH_SIZE - STORAGE_SIZE;

/// Largest record, one flash page minus the length header
pub const MAX_RECORD_SIZE: usize = PAGE_SIZE - HEADER_SIZE;

const PAGE_SIZE: usize = 256;
const HEADER_SIZE: usize = 2;
const ERASED: u16 = 0xFFFF;

/// RP2040 flash storage implementation
pub struct Rp2040FlashStorage<'d> {
    flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>,
}

impl<'d> Rp2040FlashStorage<'d> {
    pub fn new(flash: Peri<'d, FLASH>) -> Self {
        Self {
            flash: Flash::new_blocking(flash),
        }
    }

    fn sector(key: StorageKey) -> u32 {
        (STORAGE_START + key.as_u8() as usize * ERASE_SIZE) as u32
    }

    fn record_len(&mut self, key: StorageKey) -> Result<Option<usize>, FlashError> {
        let mut header = [0u8; HEADER_SIZE];
        self.flash
            .blocking_read(Self::sector(key), &mut header)
            .map_err(|_| FlashError::Flash)?;
        match u16::from_le_bytes(header) {
            ERASED => Ok(None),
            len if len as usize > MAX_RECORD_SIZE => Err(FlashError::Corrupted),
            len => Ok(Some(len as usize)),
        }
    }
}

impl FlashStorage for Rp2040FlashStorage<'_> {
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let len = self.record_len(key)?.ok_or(FlashError::NotFound)?;
        let target = buffer.get_mut(..len).ok_or(FlashError::BufferTooSmall)?;
        self.flash
            .blocking_read(Self::sector(key) + HEADER_SIZE as u32, target)
            .map_err(|_| FlashError::Flash)?;
        Ok(len)
    }

    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        if data.len() > MAX_RECORD_SIZE {
            return Err(FlashError::BufferTooSmall);
        }
        let mut page = [0xFFu8; PAGE_SIZE];
        page[..HEADER_SIZE].copy_from_slice(&(data.len() as u16).to_le_bytes());
        page[HEADER_SIZE..HEADER_SIZE + data.len()].copy_from_slice(data);

        let start = Self::sector(key);
        self.flash
            .blocking_erase(start, start + ERASE_SIZE as u32)
            .map_err(|_| FlashError::Flash)?;
        self.flash
            .blocking_write(start, &page)
            .map_err(|_| FlashError::Flash)
    }
}
