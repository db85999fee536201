//! Operator settings and their persistence
//!
//! The schedule window and the two thresholds are changed over the serial
//! link and survive power loss. They are stored as a postcard record with a
//! header for validation.

use serde::{Deserialize, Serialize};
use sprig_hal::flash::{FlashError, FlashStorage, StorageKey};

use crate::schedule::ScheduleWindow;

/// Magic number to identify a valid settings record
pub const SETTINGS_MAGIC: u32 = 0x5350_5247; // "SPRG"

/// Current settings record version
pub const SETTINGS_VERSION: u8 = 1;

/// Largest encoded settings record
pub const MAX_SETTINGS_SIZE: usize = 64;

/// Operator thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    /// Water when moisture drops below this percentage (`level`)
    pub moisture_cutoff_percent: u8,
    /// Alerts sound only when light is at or above this percentage (`alert`)
    pub light_alert_percent: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            moisture_cutoff_percent: 20,
            light_alert_percent: 5,
        }
    }
}

/// Everything the operator can change at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub window: ScheduleWindow,
    pub thresholds: Thresholds,
}

/// Settings as written to flash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct StoredSettings {
    magic: u32,
    version: u8,
    settings: Settings,
    crc: u32,
}

/// Errors from loading or saving settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Flash operation failed
    Flash(FlashError),
    /// Record could not be encoded
    Serialize,
    /// Record could not be decoded
    Deserialize,
    /// Magic or version mismatch
    VersionMismatch,
    /// Checksum mismatch
    Checksum,
}

impl From<FlashError> for StorageError {
    fn from(e: FlashError) -> Self {
        StorageError::Flash(e)
    }
}

impl Settings {
    /// CRC32 over the encoded settings
    fn checksum(&self) -> Result<u32, StorageError> {
        let mut buffer = [0u8; MAX_SETTINGS_SIZE];
        let bytes =
            postcard::to_slice(self, &mut buffer).map_err(|_| StorageError::Serialize)?;
        Ok(!crc32_update(0xFFFF_FFFF, bytes))
    }

    /// Encode into `buffer`, returning the used prefix length
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, StorageError> {
        let record = StoredSettings {
            magic: SETTINGS_MAGIC,
            version: SETTINGS_VERSION,
            settings: *self,
            crc: self.checksum()?,
        };
        let used =
            postcard::to_slice(&record, buffer).map_err(|_| StorageError::Serialize)?;
        Ok(used.len())
    }

    /// Decode and validate a record produced by [`Settings::encode`]
    pub fn decode(bytes: &[u8]) -> Result<Self, StorageError> {
        let record: StoredSettings =
            postcard::from_bytes(bytes).map_err(|_| StorageError::Deserialize)?;
        if record.magic != SETTINGS_MAGIC || record.version != SETTINGS_VERSION {
            return Err(StorageError::VersionMismatch);
        }
        if record.settings.checksum()? != record.crc {
            return Err(StorageError::Checksum);
        }
        Ok(record.settings)
    }
}

/// Where the controller keeps its settings between power cycles
pub trait SettingsStore {
    /// Load saved settings; `Ok(None)` when nothing has been saved yet
    fn load(&mut self) -> Result<Option<Settings>, StorageError>;

    /// Save settings, replacing any previous record
    fn save(&mut self, settings: &Settings) -> Result<(), StorageError>;
}

/// Settings store on top of a key-value flash
pub struct FlashSettingsStore<F> {
    flash: F,
}

impl<F: FlashStorage> FlashSettingsStore<F> {
    pub fn new(flash: F) -> Self {
        Self { flash }
    }

    /// Reclaim the underlying flash
    pub fn into_inner(self) -> F {
        self.flash
    }
}

impl<F: FlashStorage> SettingsStore for FlashSettingsStore<F> {
    fn load(&mut self) -> Result<Option<Settings>, StorageError> {
        let mut buffer = [0u8; MAX_SETTINGS_SIZE];
        let len = match self.flash.read(StorageKey::Settings, &mut buffer) {
            Ok(len) => len,
            Err(FlashError::NotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Settings::decode(&buffer[..len]).map(Some)
    }

    fn save(&mut self, settings: &Settings) -> Result<(), StorageError> {
        let mut buffer = [0u8; MAX_SETTINGS_SIZE];
        let len = settings.encode(&mut buffer)?;
        self.flash.write(StorageKey::Settings, &buffer[..len])?;
        Ok(())
    }
}

/// Store for boards without persistent storage; nothing survives reset
#[derive(Debug, Default, Clone, Copy)]
pub struct NoStorage;

impl SettingsStore for NoStorage {
    fn load(&mut self) -> Result<Option<Settings>, StorageError> {
        Ok(None)
    }

    fn save(&mut self, _settings: &Settings) -> Result<(), StorageError> {
        Ok(())
    }
}

/// CRC32 update (IEEE 802.3 polynomial, reflected)
fn crc32_update(crc: u32, data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB8_8320;
    let mut crc = crc;

    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }

    crc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryFlash;

    fn custom() -> Settings {
        Settings {
            window: ScheduleWindow::new(7 * 3600, 9 * 3600 + 30 * 60),
            thresholds: Thresholds {
                moisture_cutoff_percent: 35,
                light_alert_percent: 60,
            },
        }
    }

    #[test]
    fn test_crc32_known_value() {
        // CRC-32 of "123456789"
        assert_eq!(!crc32_update(0xFFFF_FFFF, b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.thresholds.moisture_cutoff_percent, 20);
        assert_eq!(settings.thresholds.light_alert_percent, 5);
        assert_eq!(settings.window, ScheduleWindow::default());
    }

    #[test]
    fn test_corrupted_record_rejected() {
        let mut buffer = [0u8; MAX_SETTINGS_SIZE];
        let len = custom().encode(&mut buffer).unwrap();

        // Flip a bit in the settings body, after the magic and version
        buffer[len - 6] ^= 0x01;
        let result = Settings::decode(&buffer[..len]);
        assert!(matches!(
            result,
            Err(StorageError::Checksum) | Err(StorageError::Deserialize)
        ));
    }

    #[test]
    fn test_wrong_magic_rejected() {
        let record = StoredSettings {
            magic: 0xDEAD_BEEF,
            version: SETTINGS_VERSION,
            settings: custom(),
            crc: custom().checksum().unwrap(),
        };
        let mut buffer = [0u8; MAX_SETTINGS_SIZE];
        let bytes = postcard::to_slice(&record, &mut buffer).unwrap();
        assert_eq!(Settings::decode(bytes), Err(StorageError::VersionMismatch));
    }

    #[test]
    fn test_flash_store_persists() {
        let mut store = FlashSettingsStore::new(MemoryFlash::default());
        assert_eq!(store.load(), Ok(None));

        store.save(&custom()).unwrap();
        assert_eq!(store.load(), Ok(Some(custom())));

        // A fresh store over the same flash sees the record
        let mut reopened = FlashSettingsStore::new(store.into_inner());
        assert_eq!(reopened.load(), Ok(Some(custom())));
    }

    #[test]
    fn test_flash_errors_propagate() {
        let mut flash = MemoryFlash::default();
        flash.fail_writes = true;
        let mut store = FlashSettingsStore::new(flash);
        assert_eq!(
            store.save(&custom()),
            Err(StorageError::Flash(FlashError::Flash))
        );
    }
}
