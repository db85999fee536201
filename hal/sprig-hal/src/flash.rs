//! Flash storage abstractions
//!
//! Persistent key-value storage for operator settings. Writes happen only
//! when the operator changes a setting, so a simple blocking interface is
//! enough; the control loop is blocking anyway.

/// Storage keys for persisted data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Operator settings (schedule window and thresholds, postcard format)
    Settings = 0,
    /// Reserved for future use
    Reserved1 = 1,
}

impl StorageKey {
    /// Number of distinct keys
    pub const COUNT: usize = 2;

    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::Settings),
            1 => Some(StorageKey::Reserved1),
            _ => None,
        }
    }
}

/// Errors from flash storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Flash operation failed
    Flash,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
    /// Data corrupted or invalid
    Corrupted,
}

/// Blocking key-value flash storage
pub trait FlashStorage {
    /// Read a value by key into the provided buffer
    ///
    /// Returns the number of bytes read.
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError>;

    /// Replace the value stored under `key`
    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_roundtrip() {
        for raw in 0..StorageKey::COUNT as u8 {
            let key = StorageKey::from_u8(raw).unwrap();
            assert_eq!(key.as_u8(), raw);
        }
        assert_eq!(StorageKey::from_u8(7), None);
    }
}
