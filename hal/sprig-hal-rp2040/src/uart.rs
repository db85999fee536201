//! Serial console over any blocking `embedded-io` port
//!
//! The firmware hands in an embassy-rp `BufferedUart`; its interrupt-fed
//! ring buffer makes `read_ready` a cheap non-blocking check.

use embedded_io::{Read, ReadReady, Write};
use sprig_hal::{UartRx, UartTx};

/// Errors reported by the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialError {
    /// The port reported an error
    Io,
    /// The port returned no data
    Closed,
}

/// Console wrapper implementing the core serial traits
pub struct IoSerial<T> {
    port: T,
}

impl<T> IoSerial<T> {
    pub fn new(port: T) -> Self {
        Self { port }
    }
}

impl<T: Write> UartTx for IoSerial<T> {
    type Error = SerialError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), SerialError> {
        self.port.write_all(data).map_err(|_| SerialError::Io)
    }

    fn flush(&mut self) -> Result<(), SerialError> {
        self.port.flush().map_err(|_| SerialError::Io)
    }
}

impl<T: Read + ReadReady> UartRx for IoSerial<T> {
    type Error = SerialError;

    fn is_readable(&mut self) -> bool {
        self.port.read_ready().unwrap_or(false)
    }

    fn read_byte(&mut self) -> Result<u8, SerialError> {
        let mut byte = [0u8; 1];
        match self.port.read(&mut byte) {
            Ok(1) => Ok(byte[0]),
            Ok(_) => Err(SerialError::Closed),
            Err(_) => Err(SerialError::Io),
        }
    }
}
