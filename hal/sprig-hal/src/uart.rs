//! UART serial communication abstractions
//!
//! The command interface is a single blocking byte stream. The receiver
//! also reports whether a byte is waiting so the control loop can choose
//! between interactive and autonomous work without blocking.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been queued or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Check whether at least one received byte is waiting
    ///
    /// Must not block.
    fn is_readable(&mut self) -> bool;

    /// Read a single byte from the UART
    ///
    /// Blocks until a byte arrives or an error occurs.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;
}

/// Combined UART interface
///
/// For UARTs that provide both TX and RX on a single peripheral.
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}
