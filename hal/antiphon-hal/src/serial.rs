//! Serial transport abstractions
//!
//! Provides traits for asynchronous serial communication that can be
//! implemented by chip-specific HALs.

/// Serial transmitter
///
/// Async trait for sending data over a serial interface.
pub trait SerialTx {
    /// Error type for transmit operations
    type Error;

    /// Write all bytes to the serial line
    ///
    /// Completes once every byte has been accepted by the transport.
    fn write_all(&mut self, data: &[u8]) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Flush any buffered data out onto the wire
    fn flush(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;
}

/// Serial receiver
///
/// Async trait for receiving data from a serial interface.
pub trait SerialRx {
    /// Error type for receive operations
    type Error;

    /// Read one chunk of available bytes into `buf`
    ///
    /// Waits at most `timeout_ticks` for the first byte, then returns
    /// promptly with whatever the transport has buffered. `Ok(0)` means
    /// the wait elapsed without any data arriving; it is not an error.
    fn read_chunk(
        &mut self,
        buf: &mut [u8],
        timeout_ticks: u64,
    ) -> impl core::future::Future<Output = Result<usize, Self::Error>>;
}

impl<T: SerialTx> SerialTx for &mut T {
    type Error = T::Error;

    async fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_all(data).await
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        (**self).flush().await
    }
}

impl<T: SerialRx> SerialRx for &mut T {
    type Error = T::Error;

    async fn read_chunk(
        &mut self,
        buf: &mut [u8],
        timeout_ticks: u64,
    ) -> Result<usize, Self::Error> {
        (**self).read_chunk(buf, timeout_ticks).await
    }
}

/// Serial line configuration
#[derive(Debug, Clone, Copy)]
pub struct LineConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for LineConfig {
    /// 2400 baud 8N1, the line settings of the echo link
    fn default() -> Self {
        Self {
            baudrate: 2400,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_line_is_2400_8n1() {
        let line = LineConfig::default();
        assert_eq!(line.baudrate, 2400);
        assert_eq!(line.data_bits, DataBits::Eight);
        assert_eq!(line.parity, Parity::None);
        assert_eq!(line.stop_bits, StopBits::One);
    }
}
