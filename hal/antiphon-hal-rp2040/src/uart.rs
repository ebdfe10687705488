//! Buffered UART adapters for RP2040
//!
//! Wraps the embassy-rp buffered UART halves in the shared serial
//! traits. The receive side adds the timeout semantics the link
//! expects: a read that stays silent for the whole budget reports
//! zero bytes instead of blocking forever.

use antiphon_hal::serial::{DataBits, Parity, SerialRx, SerialTx, StopBits};
use embassy_rp::uart::{
    BufferedUartRx, BufferedUartTx, Config as UartConfig, DataBits as RpDataBits,
    Error as UartError, Parity as RpParity, StopBits as RpStopBits,
};
use embassy_time::{with_timeout, Duration};
use embedded_io_async::{Read, Write};

pub use antiphon_hal::serial::LineConfig;

/// Translate the shared line settings into an embassy-rp UART config
pub fn line_to_config(line: &LineConfig) -> UartConfig {
    let mut config = UartConfig::default();
    config.baudrate = line.baudrate;
    config.data_bits = match line.data_bits {
        DataBits::Seven => RpDataBits::DataBits7,
        DataBits::Eight => RpDataBits::DataBits8,
    };
    config.parity = match line.parity {
        Parity::None => RpParity::ParityNone,
        Parity::Even => RpParity::ParityEven,
        Parity::Odd => RpParity::ParityOdd,
    };
    config.stop_bits = match line.stop_bits {
        StopBits::One => RpStopBits::STOP1,
        StopBits::Two => RpStopBits::STOP2,
    };
    config
}

/// Error from RP2040 UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialPortError {
    /// Break condition on the line
    Break,
    /// Receive FIFO overflowed
    Overrun,
    /// Parity mismatch
    Parity,
    /// Missing or invalid stop bit
    Framing,
    /// Other error
    Other,
}

impl From<UartError> for SerialPortError {
    fn from(e: UartError) -> Self {
        match e {
            UartError::Break => SerialPortError::Break,
            UartError::Overrun => SerialPortError::Overrun,
            UartError::Parity => SerialPortError::Parity,
            UartError::Framing => SerialPortError::Framing,
            _ => SerialPortError::Other,
        }
    }
}

/// Receive half of the link UART
pub struct Rp2040SerialRx {
    rx: BufferedUartRx,
}

impl Rp2040SerialRx {
    /// Wrap a buffered receive half
    pub fn new(rx: BufferedUartRx) -> Self {
        Self { rx }
    }
}

impl SerialRx for Rp2040SerialRx {
    type Error = SerialPortError;

    async fn read_chunk(
        &mut self,
        buf: &mut [u8],
        timeout_ticks: u64,
    ) -> Result<usize, SerialPortError> {
        match with_timeout(Duration::from_ticks(timeout_ticks), self.rx.read(buf)).await {
            Ok(Ok(n)) => Ok(n),
            Ok(Err(e)) => Err(e.into()),
            Err(_timeout) => Ok(0),
        }
    }
}

/// Transmit half of the link UART
pub struct Rp2040SerialTx {
    tx: BufferedUartTx,
}

impl Rp2040SerialTx {
    /// Wrap a buffered transmit half
    pub fn new(tx: BufferedUartTx) -> Self {
        Self { tx }
    }
}

impl SerialTx for Rp2040SerialTx {
    type Error = SerialPortError;

    async fn write_all(&mut self, data: &[u8]) -> Result<(), SerialPortError> {
        Write::write_all(&mut self.tx, data).await.map_err(Into::into)
    }

    async fn flush(&mut self) -> Result<(), SerialPortError> {
        Write::flush(&mut self.tx).await.map_err(Into::into)
    }
}
