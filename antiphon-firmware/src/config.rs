//! Fixed link parameters
//!
//! The link has no runtime configuration surface; everything is a
//! compile-time constant. Line settings come from `LineConfig::default`
//! in `antiphon-hal`, and timing constants for the link cycle live with
//! the link operations in `antiphon-core`.

/// Transmit ring buffer for the buffered UART driver
pub const UART_TX_BUF_SIZE: usize = 256;

/// Receive ring buffer for the buffered UART driver
///
/// Large enough to hold a full message plus the overflow the driver
/// keeps queued when a run is longer than one message.
pub const UART_RX_BUF_SIZE: usize = 2048;
