//! Store-and-forward link operations
//!
//! One cycle of the link: [`Receiver::poll`] waits for a run of serial
//! bytes and commits it to the persistent slot, [`Transmitter::echo`]
//! plays it back to the sender and retires the slot entry. At boot,
//! [`Transmitter::drain`] replays anything a previous run left behind.

pub mod error;
pub mod receiver;
pub mod transmitter;

pub use error::LinkError;
pub use receiver::{Receiver, Reception};
pub use transmitter::Transmitter;

/// How long a poll waits for the first byte before reporting idle (ms)
pub const RECEIVE_TIMEOUT_MS: u64 = 1000;

/// How closely a later chunk must trail the previous one to join the run (ms)
pub const READ_GAP_MS: u64 = 50;

/// Pause after an idle poll before listening again (ms)
pub const IDLE_BACKOFF_MS: u64 = 3000;

/// Pause after a completed echo before the next cycle (ms)
pub const SETTLE_DELAY_MS: u64 = 2000;
