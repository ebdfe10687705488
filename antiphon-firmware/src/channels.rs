//! Inter-task communication channels
//!
//! Defines the static channels used for communication between the two
//! link tasks. Uses embassy-sync primitives for safe async
//! communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;

use antiphon_core::message::Message;
use antiphon_hal_rp2040::Rp2040SlotStore;

/// Hand-off capacity from receive to transmit
///
/// Exactly one: the link retains at most one in-flight message, and the
/// channel capacity is what enforces it.
const ECHO_CHANNEL_SIZE: usize = 1;

/// Messages awaiting echo, already committed to the slot
pub static ECHO_CHANNEL: Channel<CriticalSectionRawMutex, Message, ECHO_CHANNEL_SIZE> =
    Channel::new();

/// Signal that the echo (including its erase/commit and settle delay)
/// finished; the payload reports whether it succeeded
pub static ECHO_DONE: Signal<CriticalSectionRawMutex, bool> = Signal::new();

/// The slot store both tasks share
///
/// Created once in main and passed in explicitly. The cycle sequencing
/// through [`ECHO_CHANNEL`] and [`ECHO_DONE`] means the lock is never
/// contended in steady state.
pub type SharedSlot = Mutex<CriticalSectionRawMutex, Rp2040SlotStore<'static>>;
