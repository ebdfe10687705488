//! Link operation errors

use antiphon_hal::slot::SlotError;

/// Errors surfaced by link operations
///
/// Generic over the transport's error type so each chip HAL keeps its
/// own fault detail; slot errors share the common [`SlotError`] set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError<E> {
    /// Serial transport failed
    Transport(E),
    /// Persistent slot failed
    Storage(SlotError),
    /// Payload larger than the message capacity
    ///
    /// Only reachable when the slot holds an entry written by something
    /// with a bigger buffer than ours.
    Oversize,
}

impl<E> From<SlotError> for LinkError<E> {
    fn from(err: SlotError) -> Self {
        LinkError::Storage(err)
    }
}
