//! Persistent slot abstractions
//!
//! Provides traits for persistent single-value storage that can be
//! implemented by chip-specific HALs using their flash memory.

/// Storage keys for slot data
///
/// These keys identify the values kept in the persistent partition.
/// The actual storage implementation handles wear leveling and
/// data integrity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotKey {
    /// Most recent serial message awaiting echo
    Uart,
}

impl SlotKey {
    /// Get the key's wire name
    pub fn name(self) -> &'static str {
        match self {
            SlotKey::Uart => "uart",
        }
    }
}

/// Errors from persistent slot operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotError {
    /// No value stored under the key
    NotFound,
    /// Caller's buffer too small for the stored value
    BufferTooSmall,
    /// Value exceeds the slot's capacity
    ValueTooLarge,
    /// Stored entry is malformed
    Corrupted,
    /// Storage layer operation failed
    Storage,
    /// Flash operation failed
    Flash,
}

/// Persistent slot trait
///
/// Provides wear-leveled storage for one value per [`SlotKey`], with an
/// explicit staging/commit cycle:
///
/// - [`set_str`](SlotStore::set_str) stages a value in RAM
/// - [`commit`](SlotStore::commit) makes staged values durable
/// - [`get_str`](SlotStore::get_str) reads back the last committed value
/// - [`erase_all`](SlotStore::erase_all) discards every value, staged and durable
pub trait SlotStore {
    /// Read the committed value for `key` into the provided buffer
    ///
    /// Returns the number of payload bytes read (terminator stripped),
    /// or [`SlotError::NotFound`] if nothing is stored under the key.
    fn get_str(
        &mut self,
        key: SlotKey,
        buf: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, SlotError>>;

    /// Stage `value` for `key`
    ///
    /// The value only becomes durable on the next [`commit`](SlotStore::commit).
    /// Returns [`SlotError::ValueTooLarge`] if the terminated entry would
    /// exceed the slot's capacity.
    fn set_str(
        &mut self,
        key: SlotKey,
        value: &[u8],
    ) -> impl core::future::Future<Output = Result<(), SlotError>>;

    /// Write any staged values through to persistent storage
    fn commit(&mut self) -> impl core::future::Future<Output = Result<(), SlotError>>;

    /// Erase all stored data, staged and durable
    ///
    /// This erases the entire slot partition. Use with caution!
    fn erase_all(&mut self) -> impl core::future::Future<Output = Result<(), SlotError>>;
}

/// Terminator byte appended to every stored entry
///
/// A committed entry is the payload followed by this byte; readers use it
/// to detect short or torn writes.
pub const VALUE_TERMINATOR: u8 = 0;

/// Copy `value` plus the trailing terminator into `scratch`
///
/// Returns the filled prefix of `scratch`, or [`SlotError::ValueTooLarge`]
/// if the terminated entry does not fit.
pub fn terminate_value<'a>(value: &[u8], scratch: &'a mut [u8]) -> Result<&'a [u8], SlotError> {
    let total = value.len() + 1;
    if total > scratch.len() {
        return Err(SlotError::ValueTooLarge);
    }
    scratch[..value.len()].copy_from_slice(value);
    scratch[value.len()] = VALUE_TERMINATOR;
    Ok(&scratch[..total])
}

/// Strip the trailing terminator from a raw entry
///
/// Returns the payload, or [`SlotError::Corrupted`] if the entry is empty
/// or does not end in the terminator.
pub fn strip_terminator(entry: &[u8]) -> Result<&[u8], SlotError> {
    match entry.split_last() {
        Some((&VALUE_TERMINATOR, payload)) => Ok(payload),
        _ => Err(SlotError::Corrupted),
    }
}

// Implement the sequential-storage Key trait when the feature is enabled.
// Keys serialize as their length-prefixed wire name, so the stored layout
// matches what the key is called everywhere else.
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for SlotKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        let name = self.name().as_bytes();
        if buffer.len() < name.len() + 1 {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        buffer[0] = name.len() as u8;
        buffer[1..1 + name.len()].copy_from_slice(name);
        Ok(name.len() + 1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        let (&len, rest) = buffer
            .split_first()
            .ok_or(sequential_storage::map::SerializationError::BufferTooSmall)?;
        let len = len as usize;
        if rest.len() < len {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        match &rest[..len] {
            b"uart" => Ok((SlotKey::Uart, len + 1)),
            _ => Err(sequential_storage::map::SerializationError::InvalidFormat),
        }
    }
}
