//! Message buffer for captured serial runs

use heapless::Vec;

/// Capacity of a message payload in bytes
///
/// One receive buffer's worth of data. A run longer than this is split:
/// the first `MESSAGE_CAPACITY` bytes form the message, the rest stay
/// queued in the transport for the next cycle.
pub const MESSAGE_CAPACITY: usize = 1024;

/// Error returned when a byte slice exceeds [`MESSAGE_CAPACITY`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MessageTooLong;

/// One serial message
///
/// The payload is nominally text but carried length-delimited from
/// capture to echo, so interior NUL bytes survive a store/load cycle
/// intact.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Message {
    bytes: Vec<u8, MESSAGE_CAPACITY>,
}

impl Message {
    /// Build a message from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MessageTooLong> {
        Vec::from_slice(bytes)
            .map(|bytes| Self { bytes })
            .map_err(|_| MessageTooLong)
    }

    /// The payload bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for a zero-length payload
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_payload_bytes() {
        let message = Message::from_bytes(b"HELLO").unwrap();
        assert_eq!(message.as_bytes(), b"HELLO");
        assert_eq!(message.len(), 5);
        assert!(!message.is_empty());
    }

    #[test]
    fn test_accepts_exactly_capacity_bytes() {
        let payload = [0x55u8; MESSAGE_CAPACITY];
        let message = Message::from_bytes(&payload).unwrap();
        assert_eq!(message.len(), MESSAGE_CAPACITY);
    }

    #[test]
    fn test_rejects_oversize_payload() {
        let payload = [0x55u8; MESSAGE_CAPACITY + 1];
        assert_eq!(Message::from_bytes(&payload), Err(MessageTooLong));
    }

    #[test]
    fn test_empty_message() {
        let message = Message::from_bytes(b"").unwrap();
        assert!(message.is_empty());
        assert_eq!(message.as_bytes(), b"");
    }
}
