//! Transmit side of the echo link

use antiphon_hal::serial::SerialTx;
use antiphon_hal::slot::{SlotError, SlotKey, SlotStore};
use antiphon_hal::time::TickClock;

use crate::message::{Message, MESSAGE_CAPACITY};
use crate::throughput::TransferStats;

use super::error::LinkError;

/// Transmit side of the echo link
///
/// Owns the serial transmit half and the clock. The persistent slot is
/// borrowed per call so both sides of the link can share one store.
pub struct Transmitter<W, C> {
    tx: W,
    clock: C,
}

impl<W: SerialTx, C: TickClock> Transmitter<W, C> {
    /// Create a transmitter
    pub fn new(tx: W, clock: C) -> Self {
        Self { tx, clock }
    }

    /// Echo a message back and retire it from the slot
    ///
    /// Writes the payload, flushes it onto the wire inside the measured
    /// window, then erases the slot. Erasing last means a message is
    /// echoed at least once even if power drops mid-cycle; erasing at
    /// all means it is never echoed twice in a healthy cycle.
    pub async fn echo<S: SlotStore>(
        &mut self,
        message: &Message,
        slot: &mut S,
    ) -> Result<TransferStats, LinkError<W::Error>> {
        let start = self.clock.now_ticks();
        self.tx
            .write_all(message.as_bytes())
            .await
            .map_err(LinkError::Transport)?;
        self.tx.flush().await.map_err(LinkError::Transport)?;
        let elapsed_ticks = self.clock.now_ticks().saturating_sub(start);

        slot.erase_all().await?;
        slot.commit().await?;

        Ok(TransferStats {
            bytes: message.len(),
            elapsed_ticks,
        })
    }

    /// Echo whatever the slot still holds
    ///
    /// Run once at boot: a message committed but not yet echoed when
    /// power was lost goes out on the next start. `Ok(None)` means the
    /// slot holds no message, the normal cold-boot outcome.
    pub async fn drain<S: SlotStore>(
        &mut self,
        slot: &mut S,
    ) -> Result<Option<TransferStats>, LinkError<W::Error>> {
        let mut buf = [0u8; MESSAGE_CAPACITY + 1];
        let len = match slot.get_str(SlotKey::Uart, &mut buf).await {
            Ok(len) => len,
            Err(SlotError::NotFound) => return Ok(None),
            Err(err) => return Err(LinkError::Storage(err)),
        };
        let message = Message::from_bytes(&buf[..len]).map_err(|_| LinkError::Oversize)?;
        self.echo(&message, slot).await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use antiphon_hal::mock::{MockClock, MockSerial, MockSlot, SlotOp};
    use embassy_futures::block_on;

    const HZ: u64 = 1_000_000;

    fn committed_slot(payload: &[u8]) -> MockSlot {
        let mut slot = MockSlot::new();
        block_on(slot.set_str(SlotKey::Uart, payload)).unwrap();
        block_on(slot.commit()).unwrap();
        slot.clear_journal();
        slot
    }

    #[test]
    fn test_echo_writes_payload_and_erases_slot() {
        let mut serial = MockSerial::new();
        let clock = MockClock::stepping(HZ, 100_000);
        let mut slot = committed_slot(b"HELLO");
        let message = Message::from_bytes(b"HELLO").unwrap();

        let mut transmitter = Transmitter::new(&mut serial, &clock);
        let stats = block_on(transmitter.echo(&message, &mut slot)).unwrap();

        assert_eq!(stats.bytes, 5);
        assert_eq!(stats.elapsed_ticks, 100_000);
        drop(transmitter);
        assert_eq!(serial.sent(), b"HELLO");
        assert!(slot.is_empty());
        assert_eq!(slot.journal(), &[SlotOp::Erase, SlotOp::Commit]);
    }

    #[test]
    fn test_echo_after_echo_is_idempotent_on_the_slot() {
        let mut serial = MockSerial::new();
        let clock = MockClock::fixed(HZ);
        let mut slot = committed_slot(b"once");
        let message = Message::from_bytes(b"once").unwrap();

        let mut transmitter = Transmitter::new(&mut serial, &clock);
        block_on(transmitter.echo(&message, &mut slot)).unwrap();
        assert!(slot.is_empty());

        // Erasing an already-empty slot succeeds and leaves it empty
        block_on(transmitter.echo(&message, &mut slot)).unwrap();
        assert!(slot.is_empty());
    }

    #[test]
    fn test_transport_fault_leaves_slot_intact() {
        let mut serial = MockSerial::new();
        serial.fail_next_write();
        let clock = MockClock::fixed(HZ);
        let mut slot = committed_slot(b"keep me");
        let message = Message::from_bytes(b"keep me").unwrap();

        let mut transmitter = Transmitter::new(&mut serial, &clock);
        let outcome = block_on(transmitter.echo(&message, &mut slot));

        assert!(matches!(outcome, Err(LinkError::Transport(_))));
        // The un-echoed message survives for the boot drain to retry
        assert_eq!(slot.committed(), Some(&b"keep me\0"[..]));
    }

    #[test]
    fn test_drain_echoes_a_leftover_message() {
        let mut serial = MockSerial::new();
        let clock = MockClock::fixed(HZ);
        let mut slot = committed_slot(b"interrupted");

        let mut transmitter = Transmitter::new(&mut serial, &clock);
        let stats = block_on(transmitter.drain(&mut slot)).unwrap().unwrap();

        assert_eq!(stats.bytes, 11);
        drop(transmitter);
        assert_eq!(serial.sent(), b"interrupted");
        assert!(slot.is_empty());
    }

    #[test]
    fn test_drain_of_empty_slot_is_a_quiet_none() {
        let mut serial = MockSerial::new();
        let clock = MockClock::fixed(HZ);
        let mut slot = MockSlot::new();

        let mut transmitter = Transmitter::new(&mut serial, &clock);
        let outcome = block_on(transmitter.drain(&mut slot)).unwrap();

        assert_eq!(outcome, None);
        drop(transmitter);
        assert_eq!(serial.sent(), b"");
        assert!(slot.journal().is_empty());
    }

    #[test]
    fn test_drain_surfaces_corrupted_entries() {
        let mut serial = MockSerial::new();
        let clock = MockClock::fixed(HZ);
        let mut slot = MockSlot::new();
        slot.seed_committed(b"torn write, no terminator");

        let mut transmitter = Transmitter::new(&mut serial, &clock);
        let outcome = block_on(transmitter.drain(&mut slot));

        assert_eq!(outcome, Err(LinkError::Storage(SlotError::Corrupted)));
        drop(transmitter);
        assert_eq!(serial.sent(), b"");
    }

    #[test]
    fn test_drain_rejects_oversize_foreign_entries() {
        let mut serial = MockSerial::new();
        let clock = MockClock::fixed(HZ);
        let mut slot = MockSlot::new();

        // An entry one byte beyond our capacity, as a bigger-buffered
        // writer could have left it
        let mut entry = [0x42u8; MESSAGE_CAPACITY + 2];
        entry[MESSAGE_CAPACITY + 1] = 0;
        slot.seed_committed(&entry);

        let mut transmitter = Transmitter::new(&mut serial, &clock);
        let outcome = block_on(transmitter.drain(&mut slot));

        assert_eq!(outcome, Err(LinkError::Oversize));
        drop(transmitter);
        assert_eq!(serial.sent(), b"");
    }
}
