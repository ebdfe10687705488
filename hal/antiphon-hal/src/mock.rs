//! In-memory trait implementations for host-side testing
//!
//! Provides mock versions of the serial, slot and clock traits so the
//! link logic can be exercised without hardware. The mocks keep their
//! buffers in `heapless` collections and support fault injection for
//! error-path tests.

use core::cell::Cell;

use heapless::Vec;

use crate::serial::{SerialRx, SerialTx};
use crate::slot::{strip_terminator, SlotError, SlotKey, SlotStore, VALUE_TERMINATOR};
use crate::time::TickClock;

/// Capacity of the mock serial buffers
const IO_CAPACITY: usize = 2048;

/// Capacity of one stored slot entry (payload plus terminator)
const ENTRY_CAPACITY: usize = 2048;

/// Maximum operations the slot journal retains
const JOURNAL_CAPACITY: usize = 32;

/// Error produced by injected serial faults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MockSerialError {
    /// A test armed this failure
    Injected,
}

/// Mock serial port
///
/// In-memory transmit and receive buffers allow tests to script incoming
/// bytes with [`inject`](MockSerial::inject) and observe outgoing bytes
/// with [`sent`](MockSerial::sent). The mock never waits: a drained
/// receive queue reads as an elapsed timeout.
#[derive(Debug, Default)]
pub struct MockSerial {
    rx: Vec<u8, IO_CAPACITY>,
    rx_pos: usize,
    tx: Vec<u8, IO_CAPACITY>,
    chunk_limit: Option<usize>,
    rx_fault_armed: bool,
    tx_fault_armed: bool,
}

impl MockSerial {
    /// Create a mock serial port with empty buffers
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for the receive side (for test setup)
    pub fn inject(&mut self, data: &[u8]) {
        self.rx
            .extend_from_slice(data)
            .expect("mock rx buffer overflow");
    }

    /// Cap how many bytes a single read returns
    ///
    /// Emulates data trickling in across several transport reads.
    pub fn set_chunk_limit(&mut self, limit: usize) {
        self.chunk_limit = Some(limit);
    }

    /// Bytes written so far (for test verification)
    pub fn sent(&self) -> &[u8] {
        &self.tx
    }

    /// Clear the transmit capture
    pub fn clear_sent(&mut self) {
        self.tx.clear();
    }

    /// Injected bytes not yet consumed by a read
    pub fn pending(&self) -> usize {
        self.rx.len() - self.rx_pos
    }

    /// Make the next read fail with [`MockSerialError::Injected`]
    pub fn fail_next_read(&mut self) {
        self.rx_fault_armed = true;
    }

    /// Make the next write fail with [`MockSerialError::Injected`]
    pub fn fail_next_write(&mut self) {
        self.tx_fault_armed = true;
    }
}

impl SerialRx for MockSerial {
    type Error = MockSerialError;

    async fn read_chunk(
        &mut self,
        buf: &mut [u8],
        _timeout_ticks: u64,
    ) -> Result<usize, MockSerialError> {
        if self.rx_fault_armed {
            self.rx_fault_armed = false;
            return Err(MockSerialError::Injected);
        }
        let remaining = self.rx.len() - self.rx_pos;
        let mut n = remaining.min(buf.len());
        if let Some(limit) = self.chunk_limit {
            n = n.min(limit);
        }
        buf[..n].copy_from_slice(&self.rx[self.rx_pos..self.rx_pos + n]);
        self.rx_pos += n;
        Ok(n)
    }
}

impl SerialTx for MockSerial {
    type Error = MockSerialError;

    async fn write_all(&mut self, data: &[u8]) -> Result<(), MockSerialError> {
        if self.tx_fault_armed {
            self.tx_fault_armed = false;
            return Err(MockSerialError::Injected);
        }
        self.tx
            .extend_from_slice(data)
            .expect("mock tx buffer overflow");
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), MockSerialError> {
        Ok(())
    }
}

/// Operations recorded in the mock slot journal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOp {
    Get,
    Set,
    Commit,
    Erase,
}

/// Mock persistent slot
///
/// Models the staging/commit cycle of the real storage: `set_str` stages
/// an entry, `commit` publishes it, `get_str` only ever sees committed
/// data. Every successful operation is appended to a journal so tests
/// can assert ordering, and each operation can be armed to fail once.
#[derive(Debug, Default)]
pub struct MockSlot {
    staged: Option<Vec<u8, ENTRY_CAPACITY>>,
    committed: Option<Vec<u8, ENTRY_CAPACITY>>,
    journal: Vec<SlotOp, JOURNAL_CAPACITY>,
    get_fault: Option<SlotError>,
    set_fault: Option<SlotError>,
    commit_fault: Option<SlotError>,
    erase_fault: Option<SlotError>,
}

impl MockSlot {
    /// Create an empty mock slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a raw entry directly into committed storage (for test setup)
    ///
    /// The bytes land exactly as given, terminator included or not, so
    /// tests can seed well-formed and malformed entries alike.
    pub fn seed_committed(&mut self, entry: &[u8]) {
        let mut stored = Vec::new();
        stored
            .extend_from_slice(entry)
            .expect("mock entry overflow");
        self.committed = Some(stored);
    }

    /// Raw committed entry, if any (for test verification)
    pub fn committed(&self) -> Option<&[u8]> {
        self.committed.as_deref()
    }

    /// True when nothing is committed
    pub fn is_empty(&self) -> bool {
        self.committed.is_none()
    }

    /// Successful operations in the order they completed
    pub fn journal(&self) -> &[SlotOp] {
        &self.journal
    }

    /// Forget the recorded operations
    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    /// Arm `op` to fail once with `err`
    pub fn inject_fault(&mut self, op: SlotOp, err: SlotError) {
        match op {
            SlotOp::Get => self.get_fault = Some(err),
            SlotOp::Set => self.set_fault = Some(err),
            SlotOp::Commit => self.commit_fault = Some(err),
            SlotOp::Erase => self.erase_fault = Some(err),
        }
    }

    fn record(&mut self, op: SlotOp) {
        self.journal.push(op).expect("mock journal overflow");
    }
}

impl SlotStore for MockSlot {
    async fn get_str(&mut self, _key: SlotKey, buf: &mut [u8]) -> Result<usize, SlotError> {
        if let Some(err) = self.get_fault.take() {
            return Err(err);
        }
        let entry = self.committed.as_ref().ok_or(SlotError::NotFound)?;
        let payload = strip_terminator(entry)?;
        if payload.len() > buf.len() {
            return Err(SlotError::BufferTooSmall);
        }
        let len = payload.len();
        buf[..len].copy_from_slice(payload);
        self.record(SlotOp::Get);
        Ok(len)
    }

    async fn set_str(&mut self, _key: SlotKey, value: &[u8]) -> Result<(), SlotError> {
        if let Some(err) = self.set_fault.take() {
            return Err(err);
        }
        let mut entry = Vec::new();
        entry
            .extend_from_slice(value)
            .map_err(|_| SlotError::ValueTooLarge)?;
        entry
            .push(VALUE_TERMINATOR)
            .map_err(|_| SlotError::ValueTooLarge)?;
        self.staged = Some(entry);
        self.record(SlotOp::Set);
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), SlotError> {
        if let Some(err) = self.commit_fault.take() {
            return Err(err);
        }
        if let Some(staged) = self.staged.take() {
            self.committed = Some(staged);
        }
        self.record(SlotOp::Commit);
        Ok(())
    }

    async fn erase_all(&mut self) -> Result<(), SlotError> {
        if let Some(err) = self.erase_fault.take() {
            return Err(err);
        }
        self.staged = None;
        self.committed = None;
        self.record(SlotOp::Erase);
        Ok(())
    }
}

/// Mock tick source
///
/// [`fixed`](MockClock::fixed) clocks never move, so measured intervals
/// come out zero. [`stepping`](MockClock::stepping) clocks advance by a
/// fixed step on every reading, which makes the interval between two
/// consecutive readings deterministic.
#[derive(Debug)]
pub struct MockClock {
    now: Cell<u64>,
    step: u64,
    hz: u64,
}

impl MockClock {
    /// Clock that always reads the same tick
    pub fn fixed(tick_hz: u64) -> Self {
        Self {
            now: Cell::new(0),
            step: 0,
            hz: tick_hz,
        }
    }

    /// Clock that advances by `step` ticks on every reading
    pub fn stepping(tick_hz: u64, step: u64) -> Self {
        Self {
            now: Cell::new(0),
            step,
            hz: tick_hz,
        }
    }
}

impl TickClock for MockClock {
    fn now_ticks(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }

    fn tick_hz(&self) -> u64 {
        self.hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[test]
    fn test_serial_write_captured() {
        let mut serial = MockSerial::new();
        block_on(serial.write_all(b"Hello, World!")).unwrap();
        block_on(serial.flush()).unwrap();
        assert_eq!(serial.sent(), b"Hello, World!");
    }

    #[test]
    fn test_serial_read_drains_injected() {
        let mut serial = MockSerial::new();
        serial.inject(b"Test Data");

        let mut buf = [0u8; 4];
        assert_eq!(block_on(serial.read_chunk(&mut buf, 100)).unwrap(), 4);
        assert_eq!(&buf, b"Test");

        let mut rest = [0u8; 16];
        assert_eq!(block_on(serial.read_chunk(&mut rest, 100)).unwrap(), 5);
        assert_eq!(&rest[..5], b" Data");
        assert_eq!(serial.pending(), 0);

        // Empty queue reads as a timeout
        assert_eq!(block_on(serial.read_chunk(&mut rest, 100)).unwrap(), 0);
    }

    #[test]
    fn test_chunk_limit_splits_reads() {
        let mut serial = MockSerial::new();
        serial.set_chunk_limit(3);
        serial.inject(b"abcdefg");

        let mut buf = [0u8; 16];
        assert_eq!(block_on(serial.read_chunk(&mut buf, 100)).unwrap(), 3);
        assert_eq!(block_on(serial.read_chunk(&mut buf, 100)).unwrap(), 3);
        assert_eq!(block_on(serial.read_chunk(&mut buf, 100)).unwrap(), 1);
    }

    #[test]
    fn test_serial_fault_fires_once() {
        let mut serial = MockSerial::new();
        serial.inject(b"x");
        serial.fail_next_read();

        let mut buf = [0u8; 4];
        assert_eq!(
            block_on(serial.read_chunk(&mut buf, 100)),
            Err(MockSerialError::Injected)
        );
        assert_eq!(block_on(serial.read_chunk(&mut buf, 100)).unwrap(), 1);
    }

    #[test]
    fn test_slot_value_visible_after_commit() {
        let mut slot = MockSlot::new();
        let mut buf = [0u8; 16];

        block_on(slot.set_str(SlotKey::Uart, b"HELLO")).unwrap();
        assert_eq!(
            block_on(slot.get_str(SlotKey::Uart, &mut buf)),
            Err(SlotError::NotFound)
        );

        block_on(slot.commit()).unwrap();
        let len = block_on(slot.get_str(SlotKey::Uart, &mut buf)).unwrap();
        assert_eq!(&buf[..len], b"HELLO");
        assert_eq!(slot.committed(), Some(&b"HELLO\0"[..]));
    }

    #[test]
    fn test_erase_discards_staged_and_committed() {
        let mut slot = MockSlot::new();
        block_on(slot.set_str(SlotKey::Uart, b"one")).unwrap();
        block_on(slot.commit()).unwrap();
        block_on(slot.set_str(SlotKey::Uart, b"two")).unwrap();

        block_on(slot.erase_all()).unwrap();
        assert!(slot.is_empty());

        // A later commit must not resurrect the staged value
        block_on(slot.commit()).unwrap();
        assert!(slot.is_empty());
    }

    #[test]
    fn test_get_copies_payload_and_journals_last() {
        let mut slot = MockSlot::new();
        block_on(slot.set_str(SlotKey::Uart, b"HELLO")).unwrap();
        block_on(slot.commit()).unwrap();

        let mut buf = [0u8; 16];
        let len = block_on(slot.get_str(SlotKey::Uart, &mut buf)).unwrap();

        assert_eq!(len, 5);
        assert_eq!(&buf[..len], b"HELLO");
        assert_eq!(slot.journal(), &[SlotOp::Set, SlotOp::Commit, SlotOp::Get]);
    }

    #[test]
    fn test_journal_records_operation_order() {
        let mut slot = MockSlot::new();
        block_on(slot.set_str(SlotKey::Uart, b"m")).unwrap();
        block_on(slot.commit()).unwrap();
        block_on(slot.erase_all()).unwrap();
        assert_eq!(slot.journal(), &[SlotOp::Set, SlotOp::Commit, SlotOp::Erase]);
    }

    #[test]
    fn test_slot_fault_fires_once() {
        let mut slot = MockSlot::new();
        slot.inject_fault(SlotOp::Commit, SlotError::Flash);

        block_on(slot.set_str(SlotKey::Uart, b"m")).unwrap();
        assert_eq!(block_on(slot.commit()), Err(SlotError::Flash));
        assert_eq!(slot.journal(), &[SlotOp::Set]);

        block_on(slot.commit()).unwrap();
        assert_eq!(slot.journal(), &[SlotOp::Set, SlotOp::Commit]);
    }

    #[test]
    fn test_seeded_corruption_surfaces() {
        let mut slot = MockSlot::new();
        slot.seed_committed(b"no-terminator");

        let mut buf = [0u8; 32];
        assert_eq!(
            block_on(slot.get_str(SlotKey::Uart, &mut buf)),
            Err(SlotError::Corrupted)
        );
    }

    #[test]
    fn test_stepping_clock_advances() {
        let clock = MockClock::stepping(1_000_000, 250);
        assert_eq!(clock.now_ticks(), 0);
        assert_eq!(clock.now_ticks(), 250);
        assert_eq!(clock.now_ticks(), 500);
        assert_eq!(clock.tick_hz(), 1_000_000);
    }

    #[test]
    fn test_fixed_clock_static() {
        let clock = MockClock::fixed(1_000_000);
        assert_eq!(clock.now_ticks(), 0);
        assert_eq!(clock.now_ticks(), 0);
    }
}
