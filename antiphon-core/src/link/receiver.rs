//! Receive side of the echo link

use antiphon_hal::serial::SerialRx;
use antiphon_hal::slot::{SlotKey, SlotStore};
use antiphon_hal::time::{ms_to_ticks, TickClock};

use crate::message::{Message, MESSAGE_CAPACITY};
use crate::throughput::TransferStats;

use super::error::LinkError;
use super::{READ_GAP_MS, RECEIVE_TIMEOUT_MS};

/// A captured message together with its receive measurement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reception {
    /// The message, already committed to the slot
    pub message: Message,
    /// How fast it came in
    pub stats: TransferStats,
}

/// Receive side of the echo link
///
/// Owns the serial receive half and the clock. The persistent slot is
/// borrowed per call so both sides of the link can share one store.
pub struct Receiver<R, C> {
    rx: R,
    clock: C,
    timeout_ticks: u64,
    gap_ticks: u64,
    buf: [u8; MESSAGE_CAPACITY],
}

impl<R: SerialRx, C: TickClock> Receiver<R, C> {
    /// Create a receiver with the standard timeout budget
    pub fn new(rx: R, clock: C) -> Self {
        let hz = clock.tick_hz();
        Self {
            rx,
            clock,
            timeout_ticks: ms_to_ticks(RECEIVE_TIMEOUT_MS, hz),
            gap_ticks: ms_to_ticks(READ_GAP_MS, hz),
            buf: [0; MESSAGE_CAPACITY],
        }
    }

    /// Wait for one message and persist it
    ///
    /// Collects a run of bytes: the first chunk gets the full receive
    /// timeout, each later chunk only joins the run if it follows within
    /// the inter-chunk gap. A silent timeout returns `Ok(None)`, the
    /// loop's idle outcome rather than an error.
    ///
    /// A full buffer ends the run early; surplus bytes stay queued in
    /// the transport and open the next message.
    ///
    /// The message is staged and committed before this returns, so a
    /// returned [`Reception`] is already durable.
    pub async fn poll<S: SlotStore>(
        &mut self,
        slot: &mut S,
    ) -> Result<Option<Reception>, LinkError<R::Error>> {
        let start = self.clock.now_ticks();
        let first = self
            .rx
            .read_chunk(&mut self.buf, self.timeout_ticks)
            .await
            .map_err(LinkError::Transport)?;
        if first == 0 {
            return Ok(None);
        }

        let mut len = first;
        while len < MESSAGE_CAPACITY {
            let n = self
                .rx
                .read_chunk(&mut self.buf[len..], self.gap_ticks)
                .await
                .map_err(LinkError::Transport)?;
            if n == 0 {
                break;
            }
            len += n;
        }
        // Measure the capture alone; storage time is not line throughput
        let elapsed_ticks = self.clock.now_ticks().saturating_sub(start);

        let message = Message::from_bytes(&self.buf[..len]).map_err(|_| LinkError::Oversize)?;
        slot.set_str(SlotKey::Uart, message.as_bytes()).await?;
        slot.commit().await?;

        Ok(Some(Reception {
            message,
            stats: TransferStats {
                bytes: len,
                elapsed_ticks,
            },
        }))
    }
}
