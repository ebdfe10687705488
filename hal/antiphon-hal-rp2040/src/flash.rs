//! Flash-backed persistent slot for RP2040
//!
//! Uses sequential-storage for wear-leveled key-value storage in the
//! last 64KB of flash.
//!
//! Implements the `SlotStore` trait from `antiphon-hal`: `set_str`
//! stages the terminated entry in RAM and `commit` writes it through,
//! so a value only becomes visible once it is durable.

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use embedded_storage_async::nor_flash::NorFlash;
use heapless::Vec;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

use antiphon_core::message::MESSAGE_CAPACITY;

// Re-export shared types from antiphon-hal
pub use antiphon_hal::slot::{SlotError, SlotKey};

use antiphon_hal::slot::{strip_terminator, terminate_value, SlotStore};

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB flash on the Pico
pub const SLOT_PARTITION_SIZE: usize = 64 * 1024; // 64KB for slot data
pub const SLOT_PARTITION_START: usize = FLASH_SIZE - SLOT_PARTITION_SIZE;

/// Flash erase size for RP2040
pub const FLASH_ERASE_SIZE: usize = ERASE_SIZE;

/// Flash range for the slot partition
pub const SLOT_RANGE: core::ops::Range<u32> =
    (SLOT_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Largest entry the slot accepts: one message plus its terminator
pub const SLOT_ENTRY_CAPACITY: usize = MESSAGE_CAPACITY + 1;

/// RP2040 persistent slot implementation
///
/// Provides wear-leveled storage for the link's message slot. Uses
/// sequential-storage for automatic wear leveling.
pub struct Rp2040SlotStore<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
    staged: Option<(SlotKey, Vec<u8, SLOT_ENTRY_CAPACITY>)>,
}

impl<'d> Rp2040SlotStore<'d> {
    /// Create a new flash slot instance
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
            staged: None,
        }
    }
}

// Implement the shared SlotStore trait
impl<'d> SlotStore for Rp2040SlotStore<'d> {
    async fn get_str(&mut self, key: SlotKey, buf: &mut [u8]) -> Result<usize, SlotError> {
        let mut data_buffer = [0u8; 2048]; // Max entry size plus map overhead

        let result = map::fetch_item::<SlotKey, &[u8], _>(
            &mut self.flash,
            SLOT_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
        )
        .await;

        match result {
            Ok(Some(entry)) => {
                let payload = strip_terminator(entry)?;
                if buf.len() < payload.len() {
                    return Err(SlotError::BufferTooSmall);
                }
                buf[..payload.len()].copy_from_slice(payload);
                Ok(payload.len())
            }
            Ok(None) => Err(SlotError::NotFound),
            Err(_) => Err(SlotError::Storage),
        }
    }

    async fn set_str(&mut self, key: SlotKey, value: &[u8]) -> Result<(), SlotError> {
        let mut scratch = [0u8; SLOT_ENTRY_CAPACITY];
        let entry = terminate_value(value, &mut scratch)?;
        let staged = Vec::from_slice(entry).map_err(|_| SlotError::ValueTooLarge)?;
        self.staged = Some((key, staged));
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), SlotError> {
        let Some((key, entry)) = self.staged.take() else {
            return Ok(());
        };
        let mut data_buffer = [0u8; 2048];

        map::store_item(
            &mut self.flash,
            SLOT_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
            &entry.as_slice(),
        )
        .await
        .map_err(|_| SlotError::Storage)
    }

    async fn erase_all(&mut self) -> Result<(), SlotError> {
        // Erase the slot partition sector by sector
        let start = SLOT_PARTITION_START as u32;
        let end = FLASH_SIZE as u32;

        self.staged = None;
        self.flash
            .erase(start, end)
            .await
            .map_err(|_| SlotError::Flash)
    }
}
