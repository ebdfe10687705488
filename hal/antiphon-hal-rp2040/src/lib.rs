//! RP2040-specific HAL for the Antiphon echo firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `antiphon-hal` traits:
//!
//! - Buffered UART halves (implement `SerialRx` / `SerialTx`)
//! - Flash-backed persistent slot (implements `SlotStore`)
//! - Embassy time driver clock (implements `TickClock`)

#![no_std]

pub mod flash;
pub mod time;
pub mod uart;

pub use flash::Rp2040SlotStore;
pub use time::EmbassyClock;
pub use uart::{line_to_config, LineConfig, Rp2040SerialRx, Rp2040SerialTx};
