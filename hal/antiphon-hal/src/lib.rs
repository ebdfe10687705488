//! Antiphon Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits consumed by the
//! link logic in `antiphon-core`. Chip-specific HALs implement them, and
//! the `mock` feature provides in-memory implementations so the link can
//! be exercised on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (antiphon-firmware)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  antiphon-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ antiphon-hal- │       │ mock (host    │
//! │    rp2040     │       │   testing)    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`serial::SerialRx`], [`serial::SerialTx`] - Serial communication
//! - [`slot::SlotStore`] - Persistent single-value storage
//! - [`time::TickClock`] - Monotonic tick source

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod serial;
pub mod slot;
pub mod time;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export key traits at crate root for convenience
pub use serial::{SerialRx, SerialTx};
pub use slot::{SlotError, SlotKey, SlotStore};
pub use time::TickClock;
