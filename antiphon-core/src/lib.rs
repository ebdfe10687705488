//! Board-agnostic core logic for the Antiphon echo firmware
//!
//! This crate contains all link behavior that does not depend on
//! specific hardware implementations:
//!
//! - Message buffer for captured serial runs
//! - State machine for the receive/echo cycle
//! - Receive and transmit link operations
//! - Throughput measurement
//!
//! Hardware enters only through the traits in `antiphon-hal`, so the
//! whole crate runs under the host test harness against the mock
//! implementations.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod link;
pub mod message;
pub mod state;
pub mod throughput;
