//! State machine for the receive/echo cycle
//!
//! Defines the authoritative runtime behavior of the link.
//! The state machine is explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::LinkEvent;
pub use machine::LinkState;
