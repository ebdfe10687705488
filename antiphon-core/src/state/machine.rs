//! Link state machine definition
//!
//! The receive loop's behavior is a function of the current state and
//! an event. Every cycle walks Idle -> Received -> Sent -> Idle; faults
//! short-circuit back to Idle so the link keeps listening.

use super::events::LinkEvent;

/// Link states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// Waiting for serial data
    Idle,
    /// Message committed to the slot, echo outstanding
    Received,
    /// Echo confirmed on the wire, cycle wrapping up
    Sent,
}

impl LinkState {
    /// Process an event and return the next state
    ///
    /// This is the core state transition logic.
    pub fn transition(self, event: LinkEvent) -> Self {
        use LinkEvent::*;
        use LinkState::*;

        match (self, event) {
            // The one productive cycle
            (Idle, MessageStored) => Received,
            (Received, EchoConfirmed) => Sent,
            (Sent, CycleComplete) => Idle,

            // A fault anywhere abandons the cycle and resumes listening
            (_, Fault) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}
