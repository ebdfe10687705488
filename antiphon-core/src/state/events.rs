//! Events that trigger link state transitions

/// Events that can trigger link state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// A message was captured and committed to the slot
    MessageStored,
    /// The transmit side confirmed the echo went out on the wire
    EchoConfirmed,
    /// Cycle bookkeeping finished, ready for the next message
    CycleComplete,
    /// Transport or storage fault interrupted the cycle
    Fault,
}
