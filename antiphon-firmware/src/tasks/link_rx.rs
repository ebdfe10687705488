//! Link receive task
//!
//! Perpetual owner of the receive half of the link UART. Waits for a
//! run of bytes, commits it to the slot, hands it to the transmit task,
//! and sits out the rest of the cycle.

use defmt::*;
use embassy_time::Timer;

use antiphon_core::link::{Receiver, IDLE_BACKOFF_MS};
use antiphon_core::state::{LinkEvent, LinkState};
use antiphon_hal_rp2040::{EmbassyClock, Rp2040SerialRx};

use crate::channels::{SharedSlot, ECHO_CHANNEL, ECHO_DONE};

use super::report_rate;

/// Step the cycle state machine, logging the transition
fn advance(state: LinkState, event: LinkEvent) -> LinkState {
    let next = state.transition(event);
    debug!("Link state {:?} -> {:?} on {:?}", state, next, event);
    next
}

/// Link RX task - captures serial runs and drives the cycle state
#[embassy_executor::task]
pub async fn link_rx_task(rx: Rp2040SerialRx, slot: &'static SharedSlot) {
    info!("Link RX task started");

    let mut receiver = Receiver::new(rx, EmbassyClock);
    let mut state = LinkState::Idle;

    loop {
        trace!("WAITING FOR DATA");

        let outcome = {
            let mut slot = slot.lock().await;
            receiver.poll(&mut *slot).await
        };

        state = match outcome {
            Ok(Some(reception)) => {
                info!("Received {} bytes", reception.message.len());
                report_rate("RX", &reception.stats);
                let received = advance(state, LinkEvent::MessageStored);

                // The message is durable by now; the next receive waits
                // until the echo side confirms the cycle is over.
                ECHO_CHANNEL.send(reception.message).await;

                if ECHO_DONE.wait().await {
                    let sent = advance(received, LinkEvent::EchoConfirmed);
                    advance(sent, LinkEvent::CycleComplete)
                } else {
                    advance(received, LinkEvent::Fault)
                }
            }
            Ok(None) => {
                // Quiet line; back off instead of spinning on the timeout
                Timer::after_millis(IDLE_BACKOFF_MS).await;
                state
            }
            Err(e) => {
                warn!("Receive cycle failed: {:?}", e);
                advance(state, LinkEvent::Fault)
            }
        };
    }
}
