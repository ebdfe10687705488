//! Link transmit task
//!
//! Owns the transmit half of the link UART. Echoes each message the
//! receive task hands over, retires it from the slot, and signals the
//! cycle closed. At boot it first replays anything a previous run left
//! committed but unsent.

use defmt::*;
use embassy_time::Timer;

use antiphon_core::link::{Transmitter, SETTLE_DELAY_MS};
use antiphon_hal_rp2040::{EmbassyClock, Rp2040SerialTx};

use crate::channels::{SharedSlot, ECHO_CHANNEL, ECHO_DONE};

use super::report_rate;

/// Link TX task - echoes stored messages back to the sender
#[embassy_executor::task]
pub async fn link_tx_task(tx: Rp2040SerialTx, slot: &'static SharedSlot) {
    info!("Link TX task started");

    let mut transmitter = Transmitter::new(tx, EmbassyClock);

    // Power lost between commit and echo leaves a message in the slot;
    // send it out before the first receive of this run.
    {
        let mut slot = slot.lock().await;
        match transmitter.drain(&mut *slot).await {
            Ok(Some(stats)) => {
                info!("Replayed {} leftover bytes from the slot", stats.bytes);
                report_rate("TX", &stats);
            }
            Ok(None) => {}
            Err(e) => warn!("Boot drain failed: {:?}", e),
        }
    }

    loop {
        let message = ECHO_CHANNEL.receive().await;

        let outcome = {
            let mut slot = slot.lock().await;
            transmitter.echo(&message, &mut *slot).await
        };

        let ok = match outcome {
            Ok(stats) => {
                info!("Echoed {} bytes", stats.bytes);
                report_rate("TX", &stats);
                true
            }
            Err(e) => {
                warn!("Echo failed: {:?}", e);
                false
            }
        };

        // Settle before releasing the receive side into the next cycle
        Timer::after_millis(SETTLE_DELAY_MS).await;
        ECHO_DONE.signal(ok);
    }
}
