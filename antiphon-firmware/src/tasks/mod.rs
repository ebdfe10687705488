//! Embassy async tasks
//!
//! The two halves of the echo link run as independent tasks and
//! communicate via the channels module.

pub mod link_rx;
pub mod link_tx;

pub use link_rx::link_rx_task;
pub use link_tx::link_tx_task;

use defmt::*;
use embassy_time::TICK_HZ;

use antiphon_core::throughput::TransferStats;

/// Log a transfer rate
///
/// A transfer too quick for the clock to resolve has no defined rate
/// and is logged as such rather than as infinity.
pub(crate) fn report_rate(direction: &str, stats: &TransferStats) {
    match stats.rate_bps(TICK_HZ) {
        Some(rate) => info!("{=str} speed: {=f32} B/s", direction, rate),
        None => info!(
            "{=str} speed unavailable: {=usize} bytes in under one tick",
            direction, stats.bytes
        ),
    }
}
