//! Tick source backed by the embassy time driver

use antiphon_hal::time::TickClock;
use embassy_time::{Instant, TICK_HZ};

/// Clock reading the embassy time driver's tick counter
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl TickClock for EmbassyClock {
    fn now_ticks(&self) -> u64 {
        Instant::now().as_ticks()
    }

    fn tick_hz(&self) -> u64 {
        TICK_HZ
    }
}
