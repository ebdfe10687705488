//! Monotonic time abstractions

/// Monotonic tick source
///
/// Provides the raw tick counter used for throughput measurement and
/// receive timeouts. Ticks are monotonic and never reset while the
/// device is running.
pub trait TickClock {
    /// Current tick count
    fn now_ticks(&self) -> u64;

    /// Tick frequency in Hz
    fn tick_hz(&self) -> u64;
}

impl<T: TickClock> TickClock for &T {
    fn now_ticks(&self) -> u64 {
        (**self).now_ticks()
    }

    fn tick_hz(&self) -> u64 {
        (**self).tick_hz()
    }
}

/// Convert a millisecond duration to ticks at the given frequency
pub fn ms_to_ticks(ms: u64, tick_hz: u64) -> u64 {
    ms * tick_hz / 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ms_to_ticks_scaling() {
        assert_eq!(ms_to_ticks(1000, 1_000_000), 1_000_000);
        assert_eq!(ms_to_ticks(50, 1_000_000), 50_000);
        assert_eq!(ms_to_ticks(1000, 32_768), 32_768);
        assert_eq!(ms_to_ticks(0, 1_000_000), 0);
    }
}
