//! Transfer rate measurement

/// Byte count and duration of one transfer
///
/// Durations are raw clock ticks so the measuring code stays free of
/// timer specifics; convert with [`rate_bps`](TransferStats::rate_bps)
/// at the point of reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransferStats {
    /// Bytes moved
    pub bytes: usize,
    /// Ticks elapsed while moving them
    pub elapsed_ticks: u64,
}

impl TransferStats {
    /// Measured rate in bytes per second
    ///
    /// Returns `None` when the interval is too short for the clock to
    /// resolve, so a zero-tick measurement never divides by zero.
    pub fn rate_bps(&self, tick_hz: u64) -> Option<f32> {
        if self.elapsed_ticks == 0 {
            return None;
        }
        Some(self.bytes as f32 / self.elapsed_ticks as f32 * tick_hz as f32)
    }
}
