//! Import progress reporting.

/// Trait for receiving import progress updates.
pub trait ImportProgress {
    /// Called after each data row is processed, whether it succeeded or not.
    fn on_row(&self, current: usize, total: usize);

    /// Called when a phase starts (e.g., "Importing 120 video rows").
    fn on_phase(&self, message: &str);

    /// Called when the batch is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_row(&self, _current: usize, _total: usize) {}
    fn on_phase(&self, _message: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_row(&self, current: usize, total: usize) {
        if current % 100 == 0 || current == total {
            log::info!("  [{}/{}] rows", current, total);
        }
    }

    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
