//! Phase timing through the `log` facade.

use std::time::Instant;

/// RAII timer that logs elapsed time on drop.
///
/// ```ignore
/// let _t = Timed::debug("kd-tree build");
/// // ... work ...
/// // logs "kd-tree build: 1.234ms" when _t is dropped
/// ```
#[derive(Debug)]
pub(crate) struct Timed {
    name: &'static str,
    start: Instant,
    level: log::Level,
}

impl Timed {
    /// Logs at INFO level on drop.
    pub(crate) fn info(name: &'static str) -> Self {
        log::debug!("{name}...");
        Self {
            name,
            start: Instant::now(),
            level: log::Level::Info,
        }
    }

    /// Logs at DEBUG level on drop.
    pub(crate) fn debug(name: &'static str) -> Self {
        log::trace!("{name}...");
        Self {
            name,
            start: Instant::now(),
            level: log::Level::Debug,
        }
    }
}

impl Drop for Timed {
    fn drop(&mut self) {
        log::log!(self.level, "{}: {:.3?}", self.name, self.start.elapsed());
    }
}
