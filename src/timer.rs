//! Scope timing with optional progress reporting
//!
//! [`Timer`] measures the wall-clock duration of the scope that owns it
//! and reports it when the scope ends, on every exit path including
//! panic unwind. With a step total it also drives an indicatif progress
//! bar for the duration of the scope.
//!
//! ```
//! use stagelog::Timer;
//!
//! let timer = Timer::with_total("processing tracks", 3);
//! for _ in 0..3 {
//!     timer.update(1);
//! }
//! // "processing tracks took 0.00 seconds." printed when `timer` drops.
//! ```

use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

use crate::logging::Logger;

/// Guard that times the scope it lives in.
///
/// Timing starts at construction. When the guard drops it finishes the
/// progress bar (if any) and emits `"<name> took <secs> seconds."` at
/// `Info` on the configured logger, or to stdout when none was given.
/// Drop also runs while unwinding, so the report is emitted and the bar
/// closed even when the guarded scope panics; the panic keeps
/// propagating unchanged.
pub struct Timer<'a> {
    name: String,
    logger: Option<&'a Logger>,
    progress: Option<ProgressBar>,
    start: Instant,
}

impl<'a> Timer<'a> {
    /// Start timing, with no progress bar.
    pub fn new(name: impl Into<String>) -> Self {
        Timer {
            name: name.into(),
            logger: None,
            progress: None,
            start: Instant::now(),
        }
    }

    /// Start timing and show a progress bar sized to `total` steps,
    /// labelled with `name`.
    pub fn with_total(name: impl Into<String>, total: u64) -> Self {
        let name = name.into();
        let progress = create_step_progress(total, &name);
        Timer {
            name,
            logger: None,
            progress: Some(progress),
            start: Instant::now(),
        }
    }

    /// Route the final report through `logger` instead of stdout.
    pub fn with_logger(mut self, logger: &'a Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Advance the progress bar by `n` steps. No-op without a bar.
    pub fn update(&self, n: u64) {
        if let Some(bar) = &self.progress {
            bar.inc(n);
        }
    }

    /// Time elapsed since construction.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Handle to the progress bar, for restyling or hiding it.
    pub fn progress_bar(&self) -> Option<&ProgressBar> {
        self.progress.as_ref()
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        if let Some(bar) = self.progress.take() {
            bar.finish();
        }
        let report = format!("{} took {:.2} seconds.", self.name, elapsed.as_secs_f64());
        match self.logger {
            Some(logger) => logger.info(&report),
            None => println!("{}", report),
        }
    }
}

fn create_step_progress(total: u64, name: &str) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
            .expect("valid progress template")
            .progress_chars("#>-"),
    );
    bar.set_message(name.to_string());
    bar
}
