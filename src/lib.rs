//! Logging and timing utilities for staged processing runs
//!
//! Two independent building blocks shared by processing scripts:
//! - [`Logger`]: leveled logging to stderr with an optional mirrored log
//!   file, section banners, and BEGIN/END function tracing via
//!   [`log_function!`];
//! - [`Timer`]: a scope guard that reports how long the scope took and
//!   can drive a progress bar while it runs.
//!
//! ```
//! use stagelog::{default_logger, Timer};
//!
//! let logger = default_logger();
//! logger.section("import phase");
//!
//! {
//!     let timer = Timer::with_total("importing", 3).with_logger(logger);
//!     for _ in 0..3 {
//!         timer.update(1);
//!     }
//! } // logs "importing took 0.00 seconds." at INFO
//! ```

pub mod error;
pub mod logging;
pub mod timer;

pub use error::{LogError, ParseLevelError, Result};
pub use logging::{default_logger, traced, traced_with, Level, Logger};
pub use timer::Timer;
