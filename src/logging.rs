//! Leveled logging with an optional mirrored log file
//!
//! [`Logger`] writes timestamped, level-tagged lines to stderr and,
//! when a log file is attached, mirrors the same lines to that file.
//! Attaching a file truncates it, so each run starts with a fresh log.
//! A process-wide default instance is available through
//! [`default_logger`]; independent instances can be constructed where a
//! script needs separate settings.
//!
//! The [`traced`] / [`traced_with`] helpers and the [`log_function!`]
//! macro bracket a function call with debug-level BEGIN/END messages.
//!
//! ```
//! use stagelog::{Level, Logger};
//!
//! let logger = Logger::with_level(Level::Debug);
//! logger.info("scanning library");
//! logger.section("download phase");
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, OnceLock};

use chrono::Local;

use crate::error::{LogError, ParseLevelError, Result};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Separator emitted above and below a [`Logger::section`] message.
const SECTION_SEPARATOR: &str = "========================================";

/// Message severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    /// Upper-case name as it appears in emitted lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Parse a level name, falling back to `Info` for unknown names.
    ///
    /// This is the behavior [`Logger::configure`] uses; callers that want
    /// strict validation should go through [`FromStr`] instead.
    pub fn parse_lossy(name: &str) -> Level {
        name.parse().unwrap_or(Level::Info)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARNING" => Ok(Level::Warning),
            "ERROR" => Ok(Level::Error),
            "CRITICAL" => Ok(Level::Critical),
            _ => Err(ParseLevelError {
                name: s.to_string(),
            }),
        }
    }
}

/// Mutable logger state. Kept behind one mutex so a line is formatted and
/// written while the lock is held, keeping output line-atomic when a
/// logger is shared across threads.
struct Sinks {
    level: Level,
    log_file: Option<PathBuf>,
    file: Option<File>,
}

/// Leveled logger with a console sink and at most one file sink.
///
/// All methods take `&self`; the logger can be shared freely. Log calls
/// are best-effort and never fail, only sink management returns errors.
pub struct Logger {
    sinks: Mutex<Sinks>,
}

impl Logger {
    /// New logger at `Info` with no file sink.
    pub fn new() -> Self {
        Self::with_level(Level::Info)
    }

    /// New logger at the given level with no file sink.
    pub fn with_level(level: Level) -> Self {
        Logger {
            sinks: Mutex::new(Sinks {
                level,
                log_file: None,
                file: None,
            }),
        }
    }

    /// Set the minimum severity and the log file in one call.
    ///
    /// Unknown level names fall back to `Info` (see [`Level::parse_lossy`]).
    /// With `Some(path)` the file is truncated and attached as the sole
    /// file sink, replacing any previous one; with `None` any existing
    /// file sink is removed. The level change is applied before the sink
    /// is touched, so a failed attach still leaves the console sink at
    /// the requested level.
    pub fn configure(&self, level: &str, log_file: Option<&Path>) -> Result<()> {
        self.set_level(Level::parse_lossy(level));
        match log_file {
            Some(path) => self.attach_log_file(path),
            None => {
                self.detach_log_file();
                Ok(())
            }
        }
    }

    /// Set the minimum severity for all sinks.
    pub fn set_level(&self, level: Level) {
        self.lock().level = level;
    }

    /// Current minimum severity.
    pub fn level(&self) -> Level {
        self.lock().level
    }

    /// Truncate `path` and attach it as the sole file sink.
    ///
    /// Any previously attached file is replaced and its handle closed.
    pub fn attach_log_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let file = File::create(&path).map_err(|source| LogError::SinkUnavailable {
            path: path.clone(),
            source,
        })?;
        let mut sinks = self.lock();
        sinks.file = Some(file);
        sinks.log_file = Some(path);
        Ok(())
    }

    /// Remove the file sink, closing its handle. No-op when none is attached.
    pub fn detach_log_file(&self) {
        let mut sinks = self.lock();
        sinks.file = None;
        sinks.log_file = None;
    }

    /// Path of the attached log file, if any.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.lock().log_file.clone()
    }

    /// Emit `msg` at `level` to every sink whose threshold admits it.
    pub fn log(&self, level: Level, msg: &str) {
        let mut sinks = self.lock();
        if level < sinks.level {
            return;
        }
        let line = format!(
            "{} - {} - {}",
            Local::now().format(TIMESTAMP_FORMAT),
            level,
            msg
        );
        // Best-effort: a log call never fails.
        let _ = writeln!(io::stderr(), "{}", line);
        if let Some(file) = sinks.file.as_mut() {
            let _ = writeln!(file, "{}", line);
        }
    }

    pub fn debug(&self, msg: &str) {
        self.log(Level::Debug, msg);
    }

    pub fn info(&self, msg: &str) {
        self.log(Level::Info, msg);
    }

    pub fn warning(&self, msg: &str) {
        self.log(Level::Warning, msg);
    }

    pub fn error(&self, msg: &str) {
        self.log(Level::Error, msg);
    }

    pub fn critical(&self, msg: &str) {
        self.log(Level::Critical, msg);
    }

    /// Emit `msg` at `Info`, framed by 40-`=` separator lines.
    ///
    /// Used to delineate processing stages in console and file output.
    pub fn section(&self, msg: &str) {
        self.log(
            Level::Info,
            &format!("\n{}\n{}\n{}", SECTION_SEPARATOR, msg, SECTION_SEPARATOR),
        );
    }

    fn lock(&self) -> MutexGuard<'_, Sinks> {
        // A poisoned lock still holds usable sinks.
        self.sinks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Process-wide default logger, lazily initialized at `Info` with no
/// file sink. Callers hold the returned handle explicitly; there is no
/// other ambient state.
pub fn default_logger() -> &'static Logger {
    DEFAULT_LOGGER.get_or_init(Logger::new)
}

/// Run `f`, bracketing it with `"<name> BEGIN"` / `"<name> END"` debug
/// messages on the default logger. Returns `f`'s value unchanged.
pub fn traced<T>(name: &str, f: impl FnOnce() -> T) -> T {
    traced_with(default_logger(), name, f)
}

/// [`traced`] with an explicit logger.
///
/// A panic inside `f` propagates immediately and skips the END message;
/// it is only emitted after a normal return. Returning `Err` is a normal
/// return and does log END.
pub fn traced_with<T>(logger: &Logger, name: &str, f: impl FnOnce() -> T) -> T {
    logger.debug(&format!("{} BEGIN", name));
    let result = f();
    logger.debug(&format!("{} END", name));
    result
}

/// Call a function with BEGIN/END trace logging around it.
///
/// The traced name is the function qualified with [`module_path!`], the
/// way a stack trace would show it. Two shapes are supported: the bare
/// form uses the default logger, the `logger:` form an explicit one.
///
/// ```
/// fn add(a: i32, b: i32) -> i32 {
///     a + b
/// }
///
/// let sum = stagelog::log_function!(add(2, 3));
/// assert_eq!(sum, 5);
/// ```
#[macro_export]
macro_rules! log_function {
    (logger: $logger:expr, $func:ident ( $($arg:expr),* $(,)? )) => {
        $crate::logging::traced_with(
            $logger,
            concat!(module_path!(), "::", stringify!($func)),
            || $func($($arg),*),
        )
    };
    ($func:ident ( $($arg:expr),* $(,)? )) => {
        $crate::logging::traced(
            concat!(module_path!(), "::", stringify!($func)),
            || $func($($arg),*),
        )
    };
}
