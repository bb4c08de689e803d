//! Debug logging for typepad
//!
//! Level precedence: `--log-level` CLI flag, then `RUST_LOG`, then the
//! `log_level` config field.
//!
//! All output goes to /tmp/typepad_debug.log on Unix/macOS,
//! or %TEMP%\typepad_debug.log on Windows, so the interactive shell's
//! stdout stays clean. When `RUST_LOG` is set, records are mirrored to stderr.

use parking_lot::Mutex;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use typepad_config::LogLevel;

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl DebugLevel {
    fn from_level_filter(filter: log::LevelFilter) -> Self {
        match filter {
            log::LevelFilter::Off => DebugLevel::Off,
            log::LevelFilter::Error => DebugLevel::Error,
            log::LevelFilter::Warn => DebugLevel::Warn,
            log::LevelFilter::Info => DebugLevel::Info,
            log::LevelFilter::Debug => DebugLevel::Debug,
            log::LevelFilter::Trace => DebugLevel::Trace,
        }
    }

    fn from_log_level(level: log::Level) -> Self {
        Self::from_level_filter(level.to_level_filter())
    }

    fn label(self) -> &'static str {
        match self {
            DebugLevel::Off => "",
            DebugLevel::Error => "ERROR",
            DebugLevel::Warn => "WARN ",
            DebugLevel::Info => "INFO ",
            DebugLevel::Debug => "DEBUG",
            DebugLevel::Trace => "TRACE",
        }
    }
}

/// Location of the debug log file.
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    {
        PathBuf::from("/tmp/typepad_debug.log")
    }
    #[cfg(not(unix))]
    {
        std::env::temp_dir().join("typepad_debug.log")
    }
}

/// Global debug logger
struct DebugLogger {
    level: DebugLevel,
    file: Option<std::fs::File>,
    mirror_stderr: bool,
}

impl DebugLogger {
    fn new(level: DebugLevel, mirror_stderr: bool) -> Self {
        let file = if level != DebugLevel::Off {
            match OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .open(log_path())
            {
                Ok(f) => Some(f),
                // The shell keeps working without a log file
                Err(_) => None,
            }
        } else {
            None
        };

        let mut logger = DebugLogger {
            level,
            file,
            mirror_stderr,
        };
        if logger.file.is_some() {
            logger.write_raw(&format!(
                "\n{}\ntypepad debug session started at {} (level={:?})\n{}\n",
                "=".repeat(80),
                get_timestamp(),
                level,
                "=".repeat(80)
            ));
        }
        logger
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn log(&mut self, level: DebugLevel, category: &str, msg: &str) {
        if level == DebugLevel::Off || level > self.level {
            return;
        }
        let line = format!(
            "[{}] [{}] [{}] {}\n",
            get_timestamp(),
            level.label(),
            category,
            msg
        );
        if self.mirror_stderr {
            eprint!("{line}");
        }
        self.write_raw(&line);
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

fn get_logger() -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| Mutex::new(DebugLogger::new(DebugLevel::Off, false)))
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Check if debugging is enabled at given level
pub fn is_enabled(level: DebugLevel) -> bool {
    let logger = get_logger().lock();
    level != DebugLevel::Off && level <= logger.level
}

/// Log a message at specified level
pub fn log(level: DebugLevel, category: &str, msg: &str) {
    let mut logger = get_logger().lock();
    logger.log(level, category, msg);
}

/// Log formatted message
pub fn logf(level: DebugLevel, category: &str, args: fmt::Arguments) {
    if is_enabled(level) {
        log(level, category, &format!("{}", args));
    }
}

/// Routes `log` facade records into the debug log file.
struct LogBridge;

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        is_enabled(DebugLevel::from_log_level(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        let level = DebugLevel::from_log_level(record.level());
        if is_enabled(level) {
            log(level, record.target(), &record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static BRIDGE: LogBridge = LogBridge;

/// Resolve the effective level: CLI flag, then `RUST_LOG`, then config.
pub fn resolve_level(cli: Option<LogLevel>, config: LogLevel) -> log::LevelFilter {
    if let Some(level) = cli {
        return level.to_level_filter();
    }
    if let Ok(val) = std::env::var("RUST_LOG")
        && let Ok(level) = val.trim().parse::<LogLevel>()
    {
        return level.to_level_filter();
    }
    config.to_level_filter()
}

/// Initialize unified logging.
///
/// Routes all `log::info!()` etc. to the debug log file. Safe to call more
/// than once; only the first call installs the bridge.
pub fn init_log_bridge(filter: log::LevelFilter) {
    let mirror = std::env::var_os("RUST_LOG").is_some();
    let level = DebugLevel::from_level_filter(filter);

    if LOGGER
        .set(Mutex::new(DebugLogger::new(level, mirror)))
        .is_err()
    {
        return;
    }
    if log::set_logger(&BRIDGE).is_ok() {
        log::set_max_level(filter);
    }
}

// Convenience macros for logging
#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Error, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Info, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Trace, $category, format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_level_wins() {
        assert_eq!(
            resolve_level(Some(LogLevel::Trace), LogLevel::Error),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_level_ordering() {
        assert!(DebugLevel::Error < DebugLevel::Trace);
        assert_eq!(
            DebugLevel::from_level_filter(log::LevelFilter::Warn),
            DebugLevel::Warn
        );
    }
}
