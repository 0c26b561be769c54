#![deny(missing_docs)]
//! Shared logging utilities for the remote connect workspace.
//!
//! This crate provides the `connect_*` logging macros used across the codebase,
//! the process-wide logger setup used by the binary, and a minimal test
//! initializer for the global logger.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

#[doc(hidden)]
pub use log as __log;

/// Default log file, relative to the current working directory.
pub const DEFAULT_LOG_FILE: &str = "./remote_connect.log";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! connect_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! connect_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! connect_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! connect_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! connect_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!($($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogDestination {
    /// Write to the terminal (stderr for warnings and errors).
    #[default]
    Terminal,
    /// Write to the log file only.
    File,
    /// Write to both the terminal and the log file.
    Both,
    /// Do not install a logger.
    Off,
}

/// Logger settings used by [`initialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Where log records go.
    pub destination: LogDestination,
    /// Maximum level that is recorded.
    pub level: LevelFilter,
    /// File used by [`LogDestination::File`] and [`LogDestination::Both`].
    pub file: PathBuf,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            destination: LogDestination::Terminal,
            level: LevelFilter::Info,
            file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

/// Installs the global logger described by `settings`.
///
/// Returns the number of installed sinks. A file that cannot be created is
/// reported on stderr and skipped, so `Both` degrades to terminal-only.
pub fn initialize(settings: &LogSettings) -> usize {
    let config = build_config();
    let level = settings.level;

    let loggers: Vec<Box<dyn SharedLogger>> = match settings.destination {
        LogDestination::Off => return 0,
        LogDestination::Terminal => vec![terminal_logger(level, config)],
        LogDestination::File => create_file_logger(level, config, &settings.file)
            .into_iter()
            .map(|logger| logger as Box<dyn SharedLogger>)
            .collect(),
        LogDestination::Both => {
            let mut loggers = vec![terminal_logger(level, config.clone())];
            if let Some(file_logger) = create_file_logger(level, config, &settings.file) {
                loggers.push(file_logger);
            }
            loggers
        }
    };

    let count = loggers.len();
    if count == 0 {
        return 0;
    }
    // Another logger may already be installed (tests, embedding hosts).
    match CombinedLogger::init(loggers) {
        Ok(()) => count,
        Err(_) => 0,
    }
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn terminal_logger(level: LevelFilter, config: Config) -> Box<dyn SharedLogger> {
    TermLogger::new(level, config, TerminalMode::Mixed, ColorChoice::Auto)
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    path: &Path,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_installs_nothing() {
        let settings = LogSettings {
            destination: LogDestination::Off,
            ..LogSettings::default()
        };
        assert_eq!(initialize(&settings), 0);
    }

    #[test]
    fn unwritable_log_file_is_skipped() {
        let temp = tempfile::TempDir::new().unwrap();
        let settings = LogSettings {
            destination: LogDestination::File,
            level: LevelFilter::Info,
            file: temp.path().join("missing").join("remote_connect.log"),
        };
        assert_eq!(initialize(&settings), 0);
    }

    #[test]
    fn destination_parses_from_ron() {
        let parsed: LogDestination = ron::from_str("Both").unwrap();
        assert_eq!(parsed, LogDestination::Both);
    }
}
