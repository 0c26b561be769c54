//! RON configuration for the `remote-connect` binary.
//!
//! A missing file means defaults. Command-line flags override file values.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use connect_engine::{ConfiguredOpener, OpenError, ProbeSettings, DEFAULT_PROBE_TIMEOUT};
use connect_logging::{LogDestination, LogSettings, DEFAULT_LOG_FILE};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "./remote_connect.ron";
pub const DEFAULT_HISTORY_FILE: &str = "./remote_connect_history.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub probe_timeout_ms: u64,
    pub history_file: PathBuf,
    /// Program and leading arguments; the URL is appended. Empty means the system handler.
    pub open_command: Vec<String>,
    pub log: LogDestination,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT.as_millis() as u64,
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            open_command: Vec::new(),
            log: LogDestination::Terminal,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

/// Overrides taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub probe_timeout_ms: Option<u64>,
    pub history_file: Option<PathBuf>,
    pub log: Option<LogDestination>,
}

impl AppConfig {
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(timeout) = overrides.probe_timeout_ms {
            self.probe_timeout_ms = timeout;
        }
        if let Some(path) = &overrides.history_file {
            self.history_file = path.clone();
        }
        if let Some(log) = overrides.log {
            self.log = log;
        }
        self
    }

    pub fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            timeout: Duration::from_millis(self.probe_timeout_ms.max(1)),
        }
    }

    pub fn opener(&self) -> Result<ConfiguredOpener, OpenError> {
        ConfiguredOpener::from_command(self.open_command.clone())
    }

    pub fn log_settings(&self, verbosity: u8) -> LogSettings {
        let level = match verbosity {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        LogSettings {
            destination: self.log,
            level,
            file: self.log_file.clone(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.probe_settings().timeout, Duration::from_millis(500));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("remote_connect.ron");
        fs::write(
            &path,
            r#"(probe_timeout_ms: 250, open_command: ["firefox", "--new-window"])"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.probe_timeout_ms, 250);
        assert!(matches!(config.opener(), Ok(ConfiguredOpener::Command(_))));
        assert_eq!(config.history_file, PathBuf::from(DEFAULT_HISTORY_FILE));
        assert_eq!(config.log, LogDestination::Terminal);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("remote_connect.ron");
        fs::write(&path, "(probe_timeout_ms: \"soon\")").unwrap();

        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let config = AppConfig::default().with_overrides(&ConfigOverrides {
            probe_timeout_ms: Some(900),
            history_file: Some(PathBuf::from("/tmp/h.ron")),
            log: Some(LogDestination::Off),
        });

        assert_eq!(config.probe_timeout_ms, 900);
        assert_eq!(config.history_file, PathBuf::from("/tmp/h.ron"));
        assert_eq!(config.log_settings(2).destination, LogDestination::Off);
        assert_eq!(config.log_settings(2).level, LevelFilter::Trace);
    }

    #[test]
    fn empty_open_command_uses_the_system_handler() {
        assert!(matches!(
            AppConfig::default().opener(),
            Ok(ConfiguredOpener::System(_))
        ));
    }

    #[test]
    fn blank_open_command_is_rejected() {
        let config = AppConfig {
            open_command: vec![" ".to_string()],
            ..AppConfig::default()
        };
        assert!(matches!(config.opener(), Err(OpenError::EmptyCommand)));
    }
}
