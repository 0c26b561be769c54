use std::process::{Command, Stdio};
use std::thread;

use connect_logging::{connect_debug, connect_info};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenError {
    #[error("open command is empty")]
    EmptyCommand,
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("system opener failed for {url}: {source}")]
    System {
        url: String,
        source: std::io::Error,
    },
}

/// Opens a new window or view at a URL. Fire-and-forget from the provider's side.
pub trait WindowOpener: Send + Sync {
    fn open_new_window(&self, url: &str) -> Result<(), OpenError>;
}

/// The opener chosen from configuration: a custom command when one is set,
/// otherwise the system handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfiguredOpener {
    System(SystemWindowOpener),
    Command(CommandWindowOpener),
}

impl ConfiguredOpener {
    pub fn from_command(command: Vec<String>) -> Result<Self, OpenError> {
        if command.is_empty() {
            return Ok(Self::System(SystemWindowOpener::new()));
        }
        CommandWindowOpener::new(command).map(Self::Command)
    }
}

impl WindowOpener for ConfiguredOpener {
    fn open_new_window(&self, url: &str) -> Result<(), OpenError> {
        match self {
            Self::System(opener) => opener.open_new_window(url),
            Self::Command(opener) => opener.open_new_window(url),
        }
    }
}

/// Hands the URL to the desktop's registered handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemWindowOpener;

impl SystemWindowOpener {
    pub fn new() -> Self {
        Self
    }
}

impl WindowOpener for SystemWindowOpener {
    fn open_new_window(&self, url: &str) -> Result<(), OpenError> {
        open::that(url).map_err(|source| OpenError::System {
            url: url.to_string(),
            source,
        })?;
        connect_info!("Opened {} with the system handler", url);
        Ok(())
    }
}

/// Launches a configured program with the URL appended as its last argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandWindowOpener {
    program: String,
    args: Vec<String>,
}

impl CommandWindowOpener {
    pub fn new(command: Vec<String>) -> Result<Self, OpenError> {
        let mut parts = command.into_iter();
        let program = parts
            .next()
            .filter(|program| !program.trim().is_empty())
            .ok_or(OpenError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl WindowOpener for CommandWindowOpener {
    fn open_new_window(&self, url: &str) -> Result<(), OpenError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| OpenError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        connect_info!("Opened {} via {} {:?}", url, self.program, self.args);

        // Reap the launcher so it does not linger as a zombie; its exit status is not used.
        thread::spawn(move || {
            let status = child.wait();
            connect_debug!("open command exited: {:?}", status);
        });
        Ok(())
    }
}
