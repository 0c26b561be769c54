use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use connect_logging::LogDestination;

use crate::config::{ConfigOverrides, DEFAULT_CONFIG_FILE};

#[derive(Debug, Parser)]
#[command(
    name = "remote-connect",
    version,
    about = "Connect to remote hosts with reachability hints and a remembered history"
)]
pub struct Cli {
    /// RON configuration file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Per-probe timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// File holding the remembered endpoints.
    #[arg(long, global = true)]
    pub history_file: Option<PathBuf>,

    /// Where log output goes.
    #[arg(long, global = true, value_enum)]
    pub log: Option<LogArg>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive quick-open: type a host per line, `:open N` to connect.
    Connect,
    /// Run one lookup for QUERY and print the ranked candidates.
    Probe {
        #[arg(default_value = "")]
        query: String,
        #[arg(long)]
        json: bool,
    },
    /// Print remembered endpoints.
    History {
        #[arg(long)]
        json: bool,
    },
    /// Forget every remembered endpoint.
    ClearHistory,
    /// Open URL in a new window and remember it.
    Open { url: String },
    /// List the actions this tool contributes to a host shell.
    Actions,
    /// Invoke a host action by its id, as a host shell keybinding would.
    Run { action: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogArg {
    Terminal,
    File,
    Both,
    Off,
}

impl From<LogArg> for LogDestination {
    fn from(value: LogArg) -> Self {
        match value {
            LogArg::Terminal => LogDestination::Terminal,
            LogArg::File => LogDestination::File,
            LogArg::Both => LogDestination::Both,
            LogArg::Off => LogDestination::Off,
        }
    }
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            probe_timeout_ms: self.timeout_ms,
            history_file: self.history_file.clone(),
            log: self.log.map(LogDestination::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_apply_after_subcommand() {
        let cli = Cli::parse_from([
            "remote-connect",
            "probe",
            "example.com",
            "--timeout-ms",
            "200",
            "--log",
            "off",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.probe_timeout_ms, Some(200));
        assert_eq!(overrides.log, Some(LogDestination::Off));
        assert!(matches!(
            cli.command,
            Command::Probe { ref query, json: false } if query == "example.com"
        ));
    }

    #[test]
    fn run_takes_an_action_id() {
        let cli = Cli::parse_from(["remote-connect", "run", "electron.remote.history.clear"]);
        assert!(matches!(
            cli.command,
            Command::Run { ref action } if action == "electron.remote.history.clear"
        ));
    }

    #[test]
    fn probe_query_defaults_to_empty() {
        let cli = Cli::parse_from(["remote-connect", "probe", "--json"]);
        assert!(matches!(
            cli.command,
            Command::Probe { ref query, json: true } if query.is_empty()
        ));
    }
}
