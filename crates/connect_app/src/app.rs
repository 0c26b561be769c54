use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context};
use clap::Parser;
use connect_core::{CandidateView, HostAction};
use connect_engine::{EngineHandle, History, RemoteConnectProvider, ReqwestProber, RonFileStore};
use connect_logging::{connect_info, connect_warn};

use crate::cli::{Cli, Command};
use crate::config::{load_config, AppConfig};
use crate::effects::EffectRunner;
use crate::{render, session};

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = match load_config(&cli.config) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    let config = config.with_overrides(&cli.overrides());
    connect_logging::initialize(&config.log_settings(cli.verbose));
    if let Some(err) = config_error {
        connect_warn!("{}; using defaults", err);
    }

    match cli.command {
        Command::Actions => {
            print!("{}", render::render_actions());
            Ok(())
        }
        Command::Run { action } => run_action(&config, resolve_action(&action)?),
        Command::History { json } => {
            let entries = history(&config).entries()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in entries {
                    println!("{entry}");
                }
            }
            Ok(())
        }
        Command::ClearHistory => run_action(&config, HostAction::ClearRemoteHistory),
        Command::Probe { query, json } => run_probe(&config, query, json),
        Command::Open { url } => run_open(&config, url),
        Command::Connect => run_action(&config, HostAction::ConnectToRemote),
    }
}

fn resolve_action(id: &str) -> anyhow::Result<HostAction> {
    HostAction::from_id(id).ok_or_else(|| {
        let known: Vec<_> = HostAction::ALL.iter().map(|action| action.id()).collect();
        anyhow!("unknown action {id:?}; expected one of {}", known.join(", "))
    })
}

fn run_action(config: &AppConfig, action: HostAction) -> anyhow::Result<()> {
    connect_info!("Running {}", action.id());
    match action {
        HostAction::ConnectToRemote => {
            let engine = EngineHandle::new(build_provider(config)?)
                .context("failed to start probe engine")?;
            session::run_session(EffectRunner::new(engine))?;
        }
        HostAction::ClearRemoteHistory => {
            history(config).clear()?;
            println!("Remote history cleared.");
        }
    }
    Ok(())
}

fn history(config: &AppConfig) -> History {
    History::new(Arc::new(RonFileStore::new(&config.history_file)))
}

fn build_provider(config: &AppConfig) -> anyhow::Result<RemoteConnectProvider> {
    let prober = ReqwestProber::new().context("failed to build HTTP client")?;
    let opener = config.opener()?;
    connect_info!(
        "Using history {:?}, probe timeout {}ms, opener {:?}",
        config.history_file,
        config.probe_timeout_ms,
        opener
    );
    Ok(RemoteConnectProvider::new(
        Arc::new(prober),
        history(config),
        Arc::new(opener),
        config.probe_settings(),
    ))
}

fn single_thread_runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}

fn run_probe(config: &AppConfig, query: String, json: bool) -> anyhow::Result<()> {
    let mut provider = build_provider(config)?;
    let runtime = single_thread_runtime()?;

    let printed = Mutex::new(Ok(()));
    let sink = |_query: &str, candidates: Vec<CandidateView>| {
        let result = print_candidates(&candidates, json);
        if let Ok(mut slot) = printed.lock() {
            *slot = result;
        }
    };
    runtime.block_on(async {
        provider.open_dialog();
        provider.enumerate(&query, &sink).await;
    });

    printed
        .into_inner()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn print_candidates(candidates: &[CandidateView], json: bool) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    if json {
        writeln!(out, "{}", render::candidates_json(candidates)?)?;
    } else {
        write!(out, "{}", render::render_list(candidates))?;
    }
    Ok(())
}

fn run_open(config: &AppConfig, url: String) -> anyhow::Result<()> {
    let provider = build_provider(config)?;
    let runtime = single_thread_runtime()?;
    runtime.block_on(async { provider.on_open(&url) });
    // Dropping the runtime waits for the background history write.
    drop(runtime);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn action_ids_resolve_to_host_actions() {
        assert_eq!(
            resolve_action("electron.remote.connect").unwrap(),
            HostAction::ConnectToRemote
        );
        assert_eq!(
            resolve_action("electron.remote.history.clear").unwrap(),
            HostAction::ClearRemoteHistory
        );
    }

    #[test]
    fn unknown_action_lists_the_known_ids() {
        let err = resolve_action("remote.connect").unwrap_err().to_string();
        assert!(err.contains("electron.remote.connect"));
        assert!(err.contains("electron.remote.history.clear"));
    }

    #[test]
    fn clear_action_empties_the_history_file() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig {
            history_file: temp.path().join("history.ron"),
            ..AppConfig::default()
        };
        history(&config).remember("http://foo").unwrap();

        run_action(&config, HostAction::ClearRemoteHistory).unwrap();

        assert!(history(&config).entries().unwrap().is_empty());
    }
}
