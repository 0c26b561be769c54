use std::io;
use std::sync::mpsc;
use std::thread;

use connect_core::{CandidateView, QuerySeq, SessionId};
use connect_logging::{connect_debug, connect_trace, connect_warn};
use tokio::sync::mpsc as async_mpsc;

use crate::provider::{CandidateSink, RemoteConnectProvider};
use crate::EngineEvent;

enum EngineCommand {
    OpenDialog { session: SessionId },
    Enumerate {
        session: SessionId,
        seq: QuerySeq,
        query: String,
    },
    Open { url: String },
    ClearHistory,
    CloseDialog,
}

/// Runs a provider on a single-threaded tokio runtime in a background thread.
///
/// Commands are fire-and-forget; results come back as [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: async_mpsc::UnboundedSender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    worker: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    pub fn new(provider: RemoteConnectProvider) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = async_mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let worker = thread::Builder::new()
            .name("connect-engine".to_string())
            .spawn(move || {
                runtime.block_on(run_loop(provider, cmd_rx, event_tx));
            })?;

        Ok(Self {
            cmd_tx,
            event_rx,
            worker: Some(worker),
        })
    }

    pub fn open_dialog(&self, session: SessionId) {
        self.send(EngineCommand::OpenDialog { session });
    }

    pub fn enumerate(&self, session: SessionId, seq: QuerySeq, query: impl Into<String>) {
        self.send(EngineCommand::Enumerate {
            session,
            seq,
            query: query.into(),
        });
    }

    pub fn open(&self, url: impl Into<String>) {
        self.send(EngineCommand::Open { url: url.into() });
    }

    pub fn clear_history(&self) {
        self.send(EngineCommand::ClearHistory);
    }

    pub fn close_dialog(&self) {
        self.send(EngineCommand::CloseDialog);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Stops accepting commands and waits for queued work, including pending
    /// history writes, to finish.
    pub fn shutdown(mut self) {
        self.join_worker();
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            connect_warn!("Engine worker is gone; command dropped");
        }
    }

    fn join_worker(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        // Closing the channel ends the command loop.
        let (closed_tx, _) = async_mpsc::unbounded_channel();
        drop(std::mem::replace(&mut self.cmd_tx, closed_tx));
        if worker.join().is_err() {
            connect_warn!("Engine worker panicked");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.join_worker();
    }
}

struct ChannelCandidateSink {
    session: SessionId,
    seq: QuerySeq,
    tx: mpsc::Sender<EngineEvent>,
}

impl CandidateSink for ChannelCandidateSink {
    fn deliver(&self, _query: &str, candidates: Vec<CandidateView>) {
        let _ = self.tx.send(EngineEvent::Candidates {
            session: self.session,
            seq: self.seq,
            candidates,
        });
    }
}

async fn run_loop(
    mut provider: RemoteConnectProvider,
    mut cmd_rx: async_mpsc::UnboundedReceiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let mut current: Option<SessionId> = None;

    while let Some(command) = cmd_rx.recv().await {
        match command {
            EngineCommand::OpenDialog { session } => {
                provider.open_dialog();
                current = Some(session);
                let provider = provider.clone();
                let event_tx = event_tx.clone();
                tokio::spawn(async move {
                    let results = provider.history_results().await;
                    let _ = event_tx.send(EngineEvent::HistoryCacheReady {
                        session,
                        count: results.len(),
                    });
                });
            }
            EngineCommand::Enumerate {
                session,
                seq,
                query,
            } => {
                if current != Some(session) {
                    connect_trace!("Skipping enumerate for closed session {}", session);
                    continue;
                }
                let provider = provider.clone();
                let sink = ChannelCandidateSink {
                    session,
                    seq,
                    tx: event_tx.clone(),
                };
                tokio::spawn(async move {
                    provider.enumerate(&query, &sink).await;
                });
            }
            EngineCommand::Open { url } => {
                provider.on_open(&url);
            }
            EngineCommand::ClearHistory => {
                let result = provider.clear_history().map_err(|err| err.to_string());
                let _ = event_tx.send(EngineEvent::HistoryCleared { result });
            }
            EngineCommand::CloseDialog => {
                connect_debug!("Closing dialog session {:?}", current);
                provider.close_dialog();
                current = None;
            }
        }
    }
}
