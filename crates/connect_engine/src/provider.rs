use std::sync::Arc;

use connect_core::{
    autocomplete_candidates, merge_and_rank, render_candidates, CandidateView, ProbeResult,
    SessionPhase,
};
use connect_logging::{connect_debug, connect_info, connect_warn};
use futures_util::future::{BoxFuture, FutureExt, Shared};

use crate::probe::probe_batch;
use crate::{History, ProbeSettings, Prober, StoreError, WindowOpener};

type HistoryCache = Shared<BoxFuture<'static, Arc<Vec<ProbeResult>>>>;

/// Receives the ranked candidates of one enumerate pass.
pub trait CandidateSink: Send + Sync {
    fn deliver(&self, query: &str, candidates: Vec<CandidateView>);
}

impl<F> CandidateSink for F
where
    F: Fn(&str, Vec<CandidateView>) + Send + Sync,
{
    fn deliver(&self, query: &str, candidates: Vec<CandidateView>) {
        self(query, candidates)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Handled,
}

/// Quick-open data source for remote endpoints.
///
/// Cloning is cheap and shares the collaborators and the current history
/// cache, so a clone can be moved into a task for one enumerate pass.
#[derive(Clone)]
pub struct RemoteConnectProvider {
    prober: Arc<dyn Prober>,
    history: History,
    opener: Arc<dyn WindowOpener>,
    settings: ProbeSettings,
    cache: Option<HistoryCache>,
}

impl RemoteConnectProvider {
    pub fn new(
        prober: Arc<dyn Prober>,
        history: History,
        opener: Arc<dyn WindowOpener>,
        settings: ProbeSettings,
    ) -> Self {
        Self {
            prober,
            history,
            opener,
            settings,
            cache: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match &self.cache {
            None => SessionPhase::Idle,
            Some(cache) if cache.peek().is_some() => SessionPhase::Ready,
            Some(_) => SessionPhase::ComputingHistoryCache,
        }
    }

    /// Starts a dialog session: reads history and begins probing every entry.
    ///
    /// The probe batch is spawned right away when a tokio runtime is
    /// available; otherwise it runs on the first enumerate pass. Returns the
    /// number of remembered endpoints.
    pub fn open_dialog(&mut self) -> usize {
        let entries = match self.history.entries() {
            Ok(entries) => entries,
            Err(err) => {
                connect_warn!("Failed to read remote history: {}", err);
                Vec::new()
            }
        };
        let count = entries.len();
        connect_debug!("Probing {} remembered endpoints", count);

        let prober = self.prober.clone();
        let timeout = self.settings.timeout;
        let cache = async move { Arc::new(probe_batch(prober, entries, timeout).await) }
            .boxed()
            .shared();
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            runtime.spawn(cache.clone());
        }
        self.cache = Some(cache);
        count
    }

    /// Ends the session. Outstanding probes are not cancelled; their results
    /// are simply never read.
    pub fn close_dialog(&mut self) {
        self.cache = None;
    }

    /// Probe results of the current session's history, empty when no dialog is open.
    pub async fn history_results(&self) -> Arc<Vec<ProbeResult>> {
        match &self.cache {
            Some(cache) => cache.clone().await,
            None => Arc::new(Vec::new()),
        }
    }

    /// One enumerate pass: autocomplete, probe, merge with history, rank, render.
    pub async fn candidates(&self, query: &str) -> Vec<CandidateView> {
        let typed = autocomplete_candidates(query);
        let typed_results = probe_batch(self.prober.clone(), typed, self.settings.timeout).await;
        let history = self.history_results().await;
        let ranked = merge_and_rank(typed_results, &history);
        render_candidates(&ranked)
    }

    pub async fn enumerate(&self, query: &str, sink: &dyn CandidateSink) {
        let candidates = self.candidates(query).await;
        connect_debug!("Delivering {} candidates for {:?}", candidates.len(), query);
        sink.deliver(query, candidates);
    }

    /// Opens `url` in a new window and remembers it in the background.
    ///
    /// Always `Handled`: opener failures and lost history writes are logged,
    /// not surfaced.
    pub fn on_open(&self, url: &str) -> OpenOutcome {
        if let Err(err) = self.opener.open_new_window(url) {
            connect_warn!("Failed to open {}: {}", url, err);
        }

        let history = self.history.clone();
        let url = url.to_string();
        let remember = move || {
            if let Err(err) = history.remember(&url) {
                connect_warn!("Failed to remember {}: {}", url, err);
            }
        };
        // Result intentionally ignored: persistence here is best-effort.
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn_blocking(remember);
            }
            Err(_) => {
                std::thread::spawn(remember);
            }
        }
        OpenOutcome::Handled
    }

    pub fn clear_history(&self) -> Result<(), StoreError> {
        self.history.clear()?;
        connect_info!("Remote history cleared by user");
        Ok(())
    }
}
