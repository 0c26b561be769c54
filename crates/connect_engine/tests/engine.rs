use std::sync::Arc;
use std::time::{Duration, Instant};

use connect_core::ProbeResult;
use connect_engine::{
    EngineEvent, EngineHandle, History, MemoryStore, OpenError, ProbeSettings, Prober,
    RemoteConnectProvider, WindowOpener,
};

struct EchoProber;

#[async_trait::async_trait]
impl Prober for EchoProber {
    async fn probe(&self, url: &str, _timeout: Duration) -> ProbeResult {
        ProbeResult::reached(url, "200")
    }
}

struct NoopOpener;

impl WindowOpener for NoopOpener {
    fn open_new_window(&self, _url: &str) -> Result<(), OpenError> {
        Ok(())
    }
}

fn engine(history: History) -> EngineHandle {
    let provider = RemoteConnectProvider::new(
        Arc::new(EchoProber),
        history,
        Arc::new(NoopOpener),
        ProbeSettings {
            timeout: Duration::from_millis(20),
        },
    );
    EngineHandle::new(provider).expect("engine")
}

/// Collects events until `done` is satisfied or two seconds pass.
fn collect_events(engine: &EngineHandle, done: impl Fn(&[EngineEvent]) -> bool) -> Vec<EngineEvent> {
    let deadline = Instant::now() + Duration::from_secs(2);
    let mut events = Vec::new();
    while Instant::now() < deadline && !done(&events) {
        match engine.try_recv() {
            Some(event) => events.push(event),
            None => std::thread::sleep(Duration::from_millis(10)),
        }
    }
    events
}

#[test]
fn session_reports_history_and_candidates() {
    let history = History::new(Arc::new(MemoryStore::new()));
    history.remember("http://foo").unwrap();
    let engine = engine(history);

    engine.open_dialog(1);
    engine.enumerate(1, 1, "bar");

    let events = collect_events(&engine, |events| events.len() >= 2);

    assert!(events.contains(&EngineEvent::HistoryCacheReady {
        session: 1,
        count: 1
    }));
    let (session, seq, candidates) = events
        .iter()
        .find_map(|event| match event {
            EngineEvent::Candidates {
                session,
                seq,
                candidates,
            } => Some((*session, *seq, candidates.clone())),
            _ => None,
        })
        .expect("candidates event");
    assert_eq!((session, seq), (1, 1));
    let labels: Vec<_> = candidates.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["http://bar", "https://bar", "http://foo"]);
}

#[test]
fn enumerate_after_close_is_skipped() {
    let engine = engine(History::new(Arc::new(MemoryStore::new())));
    engine.open_dialog(1);
    engine.close_dialog();
    engine.enumerate(1, 2, "bar");

    let deadline = Instant::now() + Duration::from_millis(300);
    while Instant::now() < deadline {
        match engine.try_recv() {
            Some(event) => assert!(!matches!(event, EngineEvent::Candidates { .. })),
            None => std::thread::sleep(Duration::from_millis(10)),
        }
    }
}

#[test]
fn open_is_remembered_before_shutdown_returns() {
    let history = History::new(Arc::new(MemoryStore::new()));
    let engine = engine(history.clone());

    engine.open("http://foo");
    engine.clear_history();
    engine.open("http://bar");
    engine.shutdown();

    let entries = history.entries().unwrap();
    assert!(entries.contains(&"http://bar".to_string()));
}

#[test]
fn clear_history_reports_result() {
    let history = History::new(Arc::new(MemoryStore::new()));
    history.remember("http://foo").unwrap();
    let engine = engine(history.clone());

    engine.clear_history();
    let events = collect_events(&engine, |events| !events.is_empty());

    assert_eq!(events, vec![EngineEvent::HistoryCleared { result: Ok(()) }]);
    assert!(history.entries().unwrap().is_empty());
}
