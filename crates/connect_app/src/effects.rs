use connect_core::{Effect, Msg};
use connect_engine::{EngineEvent, EngineHandle};
use connect_logging::{connect_debug, connect_error, connect_info};

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::OpenDialog { session } => {
                    connect_debug!("OpenDialog session={}", session);
                    self.engine.open_dialog(session);
                }
                Effect::Enumerate {
                    session,
                    seq,
                    query,
                } => {
                    connect_debug!("Enumerate session={} seq={} query={:?}", session, seq, query);
                    self.engine.enumerate(session, seq, query);
                }
                Effect::OpenUrl { url } => {
                    connect_info!("Connecting to {}", url);
                    self.engine.open(url);
                }
                Effect::ClearHistory => self.engine.clear_history(),
                Effect::CloseDialog => self.engine.close_dialog(),
            }
        }
    }

    /// Drains pending engine events.
    pub fn poll(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            if let Some(msg) = map_event(event) {
                inbox.push(msg);
            }
        }
        inbox
    }

    /// Waits for outstanding engine work, such as history writes, before exit.
    pub fn shutdown(self) {
        self.engine.shutdown();
    }
}

fn map_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::HistoryCacheReady { session, count } => {
            Some(Msg::HistoryCacheReady { session, count })
        }
        EngineEvent::Candidates {
            session,
            seq,
            candidates,
        } => Some(Msg::CandidatesDelivered {
            session,
            seq,
            candidates,
        }),
        EngineEvent::HistoryCleared { result } => {
            match result {
                Ok(()) => connect_info!("Remote history cleared"),
                Err(err) => connect_error!("Failed to clear remote history: {}", err),
            }
            None
        }
    }
}
