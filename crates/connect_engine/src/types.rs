use std::fmt;

use connect_core::{CandidateView, QuerySeq, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Every remembered endpoint of the session has been probed (or left unresolved).
    HistoryCacheReady { session: SessionId, count: usize },
    Candidates {
        session: SessionId,
        seq: QuerySeq,
        candidates: Vec<CandidateView>,
    },
    HistoryCleared { result: Result<(), String> },
}

/// Why a probe did not reach the endpoint. Only ever rendered into a
/// `ProbeResult`, never propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeError {
    pub kind: ProbeFailure,
    pub message: String,
}

impl ProbeError {
    pub(crate) fn new(kind: ProbeFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl std::error::Error for ProbeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeFailure {
    InvalidUrl,
    Timeout,
    Network,
    /// The probe task panicked or was aborted by the runtime.
    Aborted,
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeFailure::InvalidUrl => write!(f, "invalid url"),
            ProbeFailure::Timeout => write!(f, "timeout"),
            ProbeFailure::Network => write!(f, "network error"),
            ProbeFailure::Aborted => write!(f, "probe aborted"),
        }
    }
}
