use crate::{QuerySeq, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read history and start probing it for the new session.
    OpenDialog { session: SessionId },
    /// Run one enumerate pass for the query typed at `seq`.
    Enumerate {
        session: SessionId,
        seq: QuerySeq,
        query: String,
    },
    /// Open a new window at `url` and remember it.
    OpenUrl { url: String },
    ClearHistory,
    /// Drop the session's history cache; in-flight probes are left to finish.
    CloseDialog,
}
