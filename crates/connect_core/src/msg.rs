#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User invoked "connect to remote".
    DialogOpened,
    /// Engine finished probing the remembered endpoints for a session.
    HistoryCacheReady {
        session: crate::SessionId,
        count: usize,
    },
    /// User edited the query text.
    QueryChanged(String),
    /// Engine delivered ranked candidates for one enumerate pass.
    CandidatesDelivered {
        session: crate::SessionId,
        seq: crate::QuerySeq,
        candidates: Vec<crate::CandidateView>,
    },
    /// User committed the candidate at this index of the displayed list.
    ItemSelected(usize),
    /// User invoked "clear remote history".
    ClearHistoryRequested,
    /// User dismissed the dialog.
    DialogClosed,
}
