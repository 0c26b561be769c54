use crate::view_model::{CandidateView, DialogViewModel};

pub type SessionId = u64;
pub type QuerySeq = u64;

/// Lifecycle of one quick-open dialog session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    ComputingHistoryCache,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogState {
    phase: SessionPhase,
    session: Option<SessionId>,
    last_session: SessionId,
    query: String,
    query_seq: QuerySeq,
    applied_seq: Option<QuerySeq>,
    candidates: Vec<CandidateView>,
    history_count: Option<usize>,
    dirty: bool,
}

impl DialogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> DialogViewModel {
        DialogViewModel {
            phase: self.phase,
            query: self.query.clone(),
            candidates: self.candidates.clone(),
            history_count: self.history_count,
            dirty: self.dirty,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn active_session(&self) -> Option<SessionId> {
        self.session
    }

    /// Returns whether a re-render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn open_session(&mut self) -> SessionId {
        self.last_session += 1;
        let session = self.last_session;
        self.session = Some(session);
        self.phase = SessionPhase::ComputingHistoryCache;
        self.query.clear();
        self.query_seq = 0;
        self.applied_seq = None;
        self.candidates.clear();
        self.history_count = None;
        self.dirty = true;
        session
    }

    pub(crate) fn mark_history_ready(&mut self, session: SessionId, count: usize) {
        if self.session != Some(session) || self.phase != SessionPhase::ComputingHistoryCache {
            return;
        }
        self.phase = SessionPhase::Ready;
        self.history_count = Some(count);
        self.dirty = true;
    }

    pub(crate) fn set_query(&mut self, query: String) -> QuerySeq {
        self.query_seq += 1;
        self.query = query;
        self.dirty = true;
        self.query_seq
    }

    /// Applies a delivery unless it belongs to another session or is older
    /// than the list already shown.
    pub(crate) fn apply_candidates(
        &mut self,
        session: SessionId,
        seq: QuerySeq,
        candidates: Vec<CandidateView>,
    ) -> bool {
        if self.session != Some(session) {
            return false;
        }
        if self.applied_seq.is_some_and(|applied| seq < applied) {
            return false;
        }
        self.applied_seq = Some(seq);
        self.candidates = candidates;
        self.dirty = true;
        true
    }

    pub(crate) fn candidate_url(&self, index: usize) -> Option<String> {
        self.candidates.get(index).map(|item| item.label.clone())
    }

    pub(crate) fn close_session(&mut self) {
        self.session = None;
        self.phase = SessionPhase::Idle;
        self.candidates.clear();
        self.applied_seq = None;
        self.history_count = None;
        self.dirty = true;
    }
}
