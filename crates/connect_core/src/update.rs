use crate::{DialogState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: DialogState, msg: Msg) -> (DialogState, Vec<Effect>) {
    let effects = match msg {
        Msg::DialogOpened => {
            if state.active_session().is_some() {
                return (state, Vec::new());
            }
            let session = state.open_session();
            // The empty query lists history right away.
            let seq = state.set_query(String::new());
            vec![
                Effect::OpenDialog { session },
                Effect::Enumerate {
                    session,
                    seq,
                    query: String::new(),
                },
            ]
        }
        Msg::HistoryCacheReady { session, count } => {
            state.mark_history_ready(session, count);
            Vec::new()
        }
        Msg::QueryChanged(query) => match state.active_session() {
            Some(session) => {
                let seq = state.set_query(query.clone());
                vec![Effect::Enumerate {
                    session,
                    seq,
                    query,
                }]
            }
            None => Vec::new(),
        },
        Msg::CandidatesDelivered {
            session,
            seq,
            candidates,
        } => {
            state.apply_candidates(session, seq, candidates);
            Vec::new()
        }
        Msg::ItemSelected(index) => {
            if state.active_session().is_none() {
                return (state, Vec::new());
            }
            match state.candidate_url(index) {
                Some(url) => {
                    state.close_session();
                    vec![Effect::OpenUrl { url }, Effect::CloseDialog]
                }
                None => Vec::new(),
            }
        }
        Msg::ClearHistoryRequested => vec![Effect::ClearHistory],
        Msg::DialogClosed => {
            if state.active_session().is_some() {
                state.close_session();
                vec![Effect::CloseDialog]
            } else {
                Vec::new()
            }
        }
    };

    (state, effects)
}
