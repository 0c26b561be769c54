use crate::{ProbeResult, SessionPhase};

/// One selectable row of the quick-open list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateView {
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogViewModel {
    pub phase: SessionPhase,
    pub query: String,
    pub candidates: Vec<CandidateView>,
    pub history_count: Option<usize>,
    pub dirty: bool,
}

/// Human-readable status line for a probe result.
pub fn describe(result: &ProbeResult) -> String {
    match (&result.status, &result.error) {
        (Some(status), _) => format!("Status: {status}"),
        (None, Some(error)) => format!("Error: {error}"),
        (None, None) => "Error: Unresolved".to_string(),
    }
}

pub fn render_candidates(results: &[ProbeResult]) -> Vec<CandidateView> {
    results
        .iter()
        .map(|result| CandidateView {
            label: result.url.clone(),
            description: describe(result),
        })
        .collect()
}
