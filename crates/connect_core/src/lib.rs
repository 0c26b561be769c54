//! Remote connect core: pure dialog state machine, candidate synthesis,
//! ranking and view-model helpers.
mod actions;
mod autocomplete;
mod effect;
mod msg;
mod probe;
mod rank;
mod state;
mod update;
mod view_model;

pub use actions::HostAction;
pub use autocomplete::{autocomplete_candidates, needs_scheme};
pub use effect::Effect;
pub use msg::Msg;
pub use probe::ProbeResult;
pub use rank::{merge_and_rank, rank};
pub use state::{DialogState, QuerySeq, SessionId, SessionPhase};
pub use update::update;
pub use view_model::{describe, render_candidates, CandidateView, DialogViewModel};
