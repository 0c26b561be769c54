//! Remote connect engine: reachability probing, history persistence and
//! effect execution.
mod engine;
mod history;
mod persist;
mod probe;
mod provider;
mod store;
mod types;
mod window;

pub use engine::EngineHandle;
pub use history::{decode_endpoint, encode_endpoint, History, HISTORY_KEY};
pub use persist::{ensure_parent_dir, AtomicFileWriter, PersistError};
pub use probe::{probe_batch, ProbeSettings, Prober, ReqwestProber, DEFAULT_PROBE_TIMEOUT};
pub use provider::{CandidateSink, OpenOutcome, RemoteConnectProvider};
pub use store::{KeyValueStore, MemoryStore, RonFileStore, StoreError};
pub use types::{EngineEvent, ProbeError, ProbeFailure};
pub use window::{
    CommandWindowOpener, ConfiguredOpener, OpenError, SystemWindowOpener, WindowOpener,
};
