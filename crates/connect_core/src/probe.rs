/// Outcome of one reachability probe.
///
/// Exactly one of `status`/`error` is set once a probe has completed. A result
/// with neither is unresolved: the probe was still in flight when the batch
/// was collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub url: String,
    pub status: Option<String>,
    pub error: Option<String>,
}

impl ProbeResult {
    pub fn unresolved(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: None,
            error: None,
        }
    }

    pub fn reached(url: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: Some(status.into()),
            error: None,
        }
    }

    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: None,
            error: Some(error.into()),
        }
    }

    /// A 2xx status. Other statuses still count as reached, they just rank lower.
    pub fn is_ok(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|status| status.starts_with('2'))
    }

    pub fn is_resolved(&self) -> bool {
        self.status.is_some() || self.error.is_some()
    }
}
