use std::error::Error as _;
use std::sync::Arc;
use std::time::Duration;

use connect_core::ProbeResult;
use connect_logging::{connect_debug, connect_trace};

use crate::{ProbeError, ProbeFailure};

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct ProbeSettings {
    /// Per-probe request timeout, also the forced wait before a batch is collected.
    pub timeout: Duration,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

/// Best-effort liveness check. Implementations never fail: every outcome is
/// folded into the returned `ProbeResult`.
#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, url: &str, timeout: Duration) -> ProbeResult;
}

#[derive(Debug, Clone)]
pub struct ReqwestProber {
    client: reqwest::Client,
}

impl ReqwestProber {
    pub fn new() -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| ProbeError::new(ProbeFailure::Network, err.to_string()))?;
        Ok(Self { client })
    }

    async fn try_probe(&self, url: &str, timeout: Duration) -> Result<u16, ProbeError> {
        let parsed = url::Url::parse(url)
            .map_err(|err| ProbeError::new(ProbeFailure::InvalidUrl, err.to_string()))?;
        let response = self
            .client
            .get(parsed)
            .timeout(timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        // The body is never read; the status line is all a probe needs.
        Ok(response.status().as_u16())
    }
}

#[async_trait::async_trait]
impl Prober for ReqwestProber {
    async fn probe(&self, url: &str, timeout: Duration) -> ProbeResult {
        match self.try_probe(url, timeout).await {
            Ok(status) => {
                connect_trace!("probe {} -> {}", url, status);
                ProbeResult::reached(url, status.to_string())
            }
            Err(err) => {
                connect_debug!("probe {} failed: {}", url, err);
                ProbeResult::failed(url, err.to_string())
            }
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ProbeError {
    if err.is_timeout() {
        return ProbeError::new(ProbeFailure::Timeout, "");
    }
    if err.is_builder() {
        return ProbeError::new(ProbeFailure::InvalidUrl, err.to_string());
    }
    ProbeError::new(ProbeFailure::Network, root_cause(&err))
}

/// reqwest wraps the interesting part ("connection refused", TLS alerts) a few
/// sources deep.
fn root_cause(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message = inner.to_string();
        source = inner.source();
    }
    message
}

/// Probes every URL concurrently, then waits `timeout` and collects.
///
/// Each probe carries its own timeout. Probes still running after the wait are
/// reported unresolved and left to finish on their own; their late result is
/// dropped. The output keeps the input order.
pub async fn probe_batch(
    prober: Arc<dyn Prober>,
    urls: Vec<String>,
    timeout: Duration,
) -> Vec<ProbeResult> {
    if urls.is_empty() {
        return Vec::new();
    }

    let tasks: Vec<_> = urls
        .into_iter()
        .map(|url| {
            let prober = prober.clone();
            let target = url.clone();
            let handle = tokio::spawn(async move { prober.probe(&target, timeout).await });
            (url, handle)
        })
        .collect();

    tokio::time::sleep(timeout).await;

    let mut results = Vec::with_capacity(tasks.len());
    for (url, handle) in tasks {
        if !handle.is_finished() {
            connect_trace!("probe {} still in flight, leaving it unresolved", url);
            // Dropping the handle detaches the task; its result is intentionally ignored.
            drop(handle);
            results.push(ProbeResult::unresolved(url));
            continue;
        }
        match handle.await {
            Ok(result) => results.push(result),
            Err(err) => {
                let err = ProbeError::new(ProbeFailure::Aborted, err.to_string());
                results.push(ProbeResult::failed(url, err.to_string()));
            }
        }
    }

    let unresolved = results.iter().filter(|result| !result.is_resolved()).count();
    if unresolved > 0 {
        connect_debug!(
            "{} of {} probes unresolved after {:?}",
            unresolved,
            results.len(),
            timeout
        );
    }
    results
}
