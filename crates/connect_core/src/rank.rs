use crate::ProbeResult;

/// Stable partition: OK results first, everything else after, relative order
/// preserved inside both groups.
pub fn rank(results: Vec<ProbeResult>) -> Vec<ProbeResult> {
    let (mut ok, rest): (Vec<_>, Vec<_>) = results.into_iter().partition(ProbeResult::is_ok);
    ok.extend(rest);
    ok
}

/// Autocompletion results go ahead of history results before ranking.
pub fn merge_and_rank(autocomplete: Vec<ProbeResult>, history: &[ProbeResult]) -> Vec<ProbeResult> {
    let mut merged = autocomplete;
    merged.extend_from_slice(history);
    rank(merged)
}
