/// Schemes that are probed as typed; anything else gets `http://` and `https://` prepended.
const KNOWN_SCHEMES: [&str; 2] = ["http", "https"];

/// Returns true when `query` does not start with an `http` or `https` scheme.
///
/// The scheme is the text before the first `:`. Input without a `:` has no
/// scheme, so `example.com`, `localhost:8080` and a bare `http` all need one.
pub fn needs_scheme(query: &str) -> bool {
    let scheme = query.split_once(':').map_or("", |(scheme, _)| scheme);
    !KNOWN_SCHEMES.contains(&scheme)
}

/// Synthesizes the autocompletion endpoints for a raw query.
///
/// Empty input and input that already carries an http(s) scheme yield nothing.
/// Otherwise the result is exactly `[http://<rest>, https://<rest>]`, where
/// leading slashes of the input are dropped so `//host` becomes `http://host`.
pub fn autocomplete_candidates(query: &str) -> Vec<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() || !needs_scheme(trimmed) {
        return Vec::new();
    }

    let rest = trimmed.trim_start_matches('/');
    if rest.is_empty() {
        return Vec::new();
    }
    KNOWN_SCHEMES
        .iter()
        .map(|scheme| format!("{scheme}://{rest}"))
        .collect()
}
