//! Request-scoped raw data.
//!
//! Binding never touches an HTTP request directly; it reads through the
//! [`RequestSource`] contract, which a host adapter implements against its
//! framework's request object. [`ParsedRequest`] is the plain owned
//! implementation used by tests and by hosts that already hold the pieces.

use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Raw per-call data the binder merges arguments from.
///
/// All three accessors must answer synchronously from already-available
/// request state; a source that cannot is a host bug, not a retry case.
pub trait RequestSource {
    /// Request body parsed as JSON, `None` when absent or unparseable.
    fn json_body(&self) -> Option<Value>;

    /// Combined query-string and form values. Entries may be multi-valued;
    /// the binder flattens each to its first element.
    fn values(&self) -> HashMap<String, Vec<String>>;

    /// Path variables extracted by the host's router.
    fn path_vars(&self) -> HashMap<String, String>;
}

/// Owned request snapshot implementing [`RequestSource`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRequest {
    /// Parsed JSON body, if any.
    pub body: Option<Value>,
    /// Combined query-string and form values.
    pub values: HashMap<String, Vec<String>>,
    /// Path variables extracted by the host's router.
    pub path_vars: HashMap<String, String>,
}

impl ParsedRequest {
    /// Empty request with no body, values, or path variables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Append one query/form value under `name`.
    #[must_use]
    pub fn with_value(mut self, name: &str, value: &str) -> Self {
        self.values
            .entry(name.to_string())
            .or_default()
            .push(value.to_string());
        self
    }

    /// Set one path variable.
    #[must_use]
    pub fn with_path_var(mut self, name: &str, value: &str) -> Self {
        self.path_vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl RequestSource for ParsedRequest {
    fn json_body(&self) -> Option<Value> {
        self.body.clone()
    }

    fn values(&self) -> HashMap<String, Vec<String>> {
        self.values.clone()
    }

    fn path_vars(&self) -> HashMap<String, String> {
        self.path_vars.clone()
    }
}

/// Parse query string parameters from a URL path.
///
/// Extracts everything after the `?` character and URL-decodes parameter
/// names and values. Repeated names accumulate in order.
#[must_use]
pub fn parse_query_params(path: &str) -> HashMap<String, Vec<String>> {
    let mut params: HashMap<String, Vec<String>> = HashMap::new();
    if let Some(pos) = path.find('?') {
        let query_str = &path[pos + 1..];
        for (k, v) in url::form_urlencoded::parse(query_str.as_bytes()) {
            params.entry(k.to_string()).or_default().push(v.to_string());
        }
    }
    debug!(param_count = params.len(), "Query params parsed");
    params
}

/// Parse a request body as JSON, silently.
///
/// Binding treats an unparseable body the same as a missing one, so parse
/// failures yield `None` rather than an error.
#[must_use]
pub fn parse_json_body(body: &str) -> Option<Value> {
    if body.is_empty() {
        return None;
    }
    let parsed: Result<Value, _> = serde_json::from_str(body);
    if parsed.is_err() {
        debug!(body_len = body.len(), "JSON body parse failed; body ignored");
    }
    parsed.ok()
}
