use crate::container::{ArgumentContainer, RawArguments};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::errors::{BindError, ConfigError};
use crate::fields::FieldConfig;
use crate::request::RequestSource;
use crate::schema::{build_schema, Schema, Validators};
use crate::signature::Signature;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Target function invoked with the resolved values in declaration order.
pub type HandlerFn = Box<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// Merge raw data from a request source into per-call [`RawArguments`].
///
/// Precedence, lowest to highest: JSON body object, combined query/form
/// values (each flattened to its first element), path variables. A body
/// that is absent, unparseable, or not a JSON object contributes nothing.
#[must_use]
pub fn merge_raw_arguments(source: &dyn RequestSource) -> RawArguments {
    let mut raw = RawArguments::new();
    if let Some(Value::Object(body)) = source.json_body() {
        for (name, value) in body {
            raw.insert(name, value);
        }
    }
    for (name, values) in source.values() {
        if let Some(first) = values.into_iter().next() {
            raw.insert(name, Value::String(first));
        }
    }
    for (name, value) in source.path_vars() {
        raw.insert(name, Value::String(value));
    }
    raw
}

/// Factory for bound handlers, carrying the validators configuration.
///
/// One binder can bind any number of handlers; each `bind` call parses the
/// declaration, builds the schema once, and wraps the target function.
#[derive(Default)]
pub struct Binder {
    validators: Validators,
}

impl Binder {
    /// Binder with no configured fields.
    #[must_use]
    pub fn new() -> Self {
        Binder {
            validators: Validators::new(),
        }
    }

    /// Configure a field constructor for the named parameter.
    #[must_use]
    pub fn field(mut self, name: &str, config: impl Into<FieldConfig>) -> Self {
        self.validators.insert(name.to_string(), config.into());
        self
    }

    /// Bind a target function to a handler declaration.
    ///
    /// The declaration is parsed and the schema built here, exactly once;
    /// every subsequent call reuses it. The function receives the resolved
    /// values positionally, in declaration order, and its return value is
    /// serialized to JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the declaration is malformed or the
    /// validators mapping does not match it.
    pub fn bind<F, R>(&self, decl: &str, func: F) -> Result<BoundHandler, ConfigError>
    where
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
        R: Serialize,
    {
        let signature = Signature::parse(decl)?;
        let schema = build_schema(&signature, &self.validators)?;
        let func: HandlerFn = Box::new(move |args| {
            serde_json::to_value(func(args))
                .unwrap_or_else(|_| serde_json::json!({ "error": "Failed to serialize response" }))
        });
        Ok(BoundHandler {
            schema: Arc::new(schema),
            func,
        })
    }
}

/// A target function together with its build-once schema.
///
/// The wrapped function never sees raw request data: every call rebuilds its
/// arguments from the request source, so whatever a caller might try to pass
/// alongside is irrelevant by construction.
pub struct BoundHandler {
    schema: Arc<Schema>,
    func: HandlerFn,
}

impl BoundHandler {
    /// Handler name, taken from the declaration.
    #[must_use]
    pub fn name(&self) -> &str {
        self.schema.handler_name()
    }

    /// The cached schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Bind one call: merge raw arguments from `source`, resolve them
    /// against the schema, and invoke the target function positionally.
    ///
    /// # Errors
    ///
    /// Fails with `ARGUMENT_MISSING` or `ARGUMENT_FORMAT` before the target
    /// function runs; there is no partial execution.
    pub fn call(&self, source: &dyn RequestSource) -> Result<Value, BindError> {
        let raw = merge_raw_arguments(source);
        let container = ArgumentContainer::bind(&self.schema, &raw)?;
        let args = container.args()?;
        Ok((self.func)(&args))
    }
}

/// Registry of bound handlers keyed by handler name.
///
/// Holds the cached schemas for the process lifetime and the injected
/// diagnostic sink observing every dispatch.
pub struct Dispatcher {
    handlers: HashMap<String, BoundHandler>,
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Empty dispatcher reporting to the default [`TracingSink`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    /// Empty dispatcher reporting to the supplied sink.
    #[must_use]
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Dispatcher {
            handlers: HashMap::new(),
            sink,
        }
    }

    /// Register a bound handler under its declared name.
    ///
    /// Registering a name twice replaces the earlier handler; the sink is
    /// told either way.
    pub fn register(&mut self, handler: BoundHandler) {
        let name = handler.name().to_string();
        let replaced = self.handlers.insert(name.clone(), handler).is_some();
        self.sink.handler_registered(&name, replaced);
    }

    /// Look up a bound handler by name.
    #[must_use]
    pub fn handler(&self, name: &str) -> Option<&BoundHandler> {
        self.handlers.get(name)
    }

    /// Registered handler names, in no particular order.
    #[must_use]
    pub fn handler_names(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    /// Dispatch one call to the named handler.
    ///
    /// Returns `None` when no handler is registered under `name`; otherwise
    /// the call's outcome. Lifecycle and latency are reported to the sink.
    #[must_use]
    pub fn dispatch(&self, name: &str, source: &dyn RequestSource) -> Option<Result<Value, BindError>> {
        let handler = match self.handlers.get(name) {
            Some(handler) => handler,
            None => {
                debug!(
                    handler_name = %name,
                    available_handlers = self.handlers.len(),
                    "Handler not found"
                );
                return None;
            }
        };

        self.sink.dispatch_started(name);
        let start = Instant::now();
        let result = handler.call(source);
        match &result {
            Ok(_) => self.sink.dispatch_succeeded(name, start.elapsed()),
            Err(error) => self.sink.dispatch_failed(name, error),
        }
        Some(result)
    }
}
