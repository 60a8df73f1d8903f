//! # argbind
//!
//! **argbind** binds untyped request parameters — strings, numbers, JSON
//! values — to a handler function's declared parameters, performing presence
//! validation, default substitution, and per-parameter type coercion before
//! the function runs. Handlers declare typed parameters and receive
//! already-validated, already-converted values instead of raw request data.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`signature`]** - handler declaration parsing (ordered names plus
//!   trailing defaults)
//! - **[`fields`]** - typed-value coercion primitives (integer, float,
//!   string, list, date, datetime) with explicit `read()`/`write()`
//! - **[`schema`]** - build-once parameter schemas combining a signature
//!   with the validators mapping
//! - **[`container`]** - per-call argument resolution enforcing
//!   required-vs-optional semantics
//! - **[`dispatcher`]** - the binder factory, bound handlers, and the
//!   handler registry
//! - **[`request`]** - the request-source contract and a plain owned
//!   implementation
//! - **[`diagnostics`]** - the injected diagnostic sink observing dispatch
//! - **[`errors`]** - the structured binding and configuration errors
//!
//! ## Binding Flow
//!
//! A schema is built exactly once when a handler is bound. Per call, raw
//! data is merged from the request source in increasing precedence — JSON
//! body object, then combined query/form values (multi-valued entries
//! flattened to their first element), then path variables — and resolved
//! through a per-call argument container:
//!
//! 1. every required parameter must be present, or the call fails with
//!    `ARGUMENT_MISSING` naming the absent parameters;
//! 2. supplied optional values are coerced through their configured field
//!    (failures are `ARGUMENT_FORMAT`); present-but-falsy values keep the
//!    schema default;
//! 3. the target function is invoked positionally with the resolved values
//!    in declaration order.
//!
//! A failed binding never invokes the target function.
//!
//! ## Quick Start
//!
//! ```
//! use argbind::{Binder, FieldKind, ParsedRequest};
//! use serde_json::{json, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let handler = Binder::new()
//!     .field("limit", FieldKind::Integer)
//!     .bind("list_pets(owner_id, limit = 25)", |args: &[Value]| {
//!         json!({ "owner": args[0], "limit": args[1] })
//!     })?;
//!
//! let request = ParsedRequest::new()
//!     .with_path_var("owner_id", "42")
//!     .with_value("limit", "50");
//!
//! let result = handler.call(&request)?;
//! assert_eq!(result["limit"], json!(50));
//! # Ok(())
//! # }
//! ```
//!
//! ## Runtime Considerations
//!
//! Everything is synchronous: a bound call either completes or fails before
//! the target function runs, with no retries, timeouts, or suspension
//! points. Schemas are immutable after construction and safe for
//! arbitrarily many concurrent calls; each call owns its raw-argument map
//! and container exclusively, so no state survives a call or leaks into
//! the next one.

pub mod container;
pub mod diagnostics;
pub mod dispatcher;
pub mod errors;
pub mod fields;
pub mod request;
pub mod schema;
pub mod signature;

pub use container::{ArgVec, ArgumentContainer, RawArguments, MAX_INLINE_ARGS};
pub use diagnostics::{DiagnosticSink, TracingSink};
pub use dispatcher::{merge_raw_arguments, Binder, BoundHandler, Dispatcher, HandlerFn};
pub use errors::{BindError, BindErrorCode, ConfigError};
pub use fields::{Field, FieldConfig, FieldKind, FormatFn, DATETIME_FORMAT, DATE_FORMAT};
pub use request::{parse_json_body, parse_query_params, ParsedRequest, RequestSource};
pub use schema::{build_schema, ParameterSpec, Schema, Validators};
pub use signature::{ParamDecl, Signature};
