//! # Dispatcher Module
//!
//! The call-wiring layer. A [`Binder`] carries the validators configuration
//! and turns a handler declaration plus a target function into a
//! [`BoundHandler`] with its schema built once and cached. Per call, the
//! bound handler merges raw data from a request source, resolves it through
//! an argument container, and invokes the function positionally.
//!
//! A [`Dispatcher`] is the registry of bound handlers keyed by name, with an
//! injected diagnostic sink observing each dispatch.
//!
//! ## Merge precedence
//!
//! Raw arguments are merged per call in increasing precedence:
//!
//! 1. request body interpreted as a JSON object (lowest; omitted when
//!    absent, unparseable, or not an object)
//! 2. combined query-string and form values, multi-valued entries
//!    flattened to their first element
//! 3. path variables (highest — always win on key conflict)

mod core;

pub use core::{merge_raw_arguments, Binder, BoundHandler, Dispatcher, HandlerFn};
