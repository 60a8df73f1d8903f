//! # Fields Module
//!
//! The coercion primitives of the crate. A [`Field`] holds one raw value and
//! converts it to a typed representation on demand; a [`FieldKind`] selects
//! the canonical conversion (integer, float, string, comma-delimited list,
//! date, datetime). A [`FieldConfig`] is the per-parameter constructor placed
//! in a binder's validators mapping.
//!
//! Conversion is explicit: `write()` coerces and stores, `read()` re-applies
//! the format to the stored value on every call. Reads are idempotent —
//! repeated reads without an intervening write produce equal results or the
//! same failure.

mod core;

pub use core::{Field, FieldConfig, FieldKind, FormatFn, DATETIME_FORMAT, DATE_FORMAT};
