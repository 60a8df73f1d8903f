//! # Schema Module
//!
//! Build-once parameter schemas. A [`Schema`] is the immutable description
//! of a handler's parameters — names in declaration order, declared
//! defaults, and per-parameter field templates seeded from the validators
//! mapping. It is built exactly once per bound handler and only read after
//! that, so concurrent calls can share it freely.

mod build;
mod types;

pub use build::*;
pub use types::*;
