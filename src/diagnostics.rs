//! Injected call-path diagnostics.
//!
//! The dispatcher reports binding lifecycle events through a
//! [`DiagnosticSink`] trait object supplied at construction rather than
//! logging directly, so hosts can route diagnostics wherever they like.
//! [`TracingSink`] is the default and forwards to `tracing`.

use crate::errors::BindError;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Receiver for dispatch lifecycle events. All methods default to no-ops so
/// implementations override only what they observe.
pub trait DiagnosticSink: Send + Sync {
    /// A handler was registered; `replaced` is true when it displaced an
    /// existing registration under the same name.
    fn handler_registered(&self, _handler: &str, _replaced: bool) {}

    /// Binding is about to start for a call.
    fn dispatch_started(&self, _handler: &str) {}

    /// The target function ran and returned.
    fn dispatch_succeeded(&self, _handler: &str, _latency: Duration) {}

    /// Binding failed before the target function was invoked.
    fn dispatch_failed(&self, _handler: &str, _error: &BindError) {}
}

/// Default sink forwarding events to `tracing` with structured fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn handler_registered(&self, handler: &str, replaced: bool) {
        if replaced {
            warn!(handler_name = %handler, "Replaced existing handler");
        } else {
            info!(handler_name = %handler, "Handler registered");
        }
    }

    fn dispatch_started(&self, handler: &str) {
        debug!(handler_name = %handler, "Dispatch started");
    }

    fn dispatch_succeeded(&self, handler: &str, latency: Duration) {
        info!(
            handler_name = %handler,
            latency_ms = latency.as_millis() as u64,
            "Dispatch complete"
        );
    }

    fn dispatch_failed(&self, handler: &str, error: &BindError) {
        error!(
            handler_name = %handler,
            error_code = %error.error_code,
            error = %error.error_msg,
            "Dispatch failed before handler invocation"
        );
    }
}
