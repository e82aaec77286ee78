//! Error types used by the event bus and the interception pipeline.
//!
//! This module defines two main error enums:
//!
//! - [`BusError`]: errors raised by the listener-registration surface.
//! - [`InterceptError`]: errors raised while dispatching an intercepted request.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging and
//! diagnostics. Listener failures are deliberately *not* represented here:
//! a panicking listener is isolated during emission and reported through
//! `tracing`, never through the pipeline's return value.

use thiserror::Error;

use crate::http::Method;

/// # Errors produced by the listener-registration surface.
///
/// The set of life-cycle event names is closed; any registration call that
/// names something outside it fails synchronously and has no side effect.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BusError {
    /// The given event name is not part of the closed life-cycle enumeration.
    #[error("unrecognized life-cycle event name: {name:?}")]
    InvalidEventName {
        /// The rejected name, verbatim.
        name: String,
    },
}

impl BusError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use mockwire::BusError;
    ///
    /// let err = BusError::InvalidEventName { name: "request:oops".into() };
    /// assert_eq!(err.as_label(), "invalid_event_name");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::InvalidEventName { .. } => "invalid_event_name",
        }
    }
}

/// # Errors produced by request dispatch.
///
/// These represent failures of the interception pipeline itself. Observer
/// failures never surface here.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum InterceptError {
    /// No handler matched and the configured policy forbids passthrough.
    #[error("no handler matched {method} {url}")]
    UnhandledRequest {
        /// Method of the unhandled request.
        method: Method,
        /// Full URL of the unhandled request.
        url: String,
    },

    /// The passthrough transport failed to produce a response.
    #[error("passthrough transport failed: {error}")]
    Transport {
        /// The underlying transport error message.
        error: String,
    },

    /// A passthrough was required but no transport is configured.
    #[error("no passthrough transport configured")]
    NoTransport,
}

impl InterceptError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            InterceptError::UnhandledRequest { .. } => "unhandled_request",
            InterceptError::Transport { .. } => "transport_failed",
            InterceptError::NoTransport => "no_transport",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            InterceptError::UnhandledRequest { method, url } => {
                format!("unhandled: {method} {url}")
            }
            InterceptError::Transport { error } => format!("transport: {error}"),
            InterceptError::NoTransport => "no transport".to_string(),
        }
    }
}
