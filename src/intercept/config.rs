//! # Interceptor configuration.
//!
//! [`InterceptorConfig`] defines dispatch behavior: what happens to requests
//! no handler matches, and the default latency simulated for mocked
//! responses.
//!
//! # Example
//! ```
//! use mockwire::{InterceptorConfig, ResponseDelay, UnhandledPolicy};
//! use std::time::Duration;
//!
//! let mut cfg = InterceptorConfig::default();
//! cfg.on_unhandled = UnhandledPolicy::Error;
//! cfg.delay = ResponseDelay::Fixed(Duration::from_millis(50));
//!
//! assert_eq!(cfg.on_unhandled, UnhandledPolicy::Error);
//! ```

use crate::intercept::ResponseDelay;

/// What dispatch does with a request no handler matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnhandledPolicy {
    /// Forward through the passthrough transport, silently.
    Bypass,
    /// Forward through the passthrough transport and log a warning.
    Warn,
    /// Fail dispatch with
    /// [`InterceptError::UnhandledRequest`](crate::InterceptError::UnhandledRequest).
    Error,
}

impl Default for UnhandledPolicy {
    /// Returns [`UnhandledPolicy::Warn`]: unmocked traffic still flows, but
    /// does not go unnoticed.
    fn default() -> Self {
        UnhandledPolicy::Warn
    }
}

/// Global configuration for the interception pipeline.
#[derive(Clone, Debug, Default)]
pub struct InterceptorConfig {
    /// Policy for requests without a matching handler.
    pub on_unhandled: UnhandledPolicy,
    /// Default latency applied to mocked responses. Handlers can override it
    /// per response via
    /// [`ResponseParts::with_delay`](crate::ResponseParts::with_delay).
    pub delay: ResponseDelay,
}
