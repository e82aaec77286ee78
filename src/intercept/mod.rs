//! Interception pipeline: handler matching, mocked responses, passthrough.
//!
//! This module contains the engine that drives every emission point. The only
//! public entry is [`MockInterceptor`] plus the seams it is assembled from:
//!
//! - [`handler`]: the matching/response seam ([`RequestHandler`], [`HandlerFn`]);
//! - [`transport`]: the passthrough seam ([`Transport`]);
//! - [`config`]: dispatch policy ([`InterceptorConfig`], [`UnhandledPolicy`]);
//! - [`delay`]: simulated mock-response latency ([`ResponseDelay`]);
//! - [`interceptor`]: dispatch itself, where ordering and correlation are
//!   enforced.

mod config;
mod delay;
mod handler;
mod interceptor;
mod transport;

pub use config::{InterceptorConfig, UnhandledPolicy};
pub use delay::ResponseDelay;
pub use handler::{HandlerFn, RequestHandler, ResponseParts};
pub use interceptor::{DispatchOutcome, InterceptorBuilder, MockInterceptor};
pub use transport::Transport;
