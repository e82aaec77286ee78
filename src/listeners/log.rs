//! # Simple logging listener for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [request:start] id=6f9a… method=GET url=https://example.com/x
//! [request:match] id=6f9a…
//! [response:mocked] id=6f9a… status=200
//! [request:end] id=6f9a…
//! ```

use async_trait::async_trait;

use crate::events::{LifecycleEvent, Listener};

/// Simple stdout logging listener.
///
/// Enabled via the `logging` feature. Not intended for production use;
/// implement a custom [`Listener`] for structured logging or metrics
/// collection.
pub struct LogWriter;

#[async_trait]
impl Listener for LogWriter {
    async fn on_event(&self, event: &LifecycleEvent) {
        match event {
            LifecycleEvent::RequestStart { request } => {
                println!(
                    "[request:start] id={} method={} url={}",
                    request.id(),
                    request.method(),
                    request.url()
                );
            }
            LifecycleEvent::RequestMatch { request } => {
                println!("[request:match] id={}", request.id());
            }
            LifecycleEvent::RequestUnhandled { request } => {
                println!(
                    "[request:unhandled] id={} method={} url={}",
                    request.id(),
                    request.method(),
                    request.url()
                );
            }
            LifecycleEvent::RequestEnd { request } => {
                println!("[request:end] id={}", request.id());
            }
            LifecycleEvent::ResponseMocked { response, request_id } => {
                println!(
                    "[response:mocked] id={request_id} status={}",
                    response.status()
                );
            }
            LifecycleEvent::ResponseBypass { response, request_id } => {
                println!(
                    "[response:bypass] id={request_id} status={}",
                    response.status()
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}
