//! # Example: observe
//!
//! Demonstrates the observe-only event surface.
//!
//! Shows how to:
//! - Build a [`MockInterceptor`] with a couple of handlers.
//! - Attach the built-in [`LogWriter`] listener.
//! - Register and later remove a custom [`Listener`].
//!
//! ## Flow
//! ```text
//! RequestRecord ──► MockInterceptor::dispatch()
//!     ├─► emit(request:start | request:match | ...)
//!     └─► LifecycleEvents ──► LogWriter.on_event()
//!                         └─► Stats.on_event()
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example observe --features logging
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use mockwire::{
    HandlerFn, InterceptorConfig, LifecycleEvent, Listener, ListenerRef, LogWriter, Method,
    MockInterceptor, RequestRecord, ResponseParts, UnhandledPolicy,
};

/// Counts mocked responses. In real life, you could export metrics,
/// ship logs, or trigger alerts.
struct Stats {
    mocked: AtomicUsize,
}

#[async_trait]
impl Listener for Stats {
    async fn on_event(&self, event: &LifecycleEvent) {
        if let LifecycleEvent::ResponseMocked { .. } = event {
            self.mocked.fetch_add(1, Ordering::SeqCst);
        }
    }
    fn name(&self) -> &'static str {
        "stats"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let interceptor = MockInterceptor::builder(InterceptorConfig {
        // No transport in this demo, so fail unmatched requests loudly.
        on_unhandled: UnhandledPolicy::Error,
        ..Default::default()
    })
    .with_handler(HandlerFn::arc(
        "get-user",
        |req| req.method() == Method::Get && req.url().ends_with("/user"),
        |_req| async {
            ResponseParts::new(200)
                .with_header("content-type", "application/json")
                .with_body(r#"{"name":"mock"}"#)
        },
    ))
    .with_handler(HandlerFn::arc(
        "create-item",
        |req| req.method() == Method::Post && req.url().ends_with("/items"),
        |_req| async { ResponseParts::new(201) },
    ))
    .build();

    let events = interceptor.events();
    events.on("request:start", Arc::new(LogWriter))?;
    events.on("response:mocked", Arc::new(LogWriter))?;
    events.on("request:end", Arc::new(LogWriter))?;

    let stats = Arc::new(Stats {
        mocked: AtomicUsize::new(0),
    });
    let stats_ref: ListenerRef = stats.clone();
    events.on("response:mocked", stats_ref.clone())?;

    interceptor
        .dispatch(RequestRecord::new(Method::Get, "https://api.example.com/user"))
        .await?;
    interceptor
        .dispatch(RequestRecord::new(Method::Post, "https://api.example.com/items"))
        .await?;

    // Detach the stats listener; further traffic is no longer counted.
    events.remove_listener("response:mocked", &stats_ref)?;
    interceptor
        .dispatch(RequestRecord::new(Method::Get, "https://api.example.com/user"))
        .await?;

    println!("mocked responses counted: {}", stats.mocked.load(Ordering::SeqCst));
    Ok(())
}
