//! # mockwire
//!
//! **mockwire** is an HTTP request-interception and mocking engine with a
//! read-only life-cycle event bus.
//!
//! Tests and tooling register mock handlers; the interceptor answers matching
//! requests with mocked responses and passes the rest through to the real
//! network. Every step of a request's life is observable through a fixed set
//! of events, and observers can *only* observe: nothing a listener does can
//! change what a request receives.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!            RequestRecord (one per intercepted request)
//!                 │
//!                 ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  MockInterceptor (interception pipeline)                     │
//! │  - handler set (match verdict + mocked response)             │
//! │  - Transport (passthrough to the real network)               │
//! │  - Emitter (the ONLY emit capability, crate-internal)        │
//! └──────┬───────────────────────────────────────────────────────┘
//!        │ emits at fixed points:
//!        │   request:start / request:match / request:unhandled
//!        │   response:mocked / response:bypass / request:end
//!        ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ListenerRegistry (per-name, ordered, snapshot on emit)      │
//! └──────┬───────────────────────────────────────────────────────┘
//!        ▼
//!   listener₁.on_event()  listener₂.on_event()  ...  (observe only)
//!
//! Application code holds LifecycleEvents (on / remove_listener /
//! remove_all_listeners) and can never reach emit.
//! ```
//!
//! ### Life of a request
//! ```text
//! dispatch(request)
//!   ├─► request:start
//!   ├─► matched?  ── yes ─► request:match ──► response:mocked
//!   │             └─ no ──► request:unhandled ─► response:bypass | error
//!   └─► request:end                  (always fires, always last)
//! ```
//! Any number of requests may be in flight; each carries its own
//! [`RequestId`] in every payload, and events of one request never reorder
//! relative to each other. Correlating events across a request's life is the
//! listener's job, via that identifier ([`TrafficRecorder`] is the reference
//! implementation).
//!
//! ## Features
//! | Area           | Description                                              | Key types / traits                       |
//! |----------------|----------------------------------------------------------|------------------------------------------|
//! | **Observation**| Watch request/response life cycles, read-only.           | [`LifecycleEvents`], [`Listener`]        |
//! | **Mocking**    | Claim requests and answer them with mocked responses.    | [`RequestHandler`], [`HandlerFn`]        |
//! | **Passthrough**| Forward unmatched traffic to the real network.           | [`Transport`], [`UnhandledPolicy`]       |
//! | **Latency**    | Make mocked responses take realistic time.               | [`ResponseDelay`]                        |
//! | **Errors**     | Typed errors for registration and dispatch.              | [`BusError`], [`InterceptError`]         |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] listener
//!   _(demo/reference only)_.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use mockwire::{
//!     HandlerFn, InterceptorConfig, Method, MockInterceptor, RequestRecord, ResponseParts,
//!     TrafficRecorder,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let interceptor = MockInterceptor::builder(InterceptorConfig::default())
//!         .with_handler(HandlerFn::arc(
//!             "get-user",
//!             |req| req.method() == Method::Get && req.url().ends_with("/user"),
//!             |_req| async { ResponseParts::new(200).with_body(r#"{"name":"mock"}"#) },
//!         ))
//!         .build();
//!
//!     // Observe, read-only. The recorder builds its own correlation table.
//!     let recorder = TrafficRecorder::new();
//!     recorder.attach(&interceptor.events())?;
//!
//!     let request = RequestRecord::new(Method::Get, "https://api.example.com/user");
//!     let id = request.id();
//!     let outcome = interceptor.dispatch(request).await?;
//!
//!     assert!(outcome.is_mocked());
//!     println!("{id}: {:?}", recorder.sequence(id).await);
//!     Ok(())
//! }
//! ```

mod error;
mod events;
mod http;
mod intercept;
mod listeners;

// ---- Public re-exports ----

pub use error::{BusError, InterceptError};
pub use events::{EventName, LifecycleEvent, LifecycleEvents, Listener, ListenerRef};
pub use http::{Headers, Method, RequestId, RequestRecord, ResponseRecord};
pub use intercept::{
    DispatchOutcome, HandlerFn, InterceptorBuilder, InterceptorConfig, MockInterceptor,
    RequestHandler, ResponseDelay, ResponseParts, Transport, UnhandledPolicy,
};
pub use listeners::TrafficRecorder;

// Optional: expose a simple built-in logging listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use listeners::LogWriter;
