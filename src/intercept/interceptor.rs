//! # The interception pipeline: dispatch, emission points, teardown.
//!
//! [`MockInterceptor`] owns the handler set, the passthrough transport, and
//! the emitting half of the event bus. Every intercepted request flows
//! through [`dispatch`](MockInterceptor::dispatch), which is the *only* place
//! events are produced.
//!
//! ## Emission points
//! ```text
//! dispatch(request)
//!   │
//!   ├─► emit request:start            (record built, matching not started)
//!   ├─► consult handlers (first positive verdict wins)
//!   │     ├─ matched ──► emit request:match
//!   │     │              respond() ─► apply delay ─► finalize record
//!   │     │              emit response:mocked ─► outcome Mocked
//!   │     └─ no match ─► emit request:unhandled
//!   │                    ├─ policy Error ──► fail (no response event)
//!   │                    └─ Bypass/Warn ──► transport.forward()
//!   │                          ├─ Ok  ─► finalize ─► emit response:bypass
//!   │                          │         ─► outcome Bypassed
//!   │                          └─ Err ─► fail
//!   └─► emit request:end              (always, success or failure, last)
//! ```
//!
//! ## Rules
//! - Per request, events fire strictly in the order above; each emission is
//!   awaited before the next, so no listener ever observes them reordered.
//! - Requests are independent: `dispatch` takes `&self` and any number of
//!   calls may be in flight, interleaving freely. The only shared state is
//!   the listener registry and the handler list, both snapshot on read.
//! - Listeners observe, nothing more: their failures are isolated inside the
//!   bus and dispatch's control flow never depends on them.

use std::sync::{Arc, PoisonError, RwLock};

use tokio_util::sync::CancellationToken;

use crate::error::InterceptError;
use crate::events::{Emitter, LifecycleEvent, LifecycleEvents};
use crate::http::{RequestRecord, ResponseRecord};
use crate::intercept::{InterceptorConfig, RequestHandler, Transport, UnhandledPolicy};

/// How a dispatched request was answered.
#[derive(Clone, Debug)]
pub enum DispatchOutcome {
    /// A handler produced the response.
    Mocked(Arc<ResponseRecord>),
    /// The passthrough transport produced the response.
    Bypassed(Arc<ResponseRecord>),
}

impl DispatchOutcome {
    /// The response, whatever produced it.
    pub fn response(&self) -> &Arc<ResponseRecord> {
        match self {
            DispatchOutcome::Mocked(response) | DispatchOutcome::Bypassed(response) => response,
        }
    }

    /// `true` when a handler answered the request.
    pub fn is_mocked(&self) -> bool {
        matches!(self, DispatchOutcome::Mocked(_))
    }
}

/// Request-interception engine with observe-only life-cycle events.
///
/// Built via [`MockInterceptor::builder`]. Shared state is internally locked;
/// methods take `&self`, so wrap it in an `Arc` (or borrow it) to dispatch
/// from several tasks at once.
pub struct MockInterceptor {
    config: InterceptorConfig,
    initial_handlers: Vec<Arc<dyn RequestHandler>>,
    handlers: RwLock<Vec<Arc<dyn RequestHandler>>>,
    transport: Option<Arc<dyn Transport>>,
    emitter: Emitter,
    events: LifecycleEvents,
    disposed: CancellationToken,
}

impl MockInterceptor {
    /// Starts building an interceptor with the given configuration.
    pub fn builder(config: InterceptorConfig) -> InterceptorBuilder {
        InterceptorBuilder {
            config,
            handlers: Vec::new(),
            transport: None,
        }
    }

    /// The observe-only event surface.
    ///
    /// Clones share one listener table; hand them to whoever wants to watch.
    /// Nothing reachable from the returned value can emit or influence
    /// dispatch.
    pub fn events(&self) -> LifecycleEvents {
        self.events.clone()
    }

    /// Prepends a runtime handler, taking precedence over existing ones.
    ///
    /// Visible to dispatches that start after this call; an in-flight
    /// dispatch keeps the handler snapshot it started with.
    pub fn use_handler(&self, handler: Arc<dyn RequestHandler>) {
        let mut handlers = self
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        handlers.insert(0, handler);
    }

    /// Drops runtime handlers, restoring the set the interceptor was built
    /// with. Idempotent.
    pub fn reset_handlers(&self) {
        let mut handlers = self
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *handlers = self.initial_handlers.clone();
    }

    /// Permanently turns mocking off.
    ///
    /// Subsequent dispatches forward straight through the transport and emit
    /// no events. Irreversible; build a new interceptor to mock again.
    pub fn dispose(&self) {
        self.disposed.cancel();
    }

    /// `true` once [`dispose`](Self::dispose) has been called.
    pub fn is_disposed(&self) -> bool {
        self.disposed.is_cancelled()
    }

    /// Runs one intercepted request through the pipeline.
    ///
    /// Emits the request's life-cycle events at the documented points and
    /// returns the response to send. `request:end` fires on every path,
    /// including failures, before this method returns.
    ///
    /// # Errors
    /// - [`InterceptError::UnhandledRequest`] under
    ///   [`UnhandledPolicy::Error`] when no handler matches;
    /// - [`InterceptError::NoTransport`] when a passthrough is needed but no
    ///   transport was configured;
    /// - [`InterceptError::Transport`] when the passthrough round-trip fails.
    pub async fn dispatch(
        &self,
        request: RequestRecord,
    ) -> Result<DispatchOutcome, InterceptError> {
        let request = Arc::new(request);

        if self.is_disposed() {
            // Mocking is off: hand straight to the network, observe nothing.
            let transport = self.transport()?;
            let parts = transport.forward(Arc::clone(&request)).await?;
            return Ok(DispatchOutcome::Bypassed(Arc::new(
                parts.into_record(request.id()),
            )));
        }

        self.emitter
            .emit(LifecycleEvent::RequestStart {
                request: Arc::clone(&request),
            })
            .await;

        let outcome = self.resolve(&request).await;

        self.emitter
            .emit(LifecycleEvent::RequestEnd {
                request: Arc::clone(&request),
            })
            .await;

        outcome
    }

    /// Everything between `request:start` and `request:end`.
    async fn resolve(
        &self,
        request: &Arc<RequestRecord>,
    ) -> Result<DispatchOutcome, InterceptError> {
        match self.find_handler(request) {
            Some(handler) => {
                self.emitter
                    .emit(LifecycleEvent::RequestMatch {
                        request: Arc::clone(request),
                    })
                    .await;

                let parts = handler.respond(Arc::clone(request)).await;
                let delay = parts.delay().unwrap_or(self.config.delay);
                if let Some(pause) = delay.sample() {
                    tokio::time::sleep(pause).await;
                }

                let response = Arc::new(parts.into_record(request.id()));
                self.emitter
                    .emit(LifecycleEvent::ResponseMocked {
                        response: Arc::clone(&response),
                        request_id: request.id(),
                    })
                    .await;
                Ok(DispatchOutcome::Mocked(response))
            }
            None => {
                self.emitter
                    .emit(LifecycleEvent::RequestUnhandled {
                        request: Arc::clone(request),
                    })
                    .await;

                match self.config.on_unhandled {
                    UnhandledPolicy::Error => Err(InterceptError::UnhandledRequest {
                        method: request.method(),
                        url: request.url().to_string(),
                    }),
                    UnhandledPolicy::Warn => {
                        tracing::warn!(
                            method = %request.method(),
                            url = request.url(),
                            request_id = %request.id(),
                            "no handler matched intercepted request, passing through"
                        );
                        self.bypass(request).await
                    }
                    UnhandledPolicy::Bypass => self.bypass(request).await,
                }
            }
        }
    }

    /// Forwards through the transport and emits `response:bypass`.
    async fn bypass(
        &self,
        request: &Arc<RequestRecord>,
    ) -> Result<DispatchOutcome, InterceptError> {
        let transport = self.transport()?;
        let parts = transport.forward(Arc::clone(request)).await?;
        let response = Arc::new(parts.into_record(request.id()));
        self.emitter
            .emit(LifecycleEvent::ResponseBypass {
                response: Arc::clone(&response),
                request_id: request.id(),
            })
            .await;
        Ok(DispatchOutcome::Bypassed(response))
    }

    /// First handler claiming the request, from a snapshot of the list.
    fn find_handler(&self, request: &RequestRecord) -> Option<Arc<dyn RequestHandler>> {
        let snapshot: Vec<Arc<dyn RequestHandler>> = {
            let handlers = self
                .handlers
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            handlers.clone()
        };
        snapshot.into_iter().find(|h| h.matches(request))
    }

    fn transport(&self) -> Result<&Arc<dyn Transport>, InterceptError> {
        self.transport.as_ref().ok_or(InterceptError::NoTransport)
    }
}

/// Builder for constructing a [`MockInterceptor`].
pub struct InterceptorBuilder {
    config: InterceptorConfig,
    handlers: Vec<Arc<dyn RequestHandler>>,
    transport: Option<Arc<dyn Transport>>,
}

impl InterceptorBuilder {
    /// Appends one handler. Consulted after previously added handlers.
    pub fn with_handler(mut self, handler: Arc<dyn RequestHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Appends a batch of handlers, keeping their order.
    pub fn with_handlers(
        mut self,
        handlers: impl IntoIterator<Item = Arc<dyn RequestHandler>>,
    ) -> Self {
        self.handlers.extend(handlers);
        self
    }

    /// Sets the passthrough transport for bypassed requests.
    ///
    /// Without one, dispatches that need a passthrough fail with
    /// [`InterceptError::NoTransport`].
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the interceptor and wires up a fresh event bus.
    pub fn build(self) -> MockInterceptor {
        let (emitter, events) = Emitter::new();
        MockInterceptor {
            config: self.config,
            handlers: RwLock::new(self.handlers.clone()),
            initial_handlers: self.handlers,
            transport: self.transport,
            emitter,
            events,
            disposed: CancellationToken::new(),
        }
    }
}
