//! # Event bus: public registration facade, crate-private emission.
//!
//! The bus is split into two capability halves over one shared
//! [`ListenerRegistry`]:
//!
//! ```text
//! Application code:                       Interception pipeline:
//!   LifecycleEvents                         Emitter (pub(crate))
//!     ├─ on()                                 └─ emit(LifecycleEvent)
//!     ├─ remove_listener()                         │ snapshot listeners
//!     └─ remove_all_listeners()                    │ invoke in registration order
//!            │                                     │ isolate panics, keep going
//!            └──────────► ListenerRegistry ◄───────┘
//! ```
//!
//! Application code can only hold [`LifecycleEvents`], so emitting is
//! structurally impossible from the outside: observers are post-factum by
//! construction, not by convention.
//!
//! ## Rules
//! - **Snapshot fan-out**: the delivery set of an emission is fixed the moment
//!   `emit` starts; reentrant `on`/`remove_listener` calls from a listener
//!   affect only later emissions.
//! - **Failure isolation**: a panicking listener is caught, reported via
//!   `tracing::warn!`, and the remaining snapshot still runs. Emission never
//!   returns an error to the pipeline.
//! - **Fire-and-forget**: no delivery guarantees, no buffering, no replay for
//!   late registrations.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use crate::error::BusError;
use crate::events::registry::ListenerRegistry;
use crate::events::{EventName, LifecycleEvent, ListenerRef};

/// Public, observe-only surface of the event bus.
///
/// Cheap to clone (internally an `Arc` over the shared registry); every clone
/// operates on the same listener table.
///
/// Obtained from [`MockInterceptor::events`](crate::MockInterceptor::events).
/// There is no `emit` here and no way to reach one through this type.
#[derive(Clone)]
pub struct LifecycleEvents {
    registry: Arc<ListenerRegistry>,
}

impl LifecycleEvents {
    /// Registers `listener` under `event_name`.
    ///
    /// Duplicate registration of the identical `Arc` is permitted; the
    /// listener then runs once per registration.
    ///
    /// # Errors
    /// [`BusError::InvalidEventName`] when `event_name` is outside the closed
    /// set; nothing is registered in that case.
    pub fn on(&self, event_name: &str, listener: ListenerRef) -> Result<(), BusError> {
        let name: EventName = event_name.parse()?;
        self.registry.add(name, listener);
        Ok(())
    }

    /// Removes the first registration of `listener` under `event_name`.
    ///
    /// Identity match (`Arc::ptr_eq`). Removing a listener that was never
    /// registered is a no-op, not an error.
    ///
    /// # Errors
    /// [`BusError::InvalidEventName`] when `event_name` is outside the closed
    /// set.
    pub fn remove_listener(
        &self,
        event_name: &str,
        listener: &ListenerRef,
    ) -> Result<(), BusError> {
        let name: EventName = event_name.parse()?;
        self.registry.remove(name, listener);
        Ok(())
    }

    /// Clears listeners for one event name, or for every name when
    /// `event_name` is `None`. Idempotent.
    ///
    /// # Errors
    /// [`BusError::InvalidEventName`] when a given `event_name` is outside the
    /// closed set.
    pub fn remove_all_listeners(&self, event_name: Option<&str>) -> Result<(), BusError> {
        match event_name {
            Some(raw) => {
                let name: EventName = raw.parse()?;
                self.registry.remove_all(Some(name));
            }
            None => self.registry.remove_all(None),
        }
        Ok(())
    }

    /// Number of registrations currently held under `event_name`.
    ///
    /// # Errors
    /// [`BusError::InvalidEventName`] when `event_name` is outside the closed
    /// set.
    pub fn listener_count(&self, event_name: &str) -> Result<usize, BusError> {
        let name: EventName = event_name.parse()?;
        Ok(self.registry.count(name))
    }
}

/// Emitting half of the bus, held only by the interception pipeline.
#[derive(Clone)]
pub(crate) struct Emitter {
    registry: Arc<ListenerRegistry>,
}

impl Emitter {
    /// Creates a fresh bus and returns both capability halves.
    pub(crate) fn new() -> (Emitter, LifecycleEvents) {
        let registry = Arc::new(ListenerRegistry::new());
        (
            Emitter {
                registry: Arc::clone(&registry),
            },
            LifecycleEvents { registry },
        )
    }

    /// Delivers `event` to the current snapshot of listeners for its name.
    ///
    /// Listeners run sequentially, in registration order, each receiving the
    /// same payload reference. Returns once every snapshot listener ran (or
    /// panicked and was isolated). No return value: nothing a listener does
    /// can feed back into the pipeline.
    pub(crate) async fn emit(&self, event: LifecycleEvent) {
        let snapshot = self.registry.snapshot(event.name());
        for listener in snapshot {
            let fut = listener.on_event(&event);
            if let Err(panic_err) = AssertUnwindSafe(fut).catch_unwind().await {
                let info = {
                    let any = &*panic_err;
                    if let Some(msg) = any.downcast_ref::<&'static str>() {
                        (*msg).to_string()
                    } else if let Some(msg) = any.downcast_ref::<String>() {
                        msg.clone()
                    } else {
                        "unknown panic".to_string()
                    }
                };
                tracing::warn!(
                    listener = listener.name(),
                    event = event.name().as_str(),
                    request_id = %event.request_id(),
                    panic = %info,
                    "listener panicked during emission; continuing with remaining listeners"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Listener;
    use crate::http::{Method, RequestRecord};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn start_event() -> LifecycleEvent {
        LifecycleEvent::RequestStart {
            request: Arc::new(RequestRecord::new(Method::Get, "https://example.com/")),
        }
    }

    struct Counting {
        hits: AtomicUsize,
    }

    impl Counting {
        fn arc() -> Arc<Self> {
            Arc::new(Self {
                hits: AtomicUsize::new(0),
            })
        }
        fn hits(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Listener for Counting {
        async fn on_event(&self, _event: &LifecycleEvent) {
            self.hits.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct Tagging {
        tag: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl Listener for Tagging {
        async fn on_event(&self, _event: &LifecycleEvent) {
            self.log
                .lock()
                .expect("tag log lock")
                .push(self.tag);
        }
    }

    struct Panicking;

    #[async_trait]
    impl Listener for Panicking {
        async fn on_event(&self, _event: &LifecycleEvent) {
            panic!("listener blew up");
        }
    }

    /// Registers another listener while an emission is in flight.
    struct SelfExpanding {
        events: LifecycleEvents,
        added: Arc<Counting>,
    }

    #[async_trait]
    impl Listener for SelfExpanding {
        async fn on_event(&self, _event: &LifecycleEvent) {
            self.events
                .on("request:start", self.added.clone())
                .expect("valid name");
        }
    }

    #[tokio::test]
    async fn test_invalid_name_registers_nothing() {
        let (_emitter, events) = Emitter::new();
        let listener = Counting::arc();

        let err = events
            .on("request:began", listener)
            .expect_err("unknown name must fail");
        assert_eq!(err.as_label(), "invalid_event_name");
        for name in EventName::ALL {
            assert_eq!(events.listener_count(name.as_str()).expect("known"), 0);
        }
    }

    #[tokio::test]
    async fn test_listeners_run_in_registration_order() {
        let (emitter, events) = Emitter::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            events
                .on(
                    "request:start",
                    Arc::new(Tagging {
                        tag,
                        log: Arc::clone(&log),
                    }),
                )
                .expect("valid name");
        }

        emitter.emit(start_event()).await;
        assert_eq!(
            *log.lock().expect("tag log lock"),
            vec!["first", "second", "third"]
        );
    }

    #[tokio::test]
    async fn test_duplicate_registration_runs_once_per_registration() {
        let (emitter, events) = Emitter::new();
        let listener = Counting::arc();
        let handle: ListenerRef = listener.clone();
        events.on("request:start", handle.clone()).expect("valid");
        events.on("request:start", handle.clone()).expect("valid");

        emitter.emit(start_event()).await;
        assert_eq!(listener.hits(), 2);

        events
            .remove_listener("request:start", &handle)
            .expect("valid");
        emitter.emit(start_event()).await;
        assert_eq!(listener.hits(), 3, "one registration must remain");
    }

    #[tokio::test]
    async fn test_removed_listener_gets_no_further_deliveries() {
        let (emitter, events) = Emitter::new();
        let kept = Counting::arc();
        let removed = Counting::arc();
        let removed_ref: ListenerRef = removed.clone();

        events.on("request:start", removed_ref.clone()).expect("valid");
        events.on("request:start", kept.clone()).expect("valid");
        events
            .remove_listener("request:start", &removed_ref)
            .expect("valid");

        emitter.emit(start_event()).await;
        assert_eq!(removed.hits(), 0);
        assert_eq!(kept.hits(), 1, "other listeners must be unaffected");
    }

    #[tokio::test]
    async fn test_panicking_listener_does_not_stop_the_rest() {
        let (emitter, events) = Emitter::new();
        let after = Counting::arc();
        events.on("request:start", Arc::new(Panicking)).expect("valid");
        events.on("request:start", after.clone()).expect("valid");

        emitter.emit(start_event()).await;
        assert_eq!(after.hits(), 1, "listener after the panicking one must still run");
    }

    #[tokio::test]
    async fn test_reentrant_registration_misses_current_emission() {
        let (emitter, events) = Emitter::new();
        let added = Counting::arc();
        events
            .on(
                "request:start",
                Arc::new(SelfExpanding {
                    events: events.clone(),
                    added: added.clone(),
                }),
            )
            .expect("valid");

        emitter.emit(start_event()).await;
        assert_eq!(added.hits(), 0, "snapshot was taken before the registration");

        emitter.emit(start_event()).await;
        assert_eq!(added.hits(), 1, "next emission sees the new listener");
    }

    #[tokio::test]
    async fn test_remove_all_scoped_spares_other_names() {
        let (emitter, events) = Emitter::new();
        let on_start = Counting::arc();
        let on_match = Counting::arc();
        events.on("request:start", on_start.clone()).expect("valid");
        events.on("request:match", on_match.clone()).expect("valid");

        events
            .remove_all_listeners(Some("request:start"))
            .expect("valid");
        emitter.emit(start_event()).await;
        emitter
            .emit(LifecycleEvent::RequestMatch {
                request: Arc::new(RequestRecord::new(Method::Get, "https://example.com/")),
            })
            .await;

        assert_eq!(on_start.hits(), 0);
        assert_eq!(on_match.hits(), 1);
    }
}
