//! # Stateful listener that records each request's event sequence.
//!
//! [`TrafficRecorder`] maintains an in-memory table from [`RequestId`] to the
//! ordered list of event names observed for that request. The bus performs no
//! cross-event storage by design, so this is where correlation lives when a
//! consumer wants it: in listener code, keyed by the identifier every payload
//! carries.
//!
//! ## Example
//! ```no_run
//! # use mockwire::{MockInterceptor, TrafficRecorder};
//! # async fn demo(interceptor: &MockInterceptor) {
//! let recorder = TrafficRecorder::new();
//! recorder.attach(&interceptor.events()).expect("event names are canonical");
//!
//! // ... dispatch traffic ...
//!
//! for id in recorder.request_ids().await {
//!     println!("{id}: {:?}", recorder.sequence(id).await);
//! }
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::BusError;
use crate::events::{EventName, LifecycleEvent, LifecycleEvents, Listener, ListenerRef};
use crate::http::RequestId;

/// Records the event sequence of every observed request.
///
/// Thread-safe and cloneable: clones share the same table.
#[derive(Clone, Default)]
pub struct TrafficRecorder {
    inner: Arc<Mutex<HashMap<RequestId, Vec<EventName>>>>,
}

impl TrafficRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers this recorder for all six event names on the given surface.
    ///
    /// Returns the [`ListenerRef`] used for registration, which is the handle
    /// to pass to `remove_listener` for detaching later.
    pub fn attach(&self, events: &LifecycleEvents) -> Result<ListenerRef, BusError> {
        let listener: ListenerRef = Arc::new(self.clone());
        for name in EventName::ALL {
            events.on(name.as_str(), Arc::clone(&listener))?;
        }
        Ok(listener)
    }

    /// The event sequence observed for `id`, in emission order.
    ///
    /// Empty when the identifier was never observed.
    pub async fn sequence(&self, id: RequestId) -> Vec<EventName> {
        let table = self.inner.lock().await;
        table.get(&id).cloned().unwrap_or_default()
    }

    /// Identifiers of all observed requests, in no particular order.
    pub async fn request_ids(&self) -> Vec<RequestId> {
        let table = self.inner.lock().await;
        table.keys().copied().collect()
    }

    /// `true` once `id`'s life is over (its sequence ends with
    /// [`EventName::RequestEnd`]).
    pub async fn is_complete(&self, id: RequestId) -> bool {
        let table = self.inner.lock().await;
        table
            .get(&id)
            .and_then(|seq| seq.last())
            .is_some_and(|last| *last == EventName::RequestEnd)
    }

    /// Forgets everything recorded so far.
    pub async fn clear(&self) {
        self.inner.lock().await.clear();
    }
}

#[async_trait]
impl Listener for TrafficRecorder {
    async fn on_event(&self, event: &LifecycleEvent) {
        let mut table = self.inner.lock().await;
        table
            .entry(event.request_id())
            .or_default()
            .push(event.name());
    }

    fn name(&self) -> &'static str {
        "traffic-recorder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Method, RequestRecord};

    #[tokio::test]
    async fn test_records_per_request_in_order() {
        let recorder = TrafficRecorder::new();
        let request = Arc::new(RequestRecord::new(Method::Get, "https://example.com/"));
        let id = request.id();

        recorder
            .on_event(&LifecycleEvent::RequestStart {
                request: Arc::clone(&request),
            })
            .await;
        recorder
            .on_event(&LifecycleEvent::RequestMatch {
                request: Arc::clone(&request),
            })
            .await;

        assert_eq!(
            recorder.sequence(id).await,
            vec![EventName::RequestStart, EventName::RequestMatch]
        );
        assert!(!recorder.is_complete(id).await);

        recorder
            .on_event(&LifecycleEvent::RequestEnd { request })
            .await;
        assert!(recorder.is_complete(id).await);
    }

    #[tokio::test]
    async fn test_unknown_id_yields_empty_sequence() {
        let recorder = TrafficRecorder::new();
        let stray = RequestRecord::new(Method::Get, "https://example.com/");
        assert!(recorder.sequence(stray.id()).await.is_empty());
        assert!(!recorder.is_complete(stray.id()).await);
    }

    #[tokio::test]
    async fn test_clear_forgets_history() {
        let recorder = TrafficRecorder::new();
        let request = Arc::new(RequestRecord::new(Method::Get, "https://example.com/"));
        recorder
            .on_event(&LifecycleEvent::RequestStart {
                request: Arc::clone(&request),
            })
            .await;
        assert_eq!(recorder.request_ids().await.len(), 1);

        recorder.clear().await;
        assert!(recorder.request_ids().await.is_empty());
    }
}
