//! # Typed event payloads.
//!
//! One variant per [`EventName`], each carrying exactly the data that event
//! exposes: a shared [`RequestRecord`] for the `request:*` family, a shared
//! [`ResponseRecord`] plus the request identifier for the `response:*` family.
//!
//! Payloads are read-only views. A listener receives `&LifecycleEvent`,
//! records are behind `Arc`, and no setter exists anywhere on the payload
//! path, so observing an event cannot affect the request it describes.
//!
//! ## Correlation
//! Every event of one request carries the same [`RequestId`], and that
//! identifier is the *only* thing tying the events together. The bus stores
//! nothing between emissions; see
//! [`TrafficRecorder`](crate::TrafficRecorder) for a correlation table built
//! on the listener side.

use std::sync::Arc;

use crate::events::EventName;
use crate::http::{RequestId, RequestRecord, ResponseRecord};

/// A life-cycle event together with its payload.
#[derive(Clone, Debug)]
pub enum LifecycleEvent {
    /// Request observed, handler matching has not started yet.
    RequestStart {
        /// Snapshot of the intercepted request.
        request: Arc<RequestRecord>,
    },
    /// The matching verdict was positive.
    RequestMatch {
        /// Snapshot of the matched request.
        request: Arc<RequestRecord>,
    },
    /// The matching verdict was negative.
    RequestUnhandled {
        /// Snapshot of the unmatched request.
        request: Arc<RequestRecord>,
    },
    /// Terminal event, fires exactly once per request, always last.
    ///
    /// The right moment for observers and collaborators to release any
    /// per-request bookkeeping they hold.
    RequestEnd {
        /// Snapshot of the request whose life is over.
        request: Arc<RequestRecord>,
    },
    /// A mocked response is about to be handed over for sending.
    ResponseMocked {
        /// Snapshot of the finalized response.
        response: Arc<ResponseRecord>,
        /// Identifier of the request being answered.
        request_id: RequestId,
    },
    /// A passthrough response is about to be handed over for sending.
    ResponseBypass {
        /// Snapshot of the finalized response.
        response: Arc<ResponseRecord>,
        /// Identifier of the request being answered.
        request_id: RequestId,
    },
}

impl LifecycleEvent {
    /// The name this event fires under.
    pub fn name(&self) -> EventName {
        match self {
            LifecycleEvent::RequestStart { .. } => EventName::RequestStart,
            LifecycleEvent::RequestMatch { .. } => EventName::RequestMatch,
            LifecycleEvent::RequestUnhandled { .. } => EventName::RequestUnhandled,
            LifecycleEvent::RequestEnd { .. } => EventName::RequestEnd,
            LifecycleEvent::ResponseMocked { .. } => EventName::ResponseMocked,
            LifecycleEvent::ResponseBypass { .. } => EventName::ResponseBypass,
        }
    }

    /// The correlation identifier, uniform across all variants.
    pub fn request_id(&self) -> RequestId {
        match self {
            LifecycleEvent::RequestStart { request }
            | LifecycleEvent::RequestMatch { request }
            | LifecycleEvent::RequestUnhandled { request }
            | LifecycleEvent::RequestEnd { request } => request.id(),
            LifecycleEvent::ResponseMocked { request_id, .. }
            | LifecycleEvent::ResponseBypass { request_id, .. } => *request_id,
        }
    }

    /// The request snapshot, for `request:*` events.
    pub fn request(&self) -> Option<&Arc<RequestRecord>> {
        match self {
            LifecycleEvent::RequestStart { request }
            | LifecycleEvent::RequestMatch { request }
            | LifecycleEvent::RequestUnhandled { request }
            | LifecycleEvent::RequestEnd { request } => Some(request),
            _ => None,
        }
    }

    /// The response snapshot, for `response:*` events.
    pub fn response(&self) -> Option<&Arc<ResponseRecord>> {
        match self {
            LifecycleEvent::ResponseMocked { response, .. }
            | LifecycleEvent::ResponseBypass { response, .. } => Some(response),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;

    #[test]
    fn test_name_mapping() {
        let request = Arc::new(RequestRecord::new(Method::Get, "https://example.com/"));
        let ev = LifecycleEvent::RequestStart { request };
        assert_eq!(ev.name(), EventName::RequestStart);
        assert!(ev.request().is_some());
        assert!(ev.response().is_none());
    }

    #[test]
    fn test_request_id_is_uniform_across_variants() {
        let request = Arc::new(RequestRecord::new(Method::Get, "https://example.com/"));
        let id = request.id();

        let start = LifecycleEvent::RequestStart { request: Arc::clone(&request) };
        let end = LifecycleEvent::RequestEnd { request };
        assert_eq!(start.request_id(), id);
        assert_eq!(end.request_id(), id);
    }
}
