//! # Immutable snapshot of a response about to be sent.
//!
//! A [`ResponseRecord`] is finalized by the interception pipeline immediately
//! before the corresponding `response:*` event fires, and carries the
//! [`RequestId`] of the request it answers. Only the pipeline can construct
//! one; everything else observes it read-only.

use std::sync::Arc;

use crate::http::{Headers, RequestId};

/// Read-only snapshot of an outgoing response.
///
/// The body is a materialized shared buffer: a listener reading it and the
/// embedder sending it downstream observe the same bytes independently.
#[derive(Clone, Debug)]
pub struct ResponseRecord {
    request_id: RequestId,
    status: u16,
    headers: Headers,
    body: Arc<[u8]>,
}

impl ResponseRecord {
    /// Finalizes a response snapshot for the given request.
    ///
    /// Crate-internal: records are only minted by the pipeline, at the moment
    /// the response is handed over for sending.
    pub(crate) fn new(
        status: u16,
        headers: Headers,
        body: Arc<[u8]>,
        request_id: RequestId,
    ) -> Self {
        Self {
            request_id,
            status,
            headers,
            body,
        }
    }

    /// Identifier of the request this response answers.
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Response headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Response body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// A shared handle to the body buffer, independently readable by any
    /// number of consumers.
    pub fn body_shared(&self) -> Arc<[u8]> {
        Arc::clone(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Method, RequestRecord};

    #[test]
    fn test_record_carries_request_id() {
        let req = RequestRecord::new(Method::Get, "https://example.com/");
        let res = ResponseRecord::new(200, Headers::new(), Arc::from(&b"ok"[..]), req.id());
        assert_eq!(res.request_id(), req.id());
        assert!(res.is_success());
    }

    #[test]
    fn test_body_readable_repeatedly() {
        let req = RequestRecord::new(Method::Get, "https://example.com/");
        let res = ResponseRecord::new(200, Headers::new(), Arc::from(&b"bytes"[..]), req.id());
        assert_eq!(res.body(), b"bytes");
        assert_eq!(res.body(), b"bytes", "reading must not consume the body");
        assert_eq!(&*res.body_shared(), b"bytes");
    }
}
