//! # Immutable snapshot of an intercepted request.
//!
//! A [`RequestRecord`] is built once, at the moment a request is observed by
//! the interception pipeline, and never mutated afterwards. Constructing one
//! mints the [`RequestId`] that correlates every life-cycle event of the
//! request.
//!
//! ## Example
//! ```
//! use mockwire::{Method, RequestRecord};
//!
//! let req = RequestRecord::new(Method::Post, "https://api.example.com/items")
//!     .with_header("content-type", "application/json")
//!     .with_body(r#"{"name":"widget"}"#);
//!
//! assert_eq!(req.method(), Method::Post);
//! assert_eq!(req.headers().get("Content-Type"), Some("application/json"));
//! assert!(!req.body().is_empty());
//! ```

use std::sync::Arc;

use crate::http::{Headers, Method, RequestId};

/// Read-only snapshot of an intercepted request.
///
/// Created by the code that observes the request, via [`RequestRecord::new`]
/// plus `with_*` builders, then handed to
/// [`MockInterceptor::dispatch`](crate::MockInterceptor::dispatch). Event
/// payloads share it behind `Arc`; listeners only see getters.
#[derive(Clone, Debug)]
pub struct RequestRecord {
    id: RequestId,
    method: Method,
    url: String,
    headers: Headers,
    body: Arc<[u8]>,
}

impl RequestRecord {
    /// Creates a record for a freshly observed request and mints its
    /// correlation identifier.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            id: RequestId::new(),
            method,
            url: url.into(),
            headers: Headers::new(),
            body: Arc::from(&[][..]),
        }
    }

    /// Appends a request header.
    #[inline]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Attaches the request body (copied into a shared buffer).
    #[inline]
    pub fn with_body(mut self, body: impl AsRef<[u8]>) -> Self {
        self.body = Arc::from(body.as_ref());
        self
    }

    /// The correlation identifier minted at construction.
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// The request method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The full request URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Request body bytes.
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

    #[test]
    fn test_each_record_gets_its_own_id() {
        let a = RequestRecord::new(Method::Get, "https://example.com/a");
        let b = RequestRecord::new(Method::Get, "https://example.com/a");
        assert_ne!(a.id(), b.id(), "identical requests must still correlate separately");
    }

    #[test]
    fn test_body_defaults_to_empty() {
        let req = RequestRecord::new(Method::Get, "https://example.com/");
        assert!(req.body().is_empty());
    }

    #[test]
    fn test_body_is_shared_not_copied_per_reader() {
        let req = RequestRecord::new(Method::Post, "https://example.com/").with_body("payload");
        let first = req.body_shared();
        let second = req.body_shared();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(&*first, b"payload");
    }
}
