//! # Request handlers: the matching and response-construction seam.
//!
//! A [`RequestHandler`] answers two questions the pipeline asks in order:
//! does this request belong to you ([`matches`](RequestHandler::matches), the
//! match verdict), and what should the mocked response be
//! ([`respond`](RequestHandler::respond)). The verdict alone decides between
//! the `request:match` and `request:unhandled` events; the response is built
//! only after a positive verdict.
//!
//! [`HandlerFn`] wraps a matcher closure and an async responder closure for
//! the common case, mirroring how most handlers are a predicate plus a
//! template.

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::http::{Headers, RequestId, RequestRecord, ResponseRecord};
use crate::intercept::ResponseDelay;

/// A mocked (or forwarded) response under construction.
///
/// Built by handlers and transports; finalized into an immutable
/// [`ResponseRecord`] by the pipeline at send time.
///
/// # Example
/// ```
/// use mockwire::ResponseParts;
///
/// let parts = ResponseParts::new(201)
///     .with_header("content-type", "application/json")
///     .with_body(r#"{"id":7}"#);
///
/// assert_eq!(parts.status(), 201);
/// assert_eq!(parts.headers().get("Content-Type"), Some("application/json"));
/// ```
#[derive(Clone, Debug)]
pub struct ResponseParts {
    status: u16,
    headers: Headers,
    body: Arc<[u8]>,
    delay: Option<ResponseDelay>,
}

impl ResponseParts {
    /// Starts a response with the given status, empty headers, empty body.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: Arc::from(&[][..]),
            delay: None,
        }
    }

    /// Appends a response header.
    #[inline]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Attaches the response body (copied into a shared buffer).
    #[inline]
    pub fn with_body(mut self, body: impl AsRef<[u8]>) -> Self {
        self.body = Arc::from(body.as_ref());
        self
    }

    /// Overrides the configured latency for this response only.
    ///
    /// Honored on the mocked path; ignored for passthrough responses, which
    /// carry real latency already.
    #[inline]
    pub fn with_delay(mut self, delay: ResponseDelay) -> Self {
        self.delay = Some(delay);
        self
    }

    /// The status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The headers collected so far.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// The body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The per-response latency override, if any.
    pub fn delay(&self) -> Option<ResponseDelay> {
        self.delay
    }

    /// Freezes these parts into the immutable record the events expose.
    pub(crate) fn into_record(self, request_id: RequestId) -> ResponseRecord {
        ResponseRecord::new(self.status, self.headers, self.body, request_id)
    }
}

/// # A mock handler: match verdict plus response construction.
///
/// Handlers are consulted in registration order; the first positive
/// [`matches`](RequestHandler::matches) verdict wins and its
/// [`respond`](RequestHandler::respond) builds the mocked response.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use mockwire::{Method, RequestHandler, RequestRecord, ResponseParts};
///
/// struct Health;
///
/// #[async_trait]
/// impl RequestHandler for Health {
///     fn name(&self) -> &str { "health" }
///
///     fn matches(&self, request: &RequestRecord) -> bool {
///         request.method() == Method::Get && request.url().ends_with("/health")
///     }
///
///     async fn respond(&self, _request: Arc<RequestRecord>) -> ResponseParts {
///         ResponseParts::new(200).with_body("ok")
///     }
/// }
/// ```
#[async_trait]
pub trait RequestHandler: Send + Sync + 'static {
    /// Returns a stable, human-readable handler name.
    fn name(&self) -> &str;

    /// The match verdict: `true` claims the request.
    ///
    /// Must be cheap and side-effect free; it runs for every intercepted
    /// request until some handler claims it.
    fn matches(&self, request: &RequestRecord) -> bool;

    /// Builds the mocked response for a request this handler claimed.
    async fn respond(&self, request: Arc<RequestRecord>) -> ResponseParts;
}

/// Function-backed handler implementation.
///
/// Wraps a matcher closure and a responder closure that *creates* a new
/// future per claimed request.
///
/// ## Example
/// ```
/// use mockwire::{HandlerFn, Method, RequestHandler, ResponseParts};
///
/// let handler = HandlerFn::arc(
///     "get-user",
///     |req| req.method() == Method::Get && req.url().contains("/user/"),
///     |_req| async { ResponseParts::new(200).with_body(r#"{"name":"mock"}"#) },
/// );
/// assert_eq!(handler.name(), "get-user");
/// ```
pub struct HandlerFn<M, R> {
    name: Cow<'static, str>,
    matcher: M,
    responder: R,
}

impl<M, R> HandlerFn<M, R> {
    /// Creates a new function-backed handler.
    ///
    /// Prefer [`HandlerFn::arc`] when you immediately need an
    /// `Arc<dyn RequestHandler>`.
    pub fn new<Fut>(name: impl Into<Cow<'static, str>>, matcher: M, responder: R) -> Self
    where
        M: Fn(&RequestRecord) -> bool + Send + Sync + 'static,
        R: Fn(Arc<RequestRecord>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ResponseParts> + Send + 'static,
    {
        Self {
            name: name.into(),
            matcher,
            responder,
        }
    }

    /// Creates the handler and returns it as a shared trait object.
    pub fn arc<Fut>(name: impl Into<Cow<'static, str>>, matcher: M, responder: R) -> Arc<Self>
    where
        M: Fn(&RequestRecord) -> bool + Send + Sync + 'static,
        R: Fn(Arc<RequestRecord>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ResponseParts> + Send + 'static,
    {
        Arc::new(Self::new(name, matcher, responder))
    }
}

#[async_trait]
impl<M, R, Fut> RequestHandler for HandlerFn<M, R>
where
    M: Fn(&RequestRecord) -> bool + Send + Sync + 'static,
    R: Fn(Arc<RequestRecord>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ResponseParts> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, request: &RequestRecord) -> bool {
        (self.matcher)(request)
    }

    async fn respond(&self, request: Arc<RequestRecord>) -> ResponseParts {
        (self.responder)(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;

    #[tokio::test]
    async fn test_handler_fn_matches_and_responds() {
        let handler = HandlerFn::arc(
            "items",
            |req: &RequestRecord| req.url().ends_with("/items"),
            |req: Arc<RequestRecord>| async move {
                ResponseParts::new(200).with_body(format!("for {}", req.method()))
            },
        );

        let hit = RequestRecord::new(Method::Get, "https://example.com/items");
        let miss = RequestRecord::new(Method::Get, "https://example.com/users");
        assert!(handler.matches(&hit));
        assert!(!handler.matches(&miss));

        let parts = handler.respond(Arc::new(hit)).await;
        assert_eq!(parts.status(), 200);
        assert_eq!(parts.body(), b"for GET");
    }

    #[test]
    fn test_parts_freeze_into_record() {
        let req = RequestRecord::new(Method::Get, "https://example.com/");
        let record = ResponseParts::new(404)
            .with_header("x-mocked", "yes")
            .into_record(req.id());
        assert_eq!(record.status(), 404);
        assert_eq!(record.headers().get("X-Mocked"), Some("yes"));
        assert_eq!(record.request_id(), req.id());
    }
}
