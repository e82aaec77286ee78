//! # Passthrough transport: the seam to the real network.
//!
//! When no handler claims a request (and policy allows it), the pipeline
//! forwards the request through a [`Transport`] and treats whatever comes
//! back as the response to observe and send. The transport is an external
//! collaborator: this crate defines the interface, the embedder supplies the
//! actual client.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::InterceptError;
use crate::http::RequestRecord;
use crate::intercept::ResponseParts;

/// Performs the real network round-trip for bypassed requests.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use mockwire::{InterceptError, RequestRecord, ResponseParts, Transport};
///
/// /// A stand-in transport for tests: answers everything with 502.
/// struct DeadUpstream;
///
/// #[async_trait]
/// impl Transport for DeadUpstream {
///     async fn forward(
///         &self,
///         _request: Arc<RequestRecord>,
///     ) -> Result<ResponseParts, InterceptError> {
///         Ok(ResponseParts::new(502))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Sends the request upstream and returns the response it produced.
    ///
    /// # Errors
    /// [`InterceptError::Transport`] when the round-trip fails. The failure
    /// surfaces from `dispatch`; the request's `request:end` event still
    /// fires.
    async fn forward(&self, request: Arc<RequestRecord>) -> Result<ResponseParts, InterceptError>;
}
