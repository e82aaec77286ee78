//! # Example: unhandled_policy
//!
//! Demonstrates the three unhandled-request policies and the passthrough
//! transport seam.
//!
//! Shows how to:
//! - Implement [`Transport`] (here a canned fake standing in for a real
//!   HTTP client).
//! - Switch between `Bypass`, `Warn`, and `Error` for unmatched traffic.
//!
//! ## Run
//! ```bash
//! cargo run --example unhandled_policy
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use mockwire::{
    InterceptError, InterceptorConfig, Method, MockInterceptor, RequestRecord, ResponseParts,
    Transport, UnhandledPolicy,
};

/// Stand-in for a real network client: answers everything with 204.
struct CannedUpstream;

#[async_trait]
impl Transport for CannedUpstream {
    async fn forward(
        &self,
        request: Arc<RequestRecord>,
    ) -> Result<ResponseParts, InterceptError> {
        println!("(upstream) {} {}", request.method(), request.url());
        Ok(ResponseParts::new(204))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    for policy in [
        UnhandledPolicy::Bypass,
        UnhandledPolicy::Warn,
        UnhandledPolicy::Error,
    ] {
        let interceptor = MockInterceptor::builder(InterceptorConfig {
            on_unhandled: policy,
            ..Default::default()
        })
        .with_transport(Arc::new(CannedUpstream))
        .build();

        let request = RequestRecord::new(Method::Get, "https://api.example.com/unmocked");
        match interceptor.dispatch(request).await {
            Ok(outcome) => println!(
                "{policy:?}: passed through with status {}",
                outcome.response().status()
            ),
            Err(err) => println!("{policy:?}: dispatch failed: {err}"),
        }
    }
    Ok(())
}
