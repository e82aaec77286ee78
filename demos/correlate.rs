//! # Example: correlate
//!
//! Demonstrates correlating events across concurrent in-flight requests.
//!
//! The bus keeps no state between events; every payload carries the request's
//! identifier and observers build their own tables. [`TrafficRecorder`] is
//! the built-in reference for exactly that.
//!
//! ## Flow
//! ```text
//! dispatch(A) ─┐                      recorder table:
//! dispatch(B) ─┼─► interleaved events ──► A: start, match, mocked, end
//! dispatch(C) ─┘   (shared bus)           B: start, match, mocked, end
//!                                         C: start, match, mocked, end
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example correlate
//! ```

use std::time::Duration;

use mockwire::{
    HandlerFn, InterceptorConfig, Method, MockInterceptor, RequestRecord, ResponseDelay,
    ResponseParts, TrafficRecorder,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let interceptor = MockInterceptor::builder(InterceptorConfig {
        // Spread responses out so the three lives genuinely interleave.
        delay: ResponseDelay::Fixed(Duration::from_millis(20)),
        ..Default::default()
    })
    .with_handler(HandlerFn::arc(
        "echo-path",
        |_req| true,
        |req| async move { ResponseParts::new(200).with_body(req.url().as_bytes()) },
    ))
    .build();

    let recorder = TrafficRecorder::new();
    recorder.attach(&interceptor.events())?;

    let a = RequestRecord::new(Method::Get, "https://example.com/a");
    let b = RequestRecord::new(Method::Get, "https://example.com/b");
    let c = RequestRecord::new(Method::Get, "https://example.com/c");

    let (ra, rb, rc) = tokio::join!(
        interceptor.dispatch(a),
        interceptor.dispatch(b),
        interceptor.dispatch(c),
    );
    ra?;
    rb?;
    rc?;

    for id in recorder.request_ids().await {
        let sequence: Vec<_> = recorder
            .sequence(id)
            .await
            .iter()
            .map(|name| name.as_str())
            .collect();
        println!("{id} -> {} (complete: {})", sequence.join(", "), recorder.is_complete(id).await);
    }
    Ok(())
}
