//! # Core listener trait
//!
//! `Listener` is the extension point for observing life-cycle events. Each
//! listener is registered under exactly one event name and is invoked with a
//! shared reference to the typed payload.
//!
//! ## Contract
//! - Observation only: `on_event` returns `()`, records arrive read-only, so
//!   a listener cannot alter matching, delay the response handed downstream,
//!   or act as a request handler.
//! - A panicking listener is isolated during emission and reported via
//!   `tracing`; other listeners and the pipeline are unaffected.
//! - Removal compares listener **identity**: clones of one `Arc` are the same
//!   listener, two separately created `Arc`s are distinct even when their
//!   logic is identical.
//!
//! ## Example (skeleton)
//! ```
//! use mockwire::{LifecycleEvent, Listener};
//! use async_trait::async_trait;
//!
//! struct Audit;
//!
//! #[async_trait]
//! impl Listener for Audit {
//!     async fn on_event(&self, event: &LifecycleEvent) {
//!         // write an audit record...
//!         let _ = event.request_id();
//!     }
//!     fn name(&self) -> &'static str { "audit" }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::events::LifecycleEvent;

/// Contract for life-cycle observers.
///
/// Invoked in registration order during an emission; the emitting call awaits
/// each listener before moving to the next, so a slow listener delays only its
/// own emission, which is that listener's liability.
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    /// Handle a single event.
    ///
    /// # Parameters
    /// - `event`: shared view of the payload (no ownership transfer)
    async fn on_event(&self, event: &LifecycleEvent);

    /// Human-readable name (for diagnostics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Shared handle under which listeners are registered and removed.
pub type ListenerRef = Arc<dyn Listener>;
