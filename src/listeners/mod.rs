//! # Built-in listeners.
//!
//! Reference implementations of the [`Listener`](crate::Listener) trait:
//!
//! - [`TrafficRecorder`]: keeps per-request event sequences, the correlation
//!   table the bus itself deliberately never holds. Useful in tests and
//!   debugging tools.
//! - [`LogWriter`] (feature `logging`): prints one line per event, for demos
//!   and development.
//!
//! ## Implementing custom listeners
//! ```
//! use mockwire::{LifecycleEvent, Listener};
//! use async_trait::async_trait;
//!
//! struct Metrics;
//!
//! #[async_trait]
//! impl Listener for Metrics {
//!     async fn on_event(&self, event: &LifecycleEvent) {
//!         if event.response().is_some() {
//!             // count a completed response...
//!         }
//!     }
//! }
//! ```

#[cfg(feature = "logging")]
mod log;
mod recorder;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use recorder::TrafficRecorder;
