//! # The closed set of life-cycle event names.
//!
//! Six names cover the whole life of an intercepted request. The set is fixed
//! at compile time: registration calls parse the wire-level string and reject
//! anything else, and emission only accepts typed
//! [`LifecycleEvent`](crate::LifecycleEvent)s, so no other name can ever
//! travel through the bus.
//!
//! ## Per-request ordering
//! ```text
//! request:start ──► request:match ────► response:mocked ──► request:end
//!              └──► request:unhandled ► response:bypass ──┘
//! ```
//! `request:end` always fires, and always last.

use std::fmt;
use std::str::FromStr;

use crate::error::BusError;

/// Name of a life-cycle event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventName {
    /// Request observed, before handler matching begins.
    RequestStart,
    /// A handler matched the request.
    RequestMatch,
    /// No handler matched the request.
    RequestUnhandled,
    /// The request's life is over, whatever the outcome.
    RequestEnd,
    /// A mocked response is about to be sent.
    ResponseMocked,
    /// A passthrough response is about to be sent.
    ResponseBypass,
}

impl EventName {
    /// Every event name, in canonical life-cycle order.
    ///
    /// Useful for registering one listener across the whole life cycle, see
    /// [`TrafficRecorder::attach`](crate::TrafficRecorder::attach).
    pub const ALL: [EventName; 6] = [
        EventName::RequestStart,
        EventName::RequestMatch,
        EventName::RequestUnhandled,
        EventName::RequestEnd,
        EventName::ResponseMocked,
        EventName::ResponseBypass,
    ];

    /// Returns the canonical wire-level name.
    ///
    /// # Example
    /// ```
    /// use mockwire::EventName;
    ///
    /// assert_eq!(EventName::RequestStart.as_str(), "request:start");
    /// assert_eq!(EventName::ResponseBypass.as_str(), "response:bypass");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::RequestStart => "request:start",
            EventName::RequestMatch => "request:match",
            EventName::RequestUnhandled => "request:unhandled",
            EventName::RequestEnd => "request:end",
            EventName::ResponseMocked => "response:mocked",
            EventName::ResponseBypass => "response:bypass",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventName {
    type Err = BusError;

    /// Parses a wire-level name, failing with
    /// [`BusError::InvalidEventName`] for anything outside the closed set.
    ///
    /// # Example
    /// ```
    /// use mockwire::EventName;
    ///
    /// let name: EventName = "response:mocked".parse().unwrap();
    /// assert_eq!(name, EventName::ResponseMocked);
    /// assert!("request:mocked".parse::<EventName>().is_err());
    /// ```
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        EventName::ALL
            .into_iter()
            .find(|name| name.as_str() == raw)
            .ok_or_else(|| BusError::InvalidEventName { name: raw.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_names() {
        for name in EventName::ALL {
            let parsed: EventName = name.as_str().parse().expect("canonical name must parse");
            assert_eq!(parsed, name);
        }
    }

    #[test]
    fn test_all_covers_six_distinct_names() {
        assert_eq!(EventName::ALL.len(), 6);
        for (i, a) in EventName::ALL.iter().enumerate() {
            for b in &EventName::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_unknown_names_are_rejected() {
        for raw in ["request:oops", "", "REQUEST:START", "response:mocked "] {
            let err = raw.parse::<EventName>().expect_err("must reject");
            assert_eq!(err.as_label(), "invalid_event_name", "raw={raw:?}");
        }
    }
}
