//! Opaque request-correlation identifier.

use std::fmt;

use uuid::Uuid;

/// Correlation key shared by every event of one intercepted request.
///
/// Minted exactly once, when the request is first observed (at
/// [`RequestRecord::new`](crate::RequestRecord::new)), and never reused.
/// The bus keeps no registry of identifiers: correlating events back to a
/// request is done by the listener, by comparing these values.
///
/// Cheap to copy and usable as a map key, which is all a correlation table
/// needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Mints a fresh, globally unique identifier.
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = RequestId::new();
        let b = RequestId::new();
        assert_ne!(a, b, "two minted ids must never collide");
    }

    #[test]
    fn test_display_is_uuid_shaped() {
        let id = RequestId::new();
        let text = id.to_string();
        assert_eq!(text.len(), 36);
        assert_eq!(text.matches('-').count(), 4);
    }
}
