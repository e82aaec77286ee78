//! # Listener registry: per-name listener bookkeeping.
//!
//! Process-lifetime map from [`EventName`] to an ordered listener vector.
//! Insertion order defines invocation order for an emission.
//!
//! ## Rules
//! - Duplicate registration of the identical `Arc` is permitted; multiplicity
//!   is preserved, one invocation per registration.
//! - Removal is by identity (`Arc::ptr_eq`) and drops the **first** match
//!   only; removing an unknown listener is a no-op.
//! - Dispatch reads a **snapshot**: the vector is cloned at emission start, so
//!   a registration change made while an emission is running never affects
//!   that emission's delivery set.
//!
//! The lock is a `std::sync::RwLock`: registration is synchronous, critical
//! sections are a handful of pointer operations, and no `.await` ever happens
//! while the lock is held. A poisoned lock is recovered by continuing with the
//! inner data, listener bookkeeping must survive an unrelated panic.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::events::{EventName, ListenerRef};

/// Shared listener table behind the bus facade and the emitter.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    listeners: RwLock<HashMap<EventName, Vec<ListenerRef>>>,
}

impl ListenerRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends `listener` under `name`.
    pub(crate) fn add(&self, name: EventName, listener: ListenerRef) {
        let mut map = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        map.entry(name).or_default().push(listener);
    }

    /// Removes the first registration of `listener` under `name`, if any.
    ///
    /// Returns `true` when something was removed.
    pub(crate) fn remove(&self, name: EventName, listener: &ListenerRef) -> bool {
        let mut map = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(list) = map.get_mut(&name) {
            if let Some(pos) = list.iter().position(|l| std::sync::Arc::ptr_eq(l, listener)) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    /// Clears one name's listeners, or every name's when `name` is `None`.
    ///
    /// Idempotent.
    pub(crate) fn remove_all(&self, name: Option<EventName>) {
        let mut map = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match name {
            Some(name) => {
                map.remove(&name);
            }
            None => map.clear(),
        }
    }

    /// Clones the current listener vector for `name`.
    ///
    /// This is the emission-time snapshot: callers iterate the returned
    /// vector without holding the lock.
    pub(crate) fn snapshot(&self, name: EventName) -> Vec<ListenerRef> {
        let map = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        map.get(&name).cloned().unwrap_or_default()
    }

    /// Number of registrations currently held under `name`.
    pub(crate) fn count(&self, name: EventName) -> usize {
        let map = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        map.get(&name).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{LifecycleEvent, Listener};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Noop;

    #[async_trait]
    impl Listener for Noop {
        async fn on_event(&self, _event: &LifecycleEvent) {}
    }

    fn listener() -> ListenerRef {
        Arc::new(Noop)
    }

    #[test]
    fn test_duplicate_registration_preserves_multiplicity() {
        let registry = ListenerRegistry::new();
        let l = listener();
        registry.add(EventName::RequestStart, Arc::clone(&l));
        registry.add(EventName::RequestStart, Arc::clone(&l));
        assert_eq!(registry.count(EventName::RequestStart), 2);

        registry.remove(EventName::RequestStart, &l);
        assert_eq!(
            registry.count(EventName::RequestStart),
            1,
            "remove drops only the first matching registration"
        );
    }

    #[test]
    fn test_remove_is_identity_based() {
        let registry = ListenerRegistry::new();
        let a = listener();
        let b = listener();
        registry.add(EventName::RequestMatch, Arc::clone(&a));

        assert!(!registry.remove(EventName::RequestMatch, &b), "b was never registered");
        assert_eq!(registry.count(EventName::RequestMatch), 1);
        assert!(registry.remove(EventName::RequestMatch, &a));
        assert_eq!(registry.count(EventName::RequestMatch), 0);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let registry = ListenerRegistry::new();
        let l = listener();
        assert!(!registry.remove(EventName::RequestEnd, &l));
    }

    #[test]
    fn test_remove_all_scoped_leaves_other_names_intact() {
        let registry = ListenerRegistry::new();
        registry.add(EventName::RequestStart, listener());
        registry.add(EventName::RequestMatch, listener());

        registry.remove_all(Some(EventName::RequestStart));
        assert_eq!(registry.count(EventName::RequestStart), 0);
        assert_eq!(registry.count(EventName::RequestMatch), 1);

        // idempotent
        registry.remove_all(Some(EventName::RequestStart));
        assert_eq!(registry.count(EventName::RequestMatch), 1);
    }

    #[test]
    fn test_remove_all_global() {
        let registry = ListenerRegistry::new();
        registry.add(EventName::RequestStart, listener());
        registry.add(EventName::ResponseMocked, listener());

        registry.remove_all(None);
        for name in EventName::ALL {
            assert_eq!(registry.count(name), 0);
        }
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_mutation() {
        let registry = ListenerRegistry::new();
        let l = listener();
        registry.add(EventName::RequestEnd, Arc::clone(&l));

        let snapshot = registry.snapshot(EventName::RequestEnd);
        registry.remove_all(None);

        assert_eq!(snapshot.len(), 1, "snapshot must survive registry mutation");
        assert_eq!(registry.count(EventName::RequestEnd), 0);
    }
}
