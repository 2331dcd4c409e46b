//! Deferred navigation intent.
//!
//! A `navigate` issued before the container is mounted is parked in a
//! single slot and replayed once the container reports readiness. The slot
//! holds at most one route: a later request overwrites an earlier one.

use crate::action::NavigationType;

/// A navigation that could not run yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRoute {
    /// Requested path.
    pub route: String,
    /// Type hint the path was requested with.
    pub navigation_type: Option<NavigationType>,
}

impl PendingRoute {
    /// Create a pending route.
    pub fn new(route: impl Into<String>, navigation_type: Option<NavigationType>) -> Self {
        Self {
            route: route.into(),
            navigation_type,
        }
    }
}

/// Single-slot holder for the [`PendingRoute`].
#[derive(Debug, Clone, Default)]
pub struct PendingRouteQueue {
    slot: Option<PendingRoute>,
}

impl PendingRouteQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `route`, returning the route it displaced.
    pub fn store(&mut self, route: PendingRoute) -> Option<PendingRoute> {
        self.slot.replace(route)
    }

    /// Remove and return the pending route.
    pub fn take(&mut self) -> Option<PendingRoute> {
        self.slot.take()
    }

    /// Look at the pending route without consuming it.
    pub fn peek(&self) -> Option<&PendingRoute> {
        self.slot.as_ref()
    }

    /// Return `true` if a route is waiting.
    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    /// Drop the pending route.
    pub fn clear(&mut self) {
        self.slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_overwrites() {
        let mut queue = PendingRouteQueue::new();
        assert_eq!(queue.store(PendingRoute::new("r/1", None)), None);

        let displaced = queue.store(PendingRoute::new("r/2", Some(NavigationType::Up)));
        assert_eq!(displaced, Some(PendingRoute::new("r/1", None)));
        assert_eq!(queue.peek().unwrap().route, "r/2");
    }

    #[test]
    fn test_take_consumes() {
        let mut queue = PendingRouteQueue::new();
        queue.store(PendingRoute::new("settings", None));

        assert!(queue.is_pending());
        assert_eq!(queue.take().unwrap().route, "settings");
        assert!(!queue.is_pending());
        assert_eq!(queue.take(), None);
    }

    #[test]
    fn test_clear() {
        let mut queue = PendingRouteQueue::new();
        queue.store(PendingRoute::new("home", None));
        queue.clear();
        assert!(queue.peek().is_none());
    }
}
