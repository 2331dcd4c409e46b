//! The live navigation container, as seen by the coordinator.
//!
//! The container (mounting and rendering screens) lives outside this crate.
//! It is represented by [`NavigationHandle`]: a readiness flag, state
//! snapshots and an action sink. Implementations use interior mutability;
//! every method takes `&self`, mirroring an imperative container reference.

use crate::action::NavigationAction;
use crate::state::{NavigatorState, Route};

/// Imperative reference to a mounted navigation container.
///
/// # Example
///
/// ```
/// use std::sync::Mutex;
/// use stack_navigation::{NavigationAction, NavigationHandle, NavigatorState};
///
/// #[derive(Default)]
/// struct LoggingHandle {
///     dispatched: Mutex<Vec<NavigationAction>>,
/// }
///
/// impl NavigationHandle for LoggingHandle {
///     fn is_ready(&self) -> bool {
///         true
///     }
///
///     fn root_state(&self) -> Option<NavigatorState> {
///         None
///     }
///
///     fn dispatch(&self, action: NavigationAction) {
///         if let Ok(mut dispatched) = self.dispatched.lock() {
///             dispatched.push(action);
///         }
///     }
///
///     fn can_go_back(&self) -> bool {
///         false
///     }
/// }
/// ```
pub trait NavigationHandle: Send + Sync + 'static {
    /// Whether the container is mounted and accepts dispatches.
    fn is_ready(&self) -> bool;

    /// Snapshot of the root navigator state.
    fn root_state(&self) -> Option<NavigatorState>;

    /// Snapshot of the container's navigator state.
    ///
    /// Defaults to [`root_state`](Self::root_state).
    fn state(&self) -> Option<NavigatorState> {
        self.root_state()
    }

    /// Apply an action. Fire-and-forget.
    fn dispatch(&self, action: NavigationAction);

    /// The focused leaf route.
    ///
    /// Defaults to following active indices of [`root_state`](Self::root_state).
    fn current_route(&self) -> Option<Route> {
        self.root_state()?.focused_route().cloned()
    }

    /// Whether any navigator in the tree has history to pop.
    fn can_go_back(&self) -> bool;

    /// Plain back navigation.
    fn go_back(&self) {
        self.dispatch(NavigationAction::GoBack);
    }
}
