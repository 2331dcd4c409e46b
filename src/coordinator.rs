//! The navigation coordinator.
//!
//! [`NavigationCoordinator`] sits between application code and the live
//! navigation container. It resolves paths into actions, decides how "back"
//! and "dismiss" should collapse the stack, answers "where is the user"
//! questions, and gates everything on the container being mounted.
//!
//! # Readiness
//!
//! Before the container is ready every mutating operation logs and returns
//! without effect. `navigate` additionally parks its path in a single pending
//! slot (later calls overwrite earlier ones). When the container reports
//! readiness through [`set_is_navigation_ready`], the pending path is
//! replayed first and the readiness signal resolves afterwards, so anything
//! awaiting [`is_navigation_ready`] observes the replayed navigation.
//!
//! [`set_is_navigation_ready`]: NavigationCoordinator::set_is_navigation_ready
//! [`is_navigation_ready`]: NavigationCoordinator::is_navigation_ready
//!
//! # Example
//!
//! ```
//! use stack_navigation::linking::{LinkingConfig, ScreenConfig};
//! use stack_navigation::{CoordinatorConfig, NavigationCoordinator};
//!
//! let linking = LinkingConfig::new(vec![ScreenConfig::new("CentralPaneNavigator")
//!     .screen(ScreenConfig::new("Home").path("home"))
//!     .screen(ScreenConfig::new("Report").path("r/:reportID"))])
//! .unwrap();
//!
//! let mut coordinator = NavigationCoordinator::new(linking, CoordinatorConfig::default());
//!
//! // No container attached yet: the path waits for readiness.
//! coordinator.navigate("r/123", None);
//! assert_eq!(coordinator.pending_route().unwrap().route, "r/123");
//! assert!(coordinator.active_route().is_empty());
//! ```

use crate::action::{NavigationAction, NavigationType};
use crate::config::CoordinatorConfig;
use crate::error::NavigationError;
use crate::handle::NavigationHandle;
use crate::link::link_to;
use crate::linking::PathStateCodec;
use crate::pending::{PendingRoute, PendingRouteQueue};
use crate::readiness::{ReadinessGate, ReadinessSignal};
use crate::state::{active_route_index, NavigatorState};
use crate::{debug_log, info_log, topmost, trace_log, warn_log, RouteParams};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// GoBackOptions
// ============================================================================

/// Options for [`NavigationCoordinator::go_back`].
///
/// ```
/// use stack_navigation::GoBackOptions;
///
/// let options = GoBackOptions::new().fallback("home").pop_to_top(true);
/// assert_eq!(options.fallback.as_deref(), Some("home"));
/// assert!(!options.enforce_fallback);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoBackOptions {
    /// Path to go "up" to when there is no history in the current navigator.
    pub fallback: Option<String>,
    /// Always navigate to the fallback (or the home path).
    pub enforce_fallback: bool,
    /// Honour a pending [`set_should_pop_all_state_on_up`] request.
    ///
    /// [`set_should_pop_all_state_on_up`]: NavigationCoordinator::set_should_pop_all_state_on_up
    pub pop_to_top: bool,
}

impl GoBackOptions {
    /// Plain back navigation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback path.
    pub fn fallback(mut self, path: impl Into<String>) -> Self {
        self.fallback = Some(path.into());
        self
    }

    /// Force navigation to the fallback.
    pub fn enforce_fallback(mut self, enforce: bool) -> Self {
        self.enforce_fallback = enforce;
        self
    }

    /// Allow popping to the top of the stack.
    pub fn pop_to_top(mut self, pop_to_top: bool) -> Self {
        self.pop_to_top = pop_to_top;
        self
    }
}

// ============================================================================
// NavigationCoordinator
// ============================================================================

/// Coordinates navigation against an attached [`NavigationHandle`].
///
/// Create one per application (or per test) with [`new`](Self::new), then
/// [`attach_handle`](Self::attach_handle) once the container exists.
pub struct NavigationCoordinator {
    handle: Option<Arc<dyn NavigationHandle>>,
    codec: Arc<dyn PathStateCodec>,
    config: CoordinatorConfig,
    pending: PendingRouteQueue,
    readiness: ReadinessGate,
    /// One-shot request to pop to the top on the next "up".
    should_pop_all_state_on_up: bool,
}

impl NavigationCoordinator {
    /// Create a coordinator translating paths through `codec`.
    pub fn new(codec: impl PathStateCodec, config: CoordinatorConfig) -> Self {
        Self::with_shared_codec(Arc::new(codec), config)
    }

    /// Create a coordinator sharing an existing codec.
    pub fn with_shared_codec(codec: Arc<dyn PathStateCodec>, config: CoordinatorConfig) -> Self {
        Self {
            handle: None,
            codec,
            config,
            pending: PendingRouteQueue::new(),
            readiness: ReadinessGate::new(),
            should_pop_all_state_on_up: false,
        }
    }

    /// Attach the live container, replacing any previous one.
    pub fn attach_handle(&mut self, handle: Arc<dyn NavigationHandle>) {
        debug_log!("Navigation handle attached");
        self.handle = Some(handle);
    }

    /// Detach the live container.
    pub fn detach_handle(&mut self) -> Option<Arc<dyn NavigationHandle>> {
        debug_log!("Navigation handle detached");
        self.handle.take()
    }

    /// The attached container, if any.
    pub fn handle(&self) -> Option<&Arc<dyn NavigationHandle>> {
        self.handle.as_ref()
    }

    /// The path/state codec.
    pub fn codec(&self) -> &Arc<dyn PathStateCodec> {
        &self.codec
    }

    /// Current configuration.
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Forget the pending route and the pop-all request, and start over with
    /// an unresolved readiness gate. The handle stays attached.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.should_pop_all_state_on_up = false;
        self.readiness = ReadinessGate::new();
        debug_log!("Navigation coordinator reset");
    }

    /// Return `true` if the container accepts dispatches right now.
    ///
    /// Logs `operation` otherwise.
    pub fn can_navigate(&self, operation: &str) -> bool {
        self.ready_handle(operation).is_some()
    }

    fn ready_handle(&self, operation: &str) -> Option<&Arc<dyn NavigationHandle>> {
        match &self.handle {
            Some(handle) if handle.is_ready() => Some(handle),
            _ => {
                debug_log!(
                    "{} failed because the navigation container is not ready yet",
                    operation
                );
                None
            }
        }
    }

    // ------------------------------------------------------------------------
    // Mutating operations
    // ------------------------------------------------------------------------

    /// Navigate to `path`.
    ///
    /// Deferred until readiness when the container is not ready.
    pub fn navigate(&mut self, path: &str, navigation_type: Option<NavigationType>) {
        let Some(handle) = self.ready_handle("navigate") else {
            debug_log!("Container not ready, storing route as pending: {}", path);
            if let Some(displaced) = self.pending.store(PendingRoute::new(path, navigation_type)) {
                trace_log!("Pending route '{}' overwritten", displaced.route);
            }
            return;
        };

        link_to(
            handle.as_ref(),
            self.codec.as_ref(),
            &self.config.names,
            path,
            navigation_type,
        );
    }

    /// Navigate to the configured home path.
    pub fn navigate_home(&mut self) {
        let home = self.config.home_path.clone();
        self.navigate(&home, None);
    }

    /// Stack-aware back navigation.
    ///
    /// In order:
    /// - a pending pop-all request (with [`GoBackOptions::pop_to_top`]) pops
    ///   to the top and is consumed;
    /// - nothing happens when there is no history;
    /// - on the first screen of a navigator, a right modal stack with its own
    ///   history is walked back instead of using the fallback;
    /// - the fallback is navigated to "up" when enforced, or when on the
    ///   first screen and one was given;
    /// - otherwise the container goes back.
    pub fn go_back(&mut self, options: GoBackOptions) {
        let Some(handle) = self.ready_handle("goBack").cloned() else {
            return;
        };

        if options.pop_to_top && self.should_pop_all_state_on_up {
            self.should_pop_all_state_on_up = false;
            trace_log!("Popping all state on up");
            handle.dispatch(NavigationAction::pop_to_top());
            return;
        }

        if !handle.can_go_back() {
            debug_log!("Unable to go back");
            return;
        }

        let modal = &self.config.names.right_modal_navigator;
        let is_first_route_in_navigator = handle
            .state()
            .is_some_and(|state| active_route_index(&state, modal) == 0);

        if is_first_route_in_navigator {
            let modal_has_history = handle
                .root_state()
                .as_ref()
                .and_then(NavigatorState::last_route)
                .is_some_and(|route| {
                    route.name == *modal
                        && route
                            .state
                            .as_ref()
                            .is_some_and(|nested| nested.active_index() > 0)
                });
            if modal_has_history {
                trace_log!("Going back through the right modal stack");
                handle.go_back();
                return;
            }
        }

        if options.enforce_fallback || (is_first_route_in_navigator && options.fallback.is_some()) {
            let fallback = options
                .fallback
                .unwrap_or_else(|| self.config.home_path.clone());
            self.navigate(&fallback, Some(NavigationType::Up));
            return;
        }

        handle.go_back();
    }

    /// Merge `params` into the route with key `route_key`.
    ///
    /// Only needs an attached handle, not readiness.
    pub fn set_params(&self, params: RouteParams, route_key: &str) {
        match &self.handle {
            Some(handle) => handle.dispatch(NavigationAction::set_params(params, route_key)),
            None => {
                debug_log!("setParams ignored, no navigation handle attached");
            }
        }
    }

    /// Dismiss the topmost modal stack.
    ///
    /// With `target_report_id` differing from the topmost report, the modal
    /// is replaced by that report in one step. Otherwise the root stack is
    /// popped, collapsing down to the central pane when a not-found screen is
    /// in the stack.
    pub fn dismiss_modal(&self, target_report_id: Option<&str>) {
        let Some(handle) = self.ready_handle("dismissModal") else {
            return;
        };
        let names = &self.config.names;

        let Some(root) = handle.root_state() else {
            debug_log!("dismissModal failed because there is no root state");
            return;
        };
        let Some(last_route) = root.last_route() else {
            debug_log!("dismissModal failed because the root stack is empty");
            return;
        };
        if !names.is_dismissable(&last_route.name) {
            debug_log!("dismissModal failed because there is no modal stack to dismiss");
            return;
        }

        let target_report_id = target_report_id.filter(|id| !id.is_empty());
        let plain_pop = || NavigationAction::pop().with_target(root.key.clone());

        let action = match target_report_id {
            Some(target) if topmost::topmost_report_id(&root, names).as_deref() != Some(target) => {
                match self.report_replace_action(target) {
                    Ok(action) => action,
                    Err(err) => {
                        warn_log!("Cannot open report {} after dismissing modal: {}", target, err);
                        plain_pop()
                    }
                }
            }
            Some(_) if root.contains_route(&names.not_found) => {
                match root.last_index_of(&names.central_pane_navigator) {
                    Some(central) => NavigationAction::pop_n(root.routes.len() - 1 - central)
                        .with_target(root.key.clone()),
                    None => plain_pop(),
                }
            }
            _ => plain_pop(),
        };

        debug_log!("Dismissing modal with {}", action.action_type());
        handle.dispatch(action);
    }

    fn report_replace_action(&self, report_id: &str) -> Result<NavigationAction, NavigationError> {
        let path = self.config.report_path(report_id)?;
        let state = self.codec.state_from_path(&path)?;
        Ok(self.codec.action_from_state(&state)?.into_replace())
    }

    // ------------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------------

    /// Path of the focused route, or an empty string when unknown.
    pub fn active_route(&self) -> String {
        let Some(handle) = &self.handle else {
            return String::new();
        };
        let has_name = handle
            .current_route()
            .is_some_and(|route| !route.name.is_empty());
        if !has_name {
            return String::new();
        }

        handle
            .root_state()
            .and_then(|root| self.codec.path_from_state(&root))
            .unwrap_or_default()
    }

    /// [`active_route`](Self::active_route) without its query string.
    pub fn active_route_without_params(&self) -> String {
        let mut route = self.active_route();
        if let Some(query_start) = route.find('?') {
            route.truncate(query_start);
        }
        route
    }

    /// Whether `path` (without leading slash) is the active route.
    pub fn is_active_route(&self, path: &str) -> bool {
        let active = self.active_route();
        let mut chars = active.chars();
        chars.next();
        chars.as_str() == path
    }

    /// Topmost report id of `state`, or of the live root state.
    pub fn topmost_report_id(&self, state: Option<&NavigatorState>) -> Option<String> {
        self.with_state(state, |state| {
            topmost::topmost_report_id(state, &self.config.names)
        })
    }

    /// Topmost central pane screen of `state`, or of the live root state.
    pub fn topmost_central_pane_route_name(&self, state: Option<&NavigatorState>) -> Option<String> {
        self.with_state(state, |state| {
            topmost::topmost_central_pane_route_name(state, &self.config.names)
        })
    }

    /// Topmost report action id of `state`, or of the live root state.
    pub fn topmost_report_action_id(&self, state: Option<&NavigatorState>) -> Option<String> {
        self.with_state(state, |state| {
            topmost::topmost_report_action_id(state, &self.config.names)
        })
    }

    fn with_state<T>(
        &self,
        state: Option<&NavigatorState>,
        f: impl FnOnce(&NavigatorState) -> Option<T>,
    ) -> Option<T> {
        match state {
            Some(state) => f(state),
            None => {
                let root = self.handle.as_ref()?.root_state()?;
                f(&root)
            }
        }
    }

    // ------------------------------------------------------------------------
    // Readiness and flags
    // ------------------------------------------------------------------------

    /// Signal completing once the container has been marked ready.
    pub fn is_navigation_ready(&self) -> ReadinessSignal {
        self.readiness.signal()
    }

    /// Mark the container ready: replay the pending route, then resolve the
    /// readiness signal. Later calls do nothing.
    ///
    /// Ignored while the attached container does not report itself ready, so
    /// the pending route stays parked for the next call.
    pub fn set_is_navigation_ready(&mut self) {
        if self.readiness.is_resolved() {
            debug_log!("Navigation already marked ready");
            return;
        }
        if !self.can_navigate("setIsNavigationReady") {
            return;
        }

        if let Some(pending) = self.pending.take() {
            info_log!("Container now ready, going to pending route: {}", pending.route);
            self.navigate(&pending.route, pending.navigation_type);
        }

        self.readiness.resolve();
        info_log!("Navigation is ready");
    }

    /// Pop to the top on the next [`go_back`](Self::go_back) with
    /// [`GoBackOptions::pop_to_top`].
    pub fn set_should_pop_all_state_on_up(&mut self) {
        self.should_pop_all_state_on_up = true;
    }

    /// Whether a pop-all request is waiting.
    pub fn should_pop_all_state_on_up(&self) -> bool {
        self.should_pop_all_state_on_up
    }

    /// The route waiting for readiness.
    pub fn pending_route(&self) -> Option<&PendingRoute> {
        self.pending.peek()
    }
}

impl fmt::Debug for NavigationCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationCoordinator")
            .field("handle_attached", &self.handle.is_some())
            .field("config", &self.config)
            .field("pending", &self.pending)
            .field("readiness", &self.readiness)
            .field("should_pop_all_state_on_up", &self.should_pop_all_state_on_up)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linking::{LinkingConfig, ScreenConfig};
    use crate::state::Route;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubHandle {
        ready: AtomicBool,
        root: Mutex<Option<NavigatorState>>,
        dispatched: Mutex<Vec<NavigationAction>>,
    }

    impl NavigationHandle for StubHandle {
        fn is_ready(&self) -> bool {
            self.ready.load(Ordering::SeqCst)
        }

        fn root_state(&self) -> Option<NavigatorState> {
            self.root.lock().unwrap().clone()
        }

        fn dispatch(&self, action: NavigationAction) {
            self.dispatched.lock().unwrap().push(action);
        }

        fn can_go_back(&self) -> bool {
            true
        }
    }

    fn coordinator() -> NavigationCoordinator {
        let linking = LinkingConfig::new(vec![ScreenConfig::new("CentralPaneNavigator")
            .screen(ScreenConfig::new("Home").path("home"))
            .screen(ScreenConfig::new("Report").path("r/:reportID"))])
        .unwrap();
        NavigationCoordinator::new(linking, CoordinatorConfig::default())
    }

    fn attach(coordinator: &mut NavigationCoordinator, ready: bool) -> Arc<StubHandle> {
        let handle = Arc::new(StubHandle::default());
        handle.ready.store(ready, Ordering::SeqCst);
        coordinator.attach_handle(handle.clone());
        handle
    }

    #[test]
    fn test_can_navigate_without_handle() {
        let coordinator = coordinator();
        assert!(!coordinator.can_navigate("navigate"));
    }

    #[test]
    fn test_navigate_before_ready_is_deferred() {
        let mut coordinator = coordinator();
        let handle = attach(&mut coordinator, false);

        coordinator.navigate("r/1", None);
        coordinator.navigate("r/2", Some(NavigationType::Up));

        let pending = coordinator.pending_route().unwrap();
        assert_eq!(pending.route, "r/2");
        assert_eq!(pending.navigation_type, Some(NavigationType::Up));
        assert!(handle.dispatched.lock().unwrap().is_empty());
    }

    #[test]
    fn test_navigate_home() {
        let mut coordinator = coordinator();
        coordinator.navigate_home();
        assert_eq!(coordinator.pending_route().unwrap().route, "home");
    }

    #[test]
    fn test_set_params_needs_only_handle() {
        let mut coordinator = coordinator();
        coordinator.set_params(RouteParams::new().with("a", "1"), "Report-1");

        let handle = attach(&mut coordinator, false);
        coordinator.set_params(RouteParams::new().with("a", "1"), "Report-1");

        let dispatched = handle.dispatched.lock().unwrap();
        assert_eq!(
            dispatched.as_slice(),
            &[NavigationAction::set_params(
                RouteParams::new().with("a", "1"),
                "Report-1"
            )]
        );
    }

    #[test]
    fn test_reset_clears_state() {
        let mut coordinator = coordinator();
        let handle = attach(&mut coordinator, true);
        coordinator.set_should_pop_all_state_on_up();
        coordinator.set_is_navigation_ready();
        assert!(coordinator.is_navigation_ready().now_or_never().is_some());

        handle.ready.store(false, Ordering::SeqCst);
        coordinator.navigate("r/2", None);
        coordinator.reset();

        assert!(coordinator.pending_route().is_none());
        assert!(!coordinator.should_pop_all_state_on_up());
        assert!(coordinator.is_navigation_ready().now_or_never().is_none());
    }

    #[test]
    fn test_signal_from_before_reset_stays_pending() {
        let mut coordinator = coordinator();
        let stale = coordinator.is_navigation_ready();
        coordinator.reset();

        assert!(stale.clone().now_or_never().is_none());

        attach(&mut coordinator, true);
        coordinator.set_is_navigation_ready();
        assert!(stale.now_or_never().is_none());
        assert!(coordinator.is_navigation_ready().now_or_never().is_some());
    }

    #[test]
    fn test_ready_call_ignored_until_container_ready() {
        let mut coordinator = coordinator();
        let handle = attach(&mut coordinator, false);
        coordinator.navigate("r/9", None);

        coordinator.set_is_navigation_ready();
        assert_eq!(coordinator.pending_route().unwrap().route, "r/9");
        assert!(coordinator.is_navigation_ready().now_or_never().is_none());

        handle.ready.store(true, Ordering::SeqCst);
        coordinator.set_is_navigation_ready();
        assert!(coordinator.pending_route().is_none());
        assert_eq!(handle.dispatched.lock().unwrap().len(), 1);
        assert!(coordinator.is_navigation_ready().now_or_never().is_some());
    }

    #[test]
    fn test_topmost_defaults_to_live_state() {
        let mut coordinator = coordinator();
        assert_eq!(coordinator.topmost_report_id(None), None);

        let handle = attach(&mut coordinator, true);
        *handle.root.lock().unwrap() = Some(NavigatorState::new("root").route(
            Route::new("CentralPaneNavigator")
                .state(NavigatorState::new("c").route(Route::new("Report").param("reportID", "8"))),
        ));

        assert_eq!(coordinator.topmost_report_id(None), Some("8".to_string()));
        assert_eq!(
            coordinator.topmost_central_pane_route_name(None),
            Some("Report".to_string())
        );

        let other = NavigatorState::new("other");
        assert_eq!(coordinator.topmost_report_id(Some(&other)), None);
    }

    #[test]
    fn test_detach_handle() {
        let mut coordinator = coordinator();
        attach(&mut coordinator, true);
        assert!(coordinator.can_navigate("navigate"));

        assert!(coordinator.detach_handle().is_some());
        assert!(!coordinator.can_navigate("navigate"));
    }
}
