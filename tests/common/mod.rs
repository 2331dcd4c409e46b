//! Test utilities for coordinator tests
//!
//! Provides a recording navigation handle, a linking fixture and state builders.

#![allow(dead_code)]

use stack_navigation::linking::{LinkingConfig, ScreenConfig};
use stack_navigation::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Route log output to the test harness. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Navigation handle that records dispatched actions.
///
/// The container state is set by the test; dispatches do not change it.
#[derive(Default)]
pub struct RecordingHandle {
    ready: AtomicBool,
    can_go_back: AtomicBool,
    root: Mutex<Option<NavigatorState>>,
    /// Overrides `state()` when set, to model a container whose current
    /// navigator differs from the root.
    current: Mutex<Option<NavigatorState>>,
    dispatched: Mutex<Vec<NavigationAction>>,
}

impl RecordingHandle {
    /// A handle that is not ready yet.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A ready handle with history and the given root state.
    pub fn ready_with(root: NavigatorState) -> Arc<Self> {
        let handle = Self::new();
        handle.set_ready(true);
        handle.set_can_go_back(true);
        handle.set_root(root);
        handle
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    pub fn set_can_go_back(&self, can_go_back: bool) {
        self.can_go_back.store(can_go_back, Ordering::SeqCst);
    }

    pub fn set_root(&self, root: NavigatorState) {
        *self.root.lock().unwrap() = Some(root);
    }

    pub fn set_current_state(&self, state: NavigatorState) {
        *self.current.lock().unwrap() = Some(state);
    }

    /// Actions dispatched so far.
    pub fn dispatched(&self) -> Vec<NavigationAction> {
        self.dispatched.lock().unwrap().clone()
    }

    /// The single dispatched action. Panics unless exactly one was dispatched.
    pub fn only_action(&self) -> NavigationAction {
        let dispatched = self.dispatched();
        assert_eq!(dispatched.len(), 1, "expected one dispatch, got {:?}", dispatched);
        dispatched.into_iter().next().unwrap()
    }

    pub fn clear(&self) {
        self.dispatched.lock().unwrap().clear();
    }
}

impl NavigationHandle for RecordingHandle {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn root_state(&self) -> Option<NavigatorState> {
        self.root.lock().unwrap().clone()
    }

    fn state(&self) -> Option<NavigatorState> {
        self.current
            .lock()
            .unwrap()
            .clone()
            .or_else(|| self.root_state())
    }

    fn dispatch(&self, action: NavigationAction) {
        self.dispatched.lock().unwrap().push(action);
    }

    fn can_go_back(&self) -> bool {
        self.can_go_back.load(Ordering::SeqCst)
    }
}

/// Screen table used across tests.
pub fn linking() -> LinkingConfig {
    LinkingConfig::new(vec![
        ScreenConfig::new("CentralPaneNavigator")
            .screen(ScreenConfig::new("Home").path("home"))
            .screen(ScreenConfig::new("Report").path("r/:reportID/:reportActionID?")),
        ScreenConfig::new("RightModalNavigator").screens(vec![
            ScreenConfig::new("Settings_Root").path("settings"),
            ScreenConfig::new("Settings_Profile").path("settings/profile"),
            ScreenConfig::new("Search").path("search"),
        ]),
        ScreenConfig::new("NotFound").path("404"),
        ScreenConfig::new("ReportAttachments").path("attachment"),
    ])
    .unwrap()
}

/// Fresh coordinator over the fixture table, with `handle` attached.
pub fn coordinator_with(handle: &Arc<RecordingHandle>) -> NavigationCoordinator {
    init_logging();
    let mut coordinator = NavigationCoordinator::new(linking(), CoordinatorConfig::default());
    coordinator.attach_handle(handle.clone());
    coordinator
}

/// Central pane showing the given reports, last one on top.
pub fn central_pane(report_ids: &[&str]) -> Route {
    let mut nested = NavigatorState::new("central");
    for id in report_ids {
        nested = nested.route(Route::new("Report").param("reportID", *id));
    }
    if !report_ids.is_empty() {
        nested = nested.index(report_ids.len() - 1);
    }
    Route::new("CentralPaneNavigator").state(nested)
}

/// Right modal navigator with the given screens, last one active.
pub fn right_modal(screens: &[&str]) -> Route {
    let mut nested = NavigatorState::new("modal");
    for screen in screens {
        nested = nested.route(Route::new(*screen));
    }
    if !screens.is_empty() {
        nested = nested.index(screens.len() - 1);
    }
    Route::new("RightModalNavigator").state(nested)
}

/// Root stack with the last route active.
pub fn root(routes: Vec<Route>) -> NavigatorState {
    let index = routes.len().saturating_sub(1);
    NavigatorState::new("root").routes(routes).index(index)
}

/// Target of a navigate-style action. Panics for other actions.
pub fn target_of(action: &NavigationAction) -> &RouteTarget {
    action
        .route_target()
        .unwrap_or_else(|| panic!("not a navigate-style action: {:?}", action))
}

/// Name of the innermost route a navigate-style action leads to.
pub fn leaf_name(action: &NavigationAction) -> String {
    let target = target_of(action);
    match &target.state {
        Some(state) => state.focused_route().unwrap().name.clone(),
        None => target.name.clone(),
    }
}

/// Param of the innermost route a navigate-style action leads to.
pub fn leaf_param(action: &NavigationAction, key: &str) -> Option<String> {
    let target = target_of(action);
    let params = match &target.state {
        Some(state) => &state.focused_route().unwrap().params,
        None => &target.params,
    };
    params.get(key).map(str::to_string)
}
