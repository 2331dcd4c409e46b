//! GPUI integration.
//!
//! With the `gpui` feature the [`NavigationCoordinator`] can live in a GPUI
//! app as a `Global`:
//!
//! - [`init_navigation`] installs a coordinator.
//! - [`Navigation`] offers static methods (`Navigation::navigate`,
//!   `Navigation::go_back`, …) that read or update the global through `cx`
//!   and refresh windows after mutating operations.
//! - [`UseNavigation`] gives direct access to the global from an `App`.
//!
//! ```ignore
//! use stack_navigation::{init_navigation, Navigation, NavigationCoordinator};
//!
//! init_navigation(cx, NavigationCoordinator::new(linking, config));
//! Navigation::attach_handle(cx, handle);
//! Navigation::set_is_navigation_ready(cx);
//! Navigation::navigate(cx, "r/123");
//! ```

use crate::action::NavigationType;
use crate::coordinator::{GoBackOptions, NavigationCoordinator};
use crate::handle::NavigationHandle;
use crate::readiness::ReadinessSignal;
use crate::{debug_log, RouteParams};
use gpui::{App, BorrowAppContext, Global};
use std::borrow::BorrowMut;
use std::sync::Arc;

impl Global for NavigationCoordinator {}

// ============================================================================
// UseNavigation trait
// ============================================================================

/// Access to the global coordinator from context.
pub trait UseNavigation {
    /// Reference to the global coordinator.
    fn navigation(&self) -> &NavigationCoordinator;

    /// Update the global coordinator.
    fn update_navigation<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut NavigationCoordinator, &mut App) -> R;
}

impl UseNavigation for App {
    fn navigation(&self) -> &NavigationCoordinator {
        self.global::<NavigationCoordinator>()
    }

    fn update_navigation<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut NavigationCoordinator, &mut App) -> R,
    {
        self.update_global(f)
    }
}

// ============================================================================
// init_navigation
// ============================================================================

/// Install `coordinator` as the global coordinator.
pub fn init_navigation(cx: &mut App, coordinator: NavigationCoordinator) {
    debug_log!("Global navigation coordinator installed");
    cx.set_global(coordinator);
}

// ============================================================================
// Navigation
// ============================================================================

/// Static navigation API over the global [`NavigationCoordinator`].
pub struct Navigation;

impl Navigation {
    /// Attach the live container.
    pub fn attach_handle(cx: &mut impl BorrowAppContext, handle: Arc<dyn NavigationHandle>) {
        cx.update_global::<NavigationCoordinator, _>(|coordinator, _| {
            coordinator.attach_handle(handle);
        });
    }

    /// Navigate to `path`, deferring it until readiness if needed.
    pub fn navigate(cx: &mut (impl BorrowAppContext + BorrowMut<App>), path: impl Into<String>) {
        Self::navigate_with_type(cx, path, None);
    }

    /// Navigate to `path` with a type hint.
    pub fn navigate_with_type(
        cx: &mut (impl BorrowAppContext + BorrowMut<App>),
        path: impl Into<String>,
        navigation_type: Option<NavigationType>,
    ) {
        let path = path.into();
        cx.update_global::<NavigationCoordinator, _>(|coordinator, _| {
            coordinator.navigate(&path, navigation_type);
        });
        cx.borrow_mut().refresh_windows();
    }

    /// Navigate to the home path.
    pub fn navigate_home(cx: &mut (impl BorrowAppContext + BorrowMut<App>)) {
        cx.update_global::<NavigationCoordinator, _>(|coordinator, _| {
            coordinator.navigate_home();
        });
        cx.borrow_mut().refresh_windows();
    }

    /// Stack-aware back navigation.
    pub fn go_back(cx: &mut (impl BorrowAppContext + BorrowMut<App>), options: GoBackOptions) {
        cx.update_global::<NavigationCoordinator, _>(|coordinator, _| {
            coordinator.go_back(options);
        });
        cx.borrow_mut().refresh_windows();
    }

    /// Merge params into the route with key `route_key`.
    pub fn set_params(
        cx: &mut (impl BorrowAppContext + BorrowMut<App>),
        params: RouteParams,
        route_key: &str,
    ) {
        cx.update_global::<NavigationCoordinator, _>(|coordinator, _| {
            coordinator.set_params(params, route_key);
        });
        cx.borrow_mut().refresh_windows();
    }

    /// Dismiss the topmost modal stack.
    pub fn dismiss_modal(
        cx: &mut (impl BorrowAppContext + BorrowMut<App>),
        target_report_id: Option<&str>,
    ) {
        cx.update_global::<NavigationCoordinator, _>(|coordinator, _| {
            coordinator.dismiss_modal(target_report_id);
        });
        cx.borrow_mut().refresh_windows();
    }

    /// Mark the container ready and replay any pending route.
    pub fn set_is_navigation_ready(cx: &mut (impl BorrowAppContext + BorrowMut<App>)) {
        cx.update_global::<NavigationCoordinator, _>(|coordinator, _| {
            coordinator.set_is_navigation_ready();
        });
        cx.borrow_mut().refresh_windows();
    }

    /// Request a pop to the top on the next "up".
    pub fn set_should_pop_all_state_on_up(cx: &mut impl BorrowAppContext) {
        cx.update_global::<NavigationCoordinator, _>(|coordinator, _| {
            coordinator.set_should_pop_all_state_on_up();
        });
    }

    /// Signal completing once navigation is ready.
    pub fn is_navigation_ready(cx: &App) -> ReadinessSignal {
        cx.navigation().is_navigation_ready()
    }

    /// Path of the focused route, or an empty string.
    pub fn active_route(cx: &App) -> String {
        cx.navigation().active_route()
    }

    /// Whether `path` (without leading slash) is active.
    pub fn is_active_route(cx: &App, path: &str) -> bool {
        cx.navigation().is_active_route(path)
    }

    /// Topmost report id of the live root state.
    pub fn topmost_report_id(cx: &App) -> Option<String> {
        cx.navigation().topmost_report_id(None)
    }
}

// ============================================================================
// Tests
// ============================================================================
