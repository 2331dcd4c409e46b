//! Pure walkers answering "where is the user" questions about a state.
//!
//! These never touch the live container, so they can be applied to any
//! snapshot, including states built from a path before dispatching them.
//! The coordinator wraps them to default to the live root state.

use crate::config::RouteNames;
use crate::state::{NavigatorState, Route};

/// Last central-pane route among the top-level routes.
fn topmost_central_pane<'a>(state: &'a NavigatorState, names: &RouteNames) -> Option<&'a Route> {
    state
        .routes
        .iter()
        .rev()
        .find(|route| route.name == names.central_pane_navigator)
}

/// Read a report param from the topmost central pane.
///
/// The central pane's own params win (a pending nested navigation that has
/// not materialised a state yet); otherwise the last report screen inside
/// its nested state is used.
fn topmost_report_param(state: &NavigatorState, names: &RouteNames, param: &str) -> Option<String> {
    let central_pane = topmost_central_pane(state, names)?;

    if let Some(value) = central_pane.params.get(param) {
        return Some(value.to_string());
    }

    central_pane
        .state
        .as_ref()?
        .routes
        .iter()
        .rev()
        .find(|route| route.name == names.report_screen)?
        .params
        .get(param)
        .map(str::to_string)
}

/// Id of the report shown in the topmost central pane.
pub fn topmost_report_id(state: &NavigatorState, names: &RouteNames) -> Option<String> {
    topmost_report_param(state, names, &names.report_id_param)
}

/// Id of the report action linked in the topmost central pane.
pub fn topmost_report_action_id(state: &NavigatorState, names: &RouteNames) -> Option<String> {
    topmost_report_param(state, names, &names.report_action_id_param)
}

/// Screen name shown in the topmost central pane.
///
/// Uses the last route of the pane's nested state, or its `screen` param
/// when the nested state has not been built yet.
pub fn topmost_central_pane_route_name(
    state: &NavigatorState,
    names: &RouteNames,
) -> Option<String> {
    let central_pane = topmost_central_pane(state, names)?;
    match &central_pane.state {
        Some(nested) => nested.last_route().map(|route| route.name.clone()),
        None => central_pane.params.get("screen").map(str::to_string),
    }
}

/// Notification emitted by the container when its state changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateChangeEvent {
    /// New root state, if the container has one.
    pub state: Option<NavigatorState>,
}

impl StateChangeEvent {
    /// Wrap a state snapshot.
    pub fn new(state: NavigatorState) -> Self {
        Self { state: Some(state) }
    }
}

/// Name of the last top-level route carried by a state-change event.
pub fn route_name_from_state_event(event: &StateChangeEvent) -> Option<&str> {
    event
        .state
        .as_ref()?
        .last_route()
        .map(|route| route.name.as_str())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> RouteNames {
        RouteNames::default()
    }

    fn central(report_ids: &[&str]) -> Route {
        let mut nested = NavigatorState::new("central");
        for id in report_ids {
            nested = nested.route(Route::new("Report").param("reportID", *id));
        }
        Route::new("CentralPaneNavigator").state(nested)
    }

    #[test]
    fn test_topmost_report_id_uses_last_central_pane() {
        let state = NavigatorState::new("root")
            .route(central(&["1"]))
            .route(central(&["2", "3"]))
            .route(Route::new("RightModalNavigator"));

        assert_eq!(topmost_report_id(&state, &names()), Some("3".to_string()));
    }

    #[test]
    fn test_topmost_report_id_prefers_direct_param() {
        let state = NavigatorState::new("root").route(
            Route::new("CentralPaneNavigator")
                .param("reportID", "77")
                .state(NavigatorState::new("c").route(Route::new("Report").param("reportID", "5"))),
        );

        assert_eq!(topmost_report_id(&state, &names()), Some("77".to_string()));
    }

    #[test]
    fn test_topmost_report_id_without_central_pane() {
        let state = NavigatorState::new("root").route(Route::new("NotFound"));
        assert_eq!(topmost_report_id(&state, &names()), None);
    }

    #[test]
    fn test_topmost_report_id_without_nested_state_or_param() {
        let state = NavigatorState::new("root").route(Route::new("CentralPaneNavigator"));
        assert_eq!(topmost_report_id(&state, &names()), None);
    }

    #[test]
    fn test_topmost_report_action_id() {
        let state = NavigatorState::new("root").route(
            Route::new("CentralPaneNavigator").state(
                NavigatorState::new("c").route(
                    Route::new("Report")
                        .param("reportID", "5")
                        .param("reportActionID", "900"),
                ),
            ),
        );

        assert_eq!(
            topmost_report_action_id(&state, &names()),
            Some("900".to_string())
        );
    }

    #[test]
    fn test_topmost_central_pane_route_name() {
        let state = NavigatorState::new("root").route(central(&["1"]));
        assert_eq!(
            topmost_central_pane_route_name(&state, &names()),
            Some("Report".to_string())
        );

        let pending = NavigatorState::new("root")
            .route(Route::new("CentralPaneNavigator").param("screen", "Settings"));
        assert_eq!(
            topmost_central_pane_route_name(&pending, &names()),
            Some("Settings".to_string())
        );
    }

    #[test]
    fn test_route_name_from_state_event() {
        let event = StateChangeEvent::new(
            NavigatorState::new("root")
                .route(Route::new("CentralPaneNavigator"))
                .route(Route::new("RightModalNavigator")),
        );
        assert_eq!(route_name_from_state_event(&event), Some("RightModalNavigator"));
        assert_eq!(route_name_from_state_event(&StateChangeEvent::default()), None);
    }
}
