//! Path-to-action translation.
//!
//! [`link_to`] turns a path into the concrete action the live container
//! should receive. The codec gives a plain `NAVIGATE`, which is then adjusted
//! to the current stack (first matching rule wins):
//!
//! 1. [`NavigationType::ForcedUp`] always replaces.
//! 2. Opening a different report in the central pane pushes, so the previous
//!    report stays reachable with back.
//! 3. [`NavigationType::Up`] replaces.
//! 4. Opening the right modal navigator on top of something else pushes.

use crate::action::{NavigationAction, NavigationType};
use crate::config::RouteNames;
use crate::error::NavigationError;
use crate::handle::NavigationHandle;
use crate::linking::PathStateCodec;
use crate::state::NavigatorState;
use crate::topmost::topmost_report_id;
use crate::{debug_log, trace_log, warn_log};

/// Compute the action for `path` against the live `root_state`.
pub fn build_link_action(
    root_state: Option<&NavigatorState>,
    codec: &dyn PathStateCodec,
    names: &RouteNames,
    path: &str,
    navigation_type: Option<NavigationType>,
) -> Result<NavigationAction, NavigationError> {
    let state = codec.state_from_path(path)?;
    let action = codec.action_from_state(&state)?;

    let NavigationAction::Navigate(target) = &action else {
        return Ok(action);
    };

    if navigation_type == Some(NavigationType::ForcedUp) {
        return Ok(action.into_replace());
    }

    if target.name == names.central_pane_navigator {
        let current = root_state.and_then(|root| topmost_report_id(root, names));
        let next = topmost_report_id(&state, names);
        if next.is_some() && current != next {
            trace_log!(
                "Pushing report {:?} over topmost report {:?}",
                next,
                current
            );
            return Ok(action.into_push());
        }
    }

    if navigation_type == Some(NavigationType::Up) {
        return Ok(action.into_replace());
    }

    if target.name == names.right_modal_navigator {
        let modal_on_top = root_state
            .and_then(NavigatorState::last_route)
            .is_some_and(|route| route.name == names.right_modal_navigator);
        if !modal_on_top {
            return Ok(action.into_push());
        }
    }

    Ok(action)
}

/// Translate `path` and dispatch the result through `handle`.
///
/// Translation failures are logged and nothing is dispatched.
pub fn link_to(
    handle: &dyn NavigationHandle,
    codec: &dyn PathStateCodec,
    names: &RouteNames,
    path: &str,
    navigation_type: Option<NavigationType>,
) {
    let root_state = handle.root_state();
    match build_link_action(root_state.as_ref(), codec, names, path, navigation_type) {
        Ok(action) => {
            debug_log!("Linking '{}' as {}", path, action.action_type());
            handle.dispatch(action);
        }
        Err(err) => {
            warn_log!("Cannot link to '{}': {}", path, err);
        }
    }
}
